use crate::code::ShortCode;
use crate::domain::{is_sentinel, Domain};
use crate::error::{CodecError, Result};
use crate::layout::{letters_mask, LETTER_MASK, MAX_LETTER};

/// Packs a short code into the domain's discriminant.
///
/// # Errors
/// - `InvalidCode` when the code carries a part the layout has no room for,
///   lacks a required numeric code, exceeds the numeric budget, or would
///   pack to a sentinel value.
pub fn encode(domain: Domain, code: &ShortCode) -> Result<i32> {
    let layout = domain.layout();
    let mut packed: u32 = 0;

    if let Some(bit) = layout.marker_bit {
        packed |= 1 << bit;
    }

    match (code.numeric(), layout.has_numeric()) {
        (Some(numeric), true) => {
            if numeric > layout.max_numeric() {
                return Err(CodecError::invalid_code(
                    code.to_string(),
                    format!(
                        "numeric code {numeric} exceeds the {}-bit budget",
                        layout.numeric_bits
                    ),
                ));
            }
            packed |= numeric;
        }
        (None, true) => {
            return Err(CodecError::invalid_code(
                code.to_string(),
                format!("{domain} codes require a numeric code"),
            ));
        }
        (Some(_), false) => {
            return Err(CodecError::invalid_code(
                code.to_string(),
                format!("{domain} codes carry no numeric code"),
            ));
        }
        (None, false) => {}
    }

    packed |= pack_letters(code.alpha3(), &layout.alpha3)?;

    match (code.alpha2(), layout.alpha2) {
        (Some(alpha2), Some(section)) => {
            packed |= 1 << section.flag_bit;
            packed |= pack_letters(alpha2, &section.offsets)?;
        }
        (Some(_), None) => {
            return Err(CodecError::invalid_code(
                code.to_string(),
                format!("{domain} codes carry no 2-letter code"),
            ));
        }
        (None, _) => {}
    }

    let value = packed as i32;
    if is_sentinel(value) {
        return Err(CodecError::invalid_code(
            code.to_string(),
            format!("packs to the reserved value {value}"),
        ));
    }
    Ok(value)
}

/// Recovers the short code packed by [`encode`].
///
/// # Errors
/// - `InvalidValue` for sentinels, stray bits, a clear marker bit, letter
///   fields beyond `z`, or 2-letter fields set without the presence flag.
pub fn decode(domain: Domain, value: i32) -> Result<ShortCode> {
    let layout = domain.layout();
    if is_sentinel(value) {
        return Err(CodecError::invalid_value(
            domain,
            value,
            "value is a reserved sentinel",
        ));
    }

    let bits = value as u32;
    let stray = bits & !layout.used_bits();
    if stray != 0 {
        return Err(CodecError::invalid_value(
            domain,
            value,
            format!("bits {stray:#x} lie outside the layout"),
        ));
    }
    if let Some(bit) = layout.marker_bit {
        if bits & (1 << bit) == 0 {
            return Err(CodecError::invalid_value(
                domain,
                value,
                format!("marker bit {bit} is clear"),
            ));
        }
    }

    let alpha3 = unpack_letters(domain, value, &layout.alpha3)?;
    let alpha2 = match layout.alpha2 {
        Some(section) if bits & (1 << section.flag_bit) != 0 => {
            Some(unpack_letters(domain, value, &section.offsets)?)
        }
        Some(section) => {
            if bits & letters_mask(&section.offsets) != 0 {
                return Err(CodecError::invalid_value(
                    domain,
                    value,
                    "2-letter fields set without the presence flag",
                ));
            }
            None
        }
        None => None,
    };

    let mut code = ShortCode::new(&alpha3)?;
    if let Some(alpha2) = alpha2 {
        code = code.with_alpha2(&alpha2)?;
    }
    if layout.has_numeric() {
        code = code.with_numeric(bits & layout.numeric_mask());
    }
    Ok(code)
}

/// 3-letter code packed in `value`
pub fn alpha3_of(domain: Domain, value: i32) -> Result<String> {
    decode(domain, value).map(|code| code.alpha3().to_string())
}

/// 2-letter code packed in `value`, `None` when the presence flag is clear
pub fn alpha2_of(domain: Domain, value: i32) -> Result<Option<String>> {
    decode(domain, value).map(|code| code.alpha2().map(str::to_string))
}

/// Numeric code packed in `value`, `None` for layouts without one
pub fn numeric_of(domain: Domain, value: i32) -> Result<Option<u32>> {
    decode(domain, value).map(|code| code.numeric())
}

/// True when `value` decodes and carries a 2-letter code
#[must_use]
pub fn has_alpha2(domain: Domain, value: i32) -> bool {
    matches!(alpha2_of(domain, value), Ok(Some(_)))
}

/// Packs exactly `offsets.len()` lowercase letters; anything else is an
/// `InvalidCode`, never a partial or wrapped field.
fn pack_letters(letters: &str, offsets: &[u32]) -> Result<u32> {
    if letters.len() != offsets.len() {
        return Err(CodecError::invalid_code(
            letters,
            format!("expected {} letters, got {}", offsets.len(), letters.len()),
        ));
    }
    letters
        .bytes()
        .zip(offsets)
        .try_fold(0, |packed, (letter, &offset)| {
            let field = letter
                .checked_sub(b'a')
                .map(u32::from)
                .filter(|&field| field <= MAX_LETTER)
                .ok_or_else(|| {
                    CodecError::invalid_code(
                        letters,
                        format!("{:?} is not a lowercase Latin letter", char::from(letter)),
                    )
                })?;
            Ok(packed | ((field & LETTER_MASK) << offset))
        })
}

fn unpack_letters(domain: Domain, value: i32, offsets: &[u32]) -> Result<String> {
    let bits = value as u32;
    offsets
        .iter()
        .map(|&offset| {
            let field = (bits >> offset) & LETTER_MASK;
            if field > MAX_LETTER {
                return Err(CodecError::invalid_value(
                    domain,
                    value,
                    format!("letter field at bit {offset} holds {field}"),
                ));
            }
            Ok(char::from(b'a' + field as u8))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(alpha3: &str, alpha2: Option<&str>) -> i32 {
        let code = ShortCode::from_parts(alpha3, alpha2, None).unwrap();
        encode(Domain::Language, &code).unwrap()
    }

    #[test]
    fn english_matches_documented_layout() {
        let letter = |c: u8| i32::from(c - b'a') & 0b11111;
        let expected = 1
            | (letter(b'e') << 1)
            | (letter(b'n') << 6)
            | (letter(b'g') << 11)
            | (1 << 16)
            | (letter(b'e') << 17)
            | (letter(b'n') << 22);

        let value = language("eng", Some("en"));
        assert_eq!(value, expected);
        assert_eq!(value, 55_128_905);

        let decoded = decode(Domain::Language, value).unwrap();
        assert_eq!(decoded.alpha3(), "eng");
        assert_eq!(decoded.alpha2(), Some("en"));
        assert!(has_alpha2(Domain::Language, value));
    }

    #[test]
    fn absent_alpha2_is_not_aa() {
        let without = language("aar", None);
        let with_aa = language("aar", Some("aa"));
        assert_ne!(without, with_aa);
        assert_eq!(alpha2_of(Domain::Language, without).unwrap(), None);
        assert_eq!(
            alpha2_of(Domain::Language, with_aa).unwrap().as_deref(),
            Some("aa")
        );
    }

    #[test]
    fn currency_packs_numeric_code_in_low_bits() {
        let euro = ShortCode::new("EUR").unwrap().with_numeric(978);
        let value = encode(Domain::Currency, &euro).unwrap();
        assert_eq!(value, -1_928_854_574);
        assert_eq!(numeric_of(Domain::Currency, value).unwrap(), Some(978));
        assert_eq!(alpha3_of(Domain::Currency, value).unwrap(), "eur");
    }

    #[test]
    fn currency_numeric_beyond_budget_is_rejected() {
        let code = ShortCode::new("eur").unwrap().with_numeric(1 << 17);
        assert!(matches!(
            encode(Domain::Currency, &code),
            Err(CodecError::InvalidCode { .. })
        ));
    }

    #[test]
    fn currency_requires_numeric_and_rejects_alpha2() {
        let bare = ShortCode::new("eur").unwrap();
        assert!(encode(Domain::Currency, &bare).is_err());

        let with_alpha2 = ShortCode::from_parts("eur", Some("eu"), Some(978)).unwrap();
        assert!(encode(Domain::Currency, &with_alpha2).is_err());
    }

    #[test]
    fn language_rejects_numeric() {
        let code = ShortCode::new("eng").unwrap().with_numeric(1);
        assert!(encode(Domain::Language, &code).is_err());
    }

    #[test]
    fn code_packing_to_sentinel_is_rejected() {
        let code = ShortCode::new("aaa").unwrap().with_numeric(0);
        assert!(matches!(
            encode(Domain::Currency, &code),
            Err(CodecError::InvalidCode { .. })
        ));
    }

    #[test]
    fn decode_rejects_foreign_values() {
        assert!(decode(Domain::Language, 0).is_err());
        assert!(decode(Domain::Currency, -1).is_err());
        // marker bit clear
        assert!(decode(Domain::Language, 2).is_err());
        // bit 27 is outside the language layout
        assert!(decode(Domain::Language, 1 | (1 << 27)).is_err());
        // letter field 31 is not a letter
        assert!(decode(Domain::Language, 1 | (31 << 1)).is_err());
        // 2-letter bits without presence flag
        assert!(decode(Domain::Language, 1 | (3 << 17)).is_err());
    }

    #[test]
    fn letter_packing_rejects_short_and_non_letter_input() {
        let offsets = crate::layout::LANGUAGE_LAYOUT.alpha3;
        assert!(pack_letters("eng", &offsets).is_ok());
        for bad in ["en", "engl", "e1g", "ENG", "e g"] {
            assert!(
                matches!(pack_letters(bad, &offsets), Err(CodecError::InvalidCode { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn deserialized_codes_encode_like_constructed_ones() {
        let code: ShortCode =
            serde_json::from_str(r#"{"alpha3": "ENG", "alpha2": "EN"}"#).unwrap();
        assert_eq!(encode(Domain::Language, &code).unwrap(), 55_128_905);
        assert!(serde_json::from_str::<ShortCode>(r#"{"alpha3": "en"}"#).is_err());
    }
}
