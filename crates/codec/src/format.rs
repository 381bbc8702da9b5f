/// Renders a discriminant with `_` digit grouping, e.g. `-1_928_854_574`.
#[must_use]
pub fn format_grouped(value: i32) -> String {
    let digits = i64::from(value).unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(digit);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_grouped(0), "0");
        assert_eq!(format_grouped(-1), "-1");
        assert_eq!(format_grouped(978), "978");
        assert_eq!(format_grouped(7017), "7_017");
        assert_eq!(format_grouped(55_128_905), "55_128_905");
        assert_eq!(format_grouped(-1_928_854_574), "-1_928_854_574");
        assert_eq!(format_grouped(i32::MIN), "-2_147_483_648");
    }
}
