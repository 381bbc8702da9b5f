use anyhow::{Context, Result};
use isoenum_codec::{decode, encode, ShortCode};
use serde_json::json;

use crate::{print_stdout, DecodeArgs, EncodeArgs};

pub(crate) fn run_encode(args: EncodeArgs) -> Result<()> {
    let code = ShortCode::from_parts(&args.alpha3, args.alpha2.as_deref(), args.numeric)?;
    let value = encode(args.domain, &code)?;
    print_stdout(&value.to_string())
}

pub(crate) fn run_decode(args: DecodeArgs) -> Result<()> {
    let value: i32 = args
        .value
        .replace('_', "")
        .parse()
        .with_context(|| format!("{:?} is not a 32-bit integer", args.value))?;
    let code = decode(args.domain, value)?;

    if args.json {
        let body = json!({
            "domain": args.domain,
            "value": value,
            "alpha3": code.alpha3(),
            "alpha2": code.alpha2(),
            "numeric": code.numeric(),
        });
        print_stdout(&serde_json::to_string_pretty(&body)?)
    } else {
        print_stdout(&code.to_string())
    }
}
