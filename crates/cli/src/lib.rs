use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use isoenum_codec::Domain;
use std::io;
use std::path::PathBuf;

mod codes;
mod emit;
mod generate;

pub use emit::render_enum;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "isoenum")]
#[command(about = "Stable enumerations for ISO currency, language and country codes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate enum listings and snapshots from catalog exports
    Generate(GenerateArgs),

    /// Pack a short code into its enum value
    Encode(EncodeArgs),

    /// Recover the short code of an enum value
    Decode(DecodeArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Directory holding `<domain>.json` catalog exports
    #[arg(long)]
    catalog_dir: PathBuf,

    /// Directory receiving `<domain>.rs` and `<domain>.snapshot.json`
    #[arg(long)]
    out_dir: PathBuf,

    /// Configuration file layered over the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Limit generation to these domains (default: all)
    #[arg(long = "domain", value_parser = parse_domain)]
    domains: Vec<Domain>,

    /// Also write `<domain>.changelog.md`
    #[arg(long)]
    changelog: bool,
}

#[derive(Args)]
struct EncodeArgs {
    #[arg(long, value_parser = parse_domain)]
    domain: Domain,

    /// Three-letter code
    alpha3: String,

    /// Two-letter code (language, country)
    #[arg(long)]
    alpha2: Option<String>,

    /// Numeric code (currency)
    #[arg(long)]
    numeric: Option<u32>,
}

#[derive(Args)]
struct DecodeArgs {
    #[arg(long, value_parser = parse_domain)]
    domain: Domain,

    /// Enum value; `_` digit separators are accepted
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn parse_domain(raw: &str) -> std::result::Result<Domain, String> {
    raw.parse::<Domain>().map_err(|err| err.to_string())
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Generate(args) => generate::run_generate(args)?,
        Commands::Encode(args) => codes::run_encode(args)?,
        Commands::Decode(args) => codes::run_decode(args)?,
    }

    Ok(())
}
