use anyhow::Result;

fn main() -> Result<()> {
    isoenum_cli::main_entry()
}
