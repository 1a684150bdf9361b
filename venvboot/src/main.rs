use anyhow::Result;

fn main() -> Result<()> {
    let code = venvboot::run_cli()?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
