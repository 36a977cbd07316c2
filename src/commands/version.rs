use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("glance-panel version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
