use anyhow::{Context, Result};
use mcu_bench::inspect::inspect_file;
use std::path::Path;

/// Print the key structure of a results file
pub fn handle_inspect(file: &Path) -> Result<()> {
    let structure = inspect_file(file)
        .with_context(|| format!("Failed to inspect {}", file.display()))?;

    println!("Structure of '{}':", file.display());
    println!("{}", structure);
    Ok(())
}
