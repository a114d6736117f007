use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes any serializable result to `path` as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize JSON to {}", path.display()))?;
    writeln!(writer).context("Failed to write to file")?;
    writer.flush().context("Failed to flush JSON output")?;

    info!("Wrote JSON output to {}", path.display());
    Ok(())
}

/// Renders a result as a pretty JSON string, for stdout.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize result to JSON")
}
