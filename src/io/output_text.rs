use crate::gene::BatchReport;
use anyhow::{Context, Result};
use std::io::Write;

fn flag(tag: bool) -> &'static str {
    if tag {
        "yes"
    } else {
        "no"
    }
}

/// Writes a batch report as tab-separated text: one row per classified
/// record, then a labelled `#skipped` section giving each skipped record's
/// batch index and source line (`-` when unknown).
pub fn write_classifications<W: Write>(writer: &mut W, report: &BatchReport) -> Result<()> {
    writeln!(writer, "name\tspecies\tlength\tratio\tband\tspecies_match\tlength_match\texpression_match")
        .context("Failed to write text header")?;

    for c in &report.classified {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.4}\t{}\t{}\t{}\t{}",
            c.name,
            c.species,
            c.length,
            c.composition.ratio,
            c.composition.band,
            flag(c.tags.species),
            flag(c.tags.length),
            flag(c.tags.expression)
        )
        .with_context(|| format!("Failed to write classification for '{}'", c.name))?;
    }

    if !report.skipped.is_empty() {
        writeln!(writer, "#skipped\tindex\tline\tname\treason").context("Failed to write skipped header")?;
    }
    for s in &report.skipped {
        let line = s.line.map_or_else(|| "-".to_string(), |l| l.to_string());
        writeln!(writer, "#skipped\t{}\t{}\t{}\t{}", s.index, line, s.name, s.reason)
            .with_context(|| format!("Failed to write skipped record '{}'", s.name))?;
    }

    Ok(())
}
