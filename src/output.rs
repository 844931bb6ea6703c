use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::commands::alphabet::AlphabetPreview;
use crate::commands::check::CheckReport;
use crate::models::Batch;

/// Print as JSON if `json` is true, otherwise call `human` with a writer.
fn json_or<T: Serialize + ?Sized>(
    value: &T,
    json: bool,
    human: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, value)?;
        writeln!(stdout)?;
    } else {
        human(&mut stdout)?;
    }
    Ok(())
}

// -- Generate outputs --

pub fn batch_generated(
    batch: &Batch,
    exported_to: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        let mut w = io::stdout().lock();
        for key in &batch.keys {
            writeln!(w, "{key}")?;
        }
        return Ok(());
    }

    json_or(batch, json, |w| {
        writeln!(
            w,
            "{} {}",
            style("Generated").green(),
            style(format!("{} key(s)", batch.count)).cyan().bold()
        )?;
        writeln!(w, "  Expires: {}", style(&batch.expires).yellow())?;
        let classes: Vec<&str> = batch.options.classes.iter().map(|c| c.label()).collect();
        writeln!(w, "  Classes: {}", classes.join(", "))?;
        if batch.options.exclude_similar {
            writeln!(w, "  Similar characters excluded")?;
        }
        writeln!(w)?;

        for key in &batch.keys {
            writeln!(w, "{key}")?;
        }

        if let Some(path) = exported_to {
            writeln!(w)?;
            writeln!(
                w,
                "{} {}",
                style("Exported to:").green(),
                style(path.display()).cyan()
            )?;
        }
        Ok(())
    })
}

// -- Alphabet outputs --

pub fn alphabet_preview(preview: &AlphabetPreview, json: bool) -> Result<()> {
    json_or(preview, json, |w| {
        let classes: Vec<&str> = preview.classes.iter().map(|c| c.label()).collect();
        writeln!(w, "Classes: {}", classes.join(", "))?;
        if preview.removed.is_empty() {
            writeln!(w, "Removed: {}", style("(none)").dim())?;
        } else {
            let removed: String = preview.removed.iter().collect();
            writeln!(w, "Removed: {}", style(removed).red())?;
        }
        writeln!(
            w,
            "Alphabet: {} ({} characters)",
            style(&preview.chars).cyan().bold(),
            preview.size
        )?;
        writeln!(w, "Key capacity: {}", style(format!("{:.2e}", preview.capacity)).dim())?;
        Ok(())
    })
}

// -- Check outputs --

pub fn check_report(report: &CheckReport, json: bool) -> Result<()> {
    json_or(report, json, |w| {
        writeln!(
            w,
            "Checked: {} ({} key(s))",
            style(&report.path).cyan().bold(),
            report.key_count
        )?;

        if report.is_ok() {
            writeln!(w, "{}", style("OK").green().bold())?;
            return Ok(());
        }

        writeln!(w, "{}", style("Problems:").red().bold())?;
        for problem in &report.problems {
            writeln!(w, "  - {problem}")?;
        }
        Ok(())
    })
}
