use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::models::Batch;

const GENERATED_PREFIX: &str = "# Generated at: ";
const EXPIRES_PREFIX: &str = "# Expires: ";
const COUNT_PREFIX: &str = "# Count: ";

/// Write a batch to `path`: three comment lines of metadata, a blank
/// line, then one key per line. Written to a temp file under an
/// exclusive lock and renamed into place.
pub fn write_batch(path: &Path, batch: &Batch) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid export path: {}", path.display()))?;
    let temp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let mut file =
        File::create(&temp_path).context("Failed to create temporary export file")?;

    file.lock_exclusive()
        .context("Failed to acquire lock on export file")?;

    writeln!(
        file,
        "{GENERATED_PREFIX}{}",
        batch.generated_at.strftime("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "{EXPIRES_PREFIX}{}", batch.expires)?;
    writeln!(file, "{COUNT_PREFIX}{}", batch.count)?;
    writeln!(file)?;

    for key in &batch.keys {
        writeln!(file, "{key}")?;
    }

    file.sync_all().context("Failed to sync export file")?;
    file.unlock().context("Failed to unlock export file")?;

    fs::rename(&temp_path, path).context("Failed to rename export file")?;

    Ok(())
}

/// An export file read back leniently: header fields are `None` when
/// missing or unparseable so `check` can report on them instead of
/// bailing at the first defect.
#[derive(Debug, Default)]
pub struct ExportFile {
    pub generated_at: Option<String>,
    pub expires: Option<String>,
    pub declared_count: Option<usize>,
    pub has_blank_separator: bool,
    pub keys: Vec<String>,
}

pub fn read_export(path: &Path) -> Result<ExportFile> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open export file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut export = ExportFile::default();
    let mut in_header = true;

    for line in reader.lines() {
        let line = line.context("Failed to read line from export file")?;

        if in_header {
            if let Some(value) = line.strip_prefix(GENERATED_PREFIX) {
                export.generated_at = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = line.strip_prefix(EXPIRES_PREFIX) {
                export.expires = Some(value.trim().to_string());
                continue;
            }
            if let Some(value) = line.strip_prefix(COUNT_PREFIX) {
                export.declared_count = value.trim().parse().ok();
                continue;
            }
            if line.trim().is_empty() {
                export.has_blank_separator = true;
                in_header = false;
                continue;
            }
            // Not a known header line and not blank: header is over.
            in_header = false;
        }

        if !line.trim().is_empty() {
            export.keys.push(line.trim().to_string());
        }
    }

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::CharClass;
    use crate::models::BatchOptions;

    fn sample_batch() -> Batch {
        Batch::new(
            vec![
                "ABCDE-FGHJK-MNPQR-TUVWX-Y3467".to_string(),
                "AAAAA-BBBBB-CCCCC-DDDDD-EEEEE".to_string(),
            ],
            "2027-01-31".parse().unwrap(),
            BatchOptions {
                classes: vec![CharClass::Uppercase, CharClass::Digits],
                exclude_similar: true,
            },
        )
    }

    #[test]
    fn test_export_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");

        write_batch(&path, &sample_batch()).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert!(lines[0].starts_with("# Generated at: "));
        assert_eq!(lines[1], "# Expires: 2027-01-31");
        assert_eq!(lines[2], "# Count: 2");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "ABCDE-FGHJK-MNPQR-TUVWX-Y3467");
        assert_eq!(lines[5], "AAAAA-BBBBB-CCCCC-DDDDD-EEEEE");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");

        write_batch(&path, &sample_batch()).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("keys.txt.tmp").exists());
    }

    #[test]
    fn test_read_back_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");
        let batch = sample_batch();

        write_batch(&path, &batch).unwrap();
        let export = read_export(&path).unwrap();

        assert_eq!(export.expires.as_deref(), Some("2027-01-31"));
        assert_eq!(export.declared_count, Some(2));
        assert!(export.has_blank_separator);
        assert!(export.generated_at.is_some());
        assert_eq!(export.keys, batch.keys);
    }

    #[test]
    fn test_read_file_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.txt");
        fs::write(&path, "ABCDE-FGHJK-MNPQR-TUVWX-Y3467\n").unwrap();

        let export = read_export(&path).unwrap();
        assert!(export.generated_at.is_none());
        assert!(export.declared_count.is_none());
        assert!(!export.has_blank_separator);
        assert_eq!(export.keys.len(), 1);
    }
}
