use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::export;
use crate::sampler::is_well_formed;

/// Outcome of re-reading an export file.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub declared_count: Option<usize>,
    pub key_count: usize,
    pub problems: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn run(file: &Path) -> Result<CheckReport> {
    let export = export::read_export(file)?;
    let mut problems = Vec::new();

    if export.generated_at.is_none() {
        problems.push("missing '# Generated at:' header line".to_string());
    }
    if export.expires.is_none() {
        problems.push("missing '# Expires:' header line".to_string());
    }
    if let Some(expires) = &export.expires {
        if expires.parse::<jiff::civil::Date>().is_err() {
            problems.push(format!("expiry date is not an ISO date: {expires}"));
        }
    }
    match export.declared_count {
        None => problems.push("missing or unreadable '# Count:' header line".to_string()),
        Some(declared) if declared != export.keys.len() => {
            problems.push(format!(
                "header declares {declared} keys but the file has {}",
                export.keys.len()
            ));
        }
        Some(_) => {}
    }
    if !export.has_blank_separator {
        problems.push("missing blank line between header and keys".to_string());
    }

    let mut seen = HashSet::new();
    let mut duplicates = 0usize;
    let mut malformed = 0usize;
    for key in &export.keys {
        if !is_well_formed(key) {
            malformed += 1;
            if malformed <= 3 {
                problems.push(format!("malformed key: {key}"));
            }
        }
        if !seen.insert(key.as_str()) {
            duplicates += 1;
        }
    }
    if malformed > 3 {
        problems.push(format!("...and {} more malformed keys", malformed - 3));
    }
    if duplicates > 0 {
        problems.push(format!("{duplicates} duplicate key(s)"));
    }
    if export.keys.is_empty() {
        problems.push("file contains no keys".to_string());
    }

    Ok(CheckReport {
        path: file.display().to_string(),
        declared_count: export.declared_count,
        key_count: export.keys.len(),
        problems,
    })
}
