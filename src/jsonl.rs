// JSONL seed file loading

use crate::models::Task;
use eyre::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Read every record from a JSONL file in file order
///
/// Blank lines are skipped. Lines that fail to read or parse are logged and
/// skipped so one bad record doesn't discard the rest.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("Failed to open JSONL file {:?}", path))?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to read line, skipping"
                );
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    file = ?path,
                    line = line_num + 1,
                    error = ?e,
                    "Failed to parse JSON, skipping"
                );
            }
        }
    }

    info!(file = ?path, count = records.len(), "Loaded records from JSONL");

    Ok(records)
}

/// Load tasks from a JSONL seed file
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    read_jsonl(path).wrap_err("Failed to load tasks")
}
