//! File I/O for record logs and emitted documents.
//!
//! Reading is fail-fast: any line of a JSONL log that does not parse as a
//! record aborts the whole read with its 1-based line number. A partially
//! parsed chain is never handed to the verifier — there is no
//! partial-chain tolerance.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use rpx_contracts::{
    error::{RpxError, RpxResult},
    record::RpxRecord,
};

/// Read a single record from a JSON file.
pub fn read_record(path: &Path) -> RpxResult<RpxRecord> {
    let contents = fs::read_to_string(path).map_err(|e| RpxError::LogRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&contents).map_err(|e| RpxError::LogParse {
        path: path.display().to_string(),
        line: 1,
        reason: e.to_string(),
    })
}

/// Read an ordered record sequence from a JSONL file (one JSON object per
/// line). Blank lines are skipped; any unparsable line is fatal.
pub fn read_records_jsonl(path: &Path) -> RpxResult<Vec<RpxRecord>> {
    let contents = fs::read_to_string(path).map_err(|e| RpxError::LogRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut records = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: RpxRecord = serde_json::from_str(line).map_err(|e| RpxError::LogParse {
            path: path.display().to_string(),
            line: index + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }

    debug!(path = %path.display(), record_count = records.len(), "record log read");
    Ok(records)
}

/// Write a document as pretty-printed JSON, creating parent directories
/// as needed.
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> RpxResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RpxError::DocumentWrite {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
    }

    let json = serde_json::to_string_pretty(document).map_err(|e| RpxError::DocumentWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    fs::write(path, format!("{json}\n")).map_err(|e| RpxError::DocumentWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
