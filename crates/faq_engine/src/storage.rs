use crate::error::{FaqError, Result};
use crate::model::FaqRecord;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub fn save_catalog_jsonl(path: &Path, records: &[FaqRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for record in records {
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    tracing::debug!(path = %path.display(), records = records.len(), "catalog saved");
    Ok(())
}

pub fn load_catalog_jsonl(path: &Path) -> Result<Vec<FaqRecord>> {
    let file = File::open(path)?;
    let records = parse_catalog_jsonl(BufReader::new(file))?;
    tracing::debug!(path = %path.display(), records = records.len(), "catalog loaded");
    Ok(records)
}

/// Parses one record per line, skipping blank lines. Line numbers in errors
/// are 1-based.
pub fn parse_catalog_jsonl<R: BufRead>(reader: R) -> Result<Vec<FaqRecord>> {
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FaqRecord = serde_json::from_str(&line).map_err(|source| FaqError::Json {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}
