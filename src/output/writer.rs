//! JSON file writer

use super::records::prepare_records;
use crate::error::{Error, Result};
use crate::types::{Collection, Record};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::{Path, PathBuf};
use tracing::info;

/// Serialize with four-space indentation
pub fn to_json_string<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Other(format!("serialized JSON is not UTF-8: {e}")))
}

/// Write `data` as indented JSON to `path`, creating parent directories
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let json = to_json_string(data)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::output(parent.display().to_string(), e.to_string()))?;
    }

    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::output(path.display().to_string(), e.to_string()))
}

/// Tag and write one collection to `<dir>/<collection file name>`
pub async fn save_collection(
    dir: &Path,
    collection: Collection,
    records: Vec<Record>,
) -> Result<PathBuf> {
    let path = dir.join(collection.file_name());
    let count = records.len();
    let stored = prepare_records(records);
    write_json(&path, &stored).await?;
    info!("Wrote {count} {collection} to {}", path.display());
    Ok(path)
}
