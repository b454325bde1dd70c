use std::io::ErrorKind;
use std::path::Path;

use crate::error::StorageError;

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    if source.kind() == ErrorKind::NotFound {
        StorageError::NotFound {
            key: key.to_string(),
        }
    } else {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Read an object's bytes.
pub async fn get_object(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    tracing::debug!(key, "get object");
    tokio::fs::read(root.join(key))
        .await
        .map_err(|e| io_error(key, e))
}

/// Write an object, creating parent directories as needed.
///
/// Writes to a sibling temp file and renames it into place, so readers see
/// either the old or the new body, never a partial one.
pub async fn put_object(root: &Path, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
    tracing::debug!(key, bytes = body.len(), "put object");
    let path = root.join(key);
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(key, e))?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body)
        .await
        .map_err(|e| io_error(key, e))?;
    tokio::fs::rename(&tmp, &path)
        .await
        .map_err(|e| io_error(key, e))
}

/// Delete an object. Deleting a missing object succeeds.
pub async fn delete_object(root: &Path, key: &str) -> Result<(), StorageError> {
    tracing::debug!(key, "delete object");
    match tokio::fs::remove_file(root.join(key)).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(key, e)),
        _ => Ok(()),
    }
}

/// List the `.json` object keys directly under a `dir/`-style prefix,
/// sorted. A missing prefix lists as empty.
pub async fn list_objects(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let mut entries = match tokio::fs::read_dir(root.join(prefix)).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error(prefix, e)),
    };

    let mut keys = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(prefix, e))? {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(".json") {
            keys.push(format!("{prefix}{name}"));
        }
    }
    keys.sort();
    Ok(keys)
}

/// Remove everything under a prefix. A missing prefix succeeds.
pub async fn delete_prefix(root: &Path, prefix: &str) -> Result<(), StorageError> {
    tracing::debug!(prefix, "delete prefix");
    match tokio::fs::remove_dir_all(root.join(prefix)).await {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(io_error(prefix, e)),
        _ => Ok(()),
    }
}
