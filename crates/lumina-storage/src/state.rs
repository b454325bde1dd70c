use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::objects;

/// Load a JSON record.
pub async fn load_json<T: DeserializeOwned>(root: &Path, key: &str) -> Result<T, StorageError> {
    let body = objects::get_object(root, key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Load a JSON record, `None` when it does not exist.
pub async fn load_json_opt<T: DeserializeOwned>(
    root: &Path,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load_json(root, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a JSON record.
pub async fn save_json<T: Serialize>(
    root: &Path,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    objects::put_object(root, key, body).await
}
