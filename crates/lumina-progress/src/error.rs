use lumina_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error(transparent)]
    InvalidPhase(#[from] CoreError),
}
