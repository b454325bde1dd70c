use thiserror::Error;

use crate::models::category::Category;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("category score set is empty")]
    EmptyCategories,

    #[error("category score set is missing '{0}'")]
    MissingCategory(Category),

    #[error("score {value} for '{category}' is outside [0, 100]")]
    ScoreOutOfRange { category: Category, value: u8 },

    #[error("phase {0} is outside the protocol range [1, 6]")]
    InvalidPhase(i64),
}
