use std::result;

use common::error::CommonError;
use thiserror::Error;

pub type Result<T> = result::Result<T, DatasetGenError>;

#[derive(Error, Debug)]
pub enum DatasetGenError {
    #[error("Internal: {0:?}")]
    Internal(String),
    #[error("General: {0:?}")]
    General(String),
    #[error("CommonError: {0:?}")]
    CommonError(#[from] CommonError),
    #[error("Other: {0:?}")]
    AnyhowError(#[from] anyhow::Error),
}
