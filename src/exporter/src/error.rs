use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, ExporterError>;

#[derive(Error, Debug)]
pub enum ExporterError {
    #[error("bad request: {0:?}")]
    BadRequest(String),
    #[error("CSVError: {0:?}")]
    CSVError(#[from] csv::Error),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("ObjectStore: {0:?}")]
    ObjectStore(#[from] object_store::Error),
}
