use std::result;

use cloud::error::CloudError;
use common::error::CommonError;
use dataset_gen::error::DatasetGenError;
use exporter::error::ExporterError;
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("common: {0:?}")]
    Common(#[from] CommonError),
    #[error("dataset gen: {0:?}")]
    DatasetGen(#[from] DatasetGenError),
    #[error("exporter: {0:?}")]
    Exporter(#[from] ExporterError),
    #[error("cloud: {0:?}")]
    Cloud(#[from] CloudError),
    #[error("other: {0:?}")]
    Other(#[from] anyhow::Error),
}
