use std::result;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;

pub type Result<T> = result::Result<T, CloudError>;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("bad request: {0:?}")]
    BadRequest(String),
    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("load job for {file} into {table} failed: {message}")]
    LoadJob {
        file: String,
        table: String,
        message: String,
    },
    #[error("reqwest: {0:?}")]
    Reqwest(#[from] reqwest::Error),
    #[error("serde: {0:?}")]
    Serde(#[from] serde_json::Error),
    #[error("StdIO: {0:?}")]
    StdIO(#[from] std::io::Error),
    #[error("other: {0:?}")]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for CloudError {
    fn into_response(self) -> Response {
        let status = match &self {
            CloudError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
