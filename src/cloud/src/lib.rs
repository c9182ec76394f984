pub mod bigquery;
pub mod error;
pub mod http;
pub mod run_jobs;
pub mod token;

pub use error::CloudError;
pub use error::Result;
