pub mod config;
pub mod error;
pub mod types;

pub use types::MONEY_SCALE;
