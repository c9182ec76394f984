use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CommonError;
use crate::error::Result;

pub const ENV_PREFIX: &str = "COFFEE";
pub const ENV_SEPARATOR: &str = "__";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Generation {
    pub random_seed: u64,
    pub num_customers: usize,
    pub overall_start: NaiveDate,
    /// Defaults to the current date when unset.
    pub overall_end: Option<NaiveDate>,
    pub low_start: NaiveDate,
    pub low_end: NaiveDate,
    pub lambda_high: f64,
    pub lambda_low: f64,
    pub customer_share: f64,
    pub store_weights: Vec<f64>,
}

impl Default for Generation {
    fn default() -> Self {
        Generation {
            random_seed: 42,
            num_customers: 500,
            overall_start: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            overall_end: None,
            low_start: NaiveDate::from_ymd_opt(2022, 2, 25).unwrap(),
            low_end: NaiveDate::from_ymd_opt(2022, 5, 31).unwrap(),
            lambda_high: 10.,
            lambda_low: 3.,
            customer_share: 0.15,
            store_weights: vec![0.3, 0.2, 0.25, 0.15, 0.1],
        }
    }
}

impl Generation {
    pub fn validate(&self) -> Result<()> {
        if self.num_customers == 0 {
            return Err(CommonError::BadRequest(
                "num_customers must be positive".to_string(),
            ));
        }
        if self.lambda_high <= 0. || self.lambda_low <= 0. {
            return Err(CommonError::BadRequest(format!(
                "lambdas must be positive, got high {} low {}",
                self.lambda_high, self.lambda_low
            )));
        }
        if !(0. ..=1.).contains(&self.customer_share) {
            return Err(CommonError::BadRequest(format!(
                "customer_share must be within [0, 1], got {}",
                self.customer_share
            )));
        }
        if self.store_weights.is_empty() {
            return Err(CommonError::BadRequest(
                "store_weights must not be empty".to_string(),
            ));
        }
        if self.store_weights.iter().any(|w| *w < 0.) {
            return Err(CommonError::BadRequest(
                "store_weights must not be negative".to_string(),
            ));
        }
        let sum: f64 = self.store_weights.iter().sum();
        if (sum - 1.).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(CommonError::BadRequest(format!(
                "store_weights must sum to 1, got {sum}"
            )));
        }
        if let Some(end) = self.overall_end {
            if end < self.overall_start {
                return Err(CommonError::BadRequest(format!(
                    "overall_end {} is before overall_start {}",
                    end, self.overall_start
                )));
            }
        }
        if self.low_end < self.low_start {
            return Err(CommonError::BadRequest(format!(
                "low_end {} is before low_start {}",
                self.low_end, self.low_start
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Export {
    pub local_folder: PathBuf,
    pub bucket: Option<String>,
    pub gcs_prefix: String,
    /// Path to a service account key file. When unset, ambient credentials
    /// are picked up from the environment.
    pub service_account_key: Option<PathBuf>,
}

impl Default for Export {
    fn default() -> Self {
        Export {
            local_folder: PathBuf::from("data_output"),
            bucket: None,
            gcs_prefix: "csv_sources/".to_string(),
            service_account_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Warehouse {
    pub project_id: Option<String>,
    pub dataset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Jobs {
    pub project_id: Option<String>,
    pub job_name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: SocketAddr,
}

impl Default for Server {
    fn default() -> Self {
        Server {
            host: SocketAddr::from_str("0.0.0.0:8080").unwrap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: Generation,
    pub export: Export,
    pub warehouse: Warehouse,
    pub jobs: Jobs,
    pub server: Server,
}

impl Config {
    /// Loads configuration from an optional file, layered under `COFFEE__*`
    /// environment variables. Missing keys fall back to defaults.
    pub fn load(file: Option<&Path>) -> Result<Config> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file));
        }
        let raw = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("generation.store_weights"),
            )
            .build()?;

        let cfg: Config = raw.try_deserialize()?;
        cfg.generation.validate()?;

        Ok(cfg)
    }
}
