use chrono::Duration;
use chrono::NaiveDate;
use enum_iterator::all;
use enum_iterator::Sequence;
use rand::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::Display;
use tracing::info;

use crate::error::DatasetGenError;
use crate::error::Result;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, Sequence, Serialize)]
pub enum DiscountTier {
    None,
    #[strum(serialize = "3%")]
    #[serde(rename = "3%")]
    ThreePercent,
    #[strum(serialize = "5%")]
    #[serde(rename = "5%")]
    FivePercent,
    #[strum(serialize = "7%")]
    #[serde(rename = "7%")]
    SevenPercent,
    #[strum(serialize = "10%")]
    #[serde(rename = "10%")]
    TenPercent,
}

impl DiscountTier {
    pub fn rate(&self) -> Decimal {
        match self {
            DiscountTier::None => Decimal::ZERO,
            DiscountTier::ThreePercent => Decimal::new(3, 2),
            DiscountTier::FivePercent => Decimal::new(5, 2),
            DiscountTier::SevenPercent => Decimal::new(7, 2),
            DiscountTier::TenPercent => Decimal::new(10, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    pub customer_id: String,
    pub level_of_discount: DiscountTier,
    pub registration_date: NaiveDate,
}

/// Customer ids are sequential from 1. Discount tiers are drawn uniformly
/// and registration dates uniformly within the inclusive window.
pub fn generate_customers<R: Rng>(
    rng: &mut R,
    count: usize,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<Customer> {
    let tiers = all::<DiscountTier>().collect::<Vec<_>>();
    let reg_days = (to - from).num_days();

    let customers = (1..=count)
        .map(|id| Customer {
            customer_id: id.to_string(),
            level_of_discount: *tiers.choose(rng).unwrap(),
            registration_date: from + Duration::days(rng.gen_range(0..=reg_days)),
        })
        .collect::<Vec<_>>();

    info!("generated customers table with {} entries", customers.len());

    customers
}

pub struct CustomerProvider {
    pub customers: Vec<Customer>,
}

impl CustomerProvider {
    pub fn try_new(customers: Vec<Customer>) -> Result<Self> {
        if customers.is_empty() {
            return Err(DatasetGenError::General(
                "customers table is empty".to_string(),
            ));
        }
        Ok(Self { customers })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Customer {
        self.customers.choose(rng).unwrap()
    }
}
