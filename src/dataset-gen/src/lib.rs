pub mod error;
pub mod generator;
pub mod shop;

use chrono::Utc;
use common::config::Generation;
use rand::Rng;

use crate::error::DatasetGenError;
use crate::error::Result;
use crate::generator::Generator;
use crate::shop::customers;
use crate::shop::customers::Customer;
use crate::shop::customers::CustomerProvider;
use crate::shop::products;
use crate::shop::products::Product;
use crate::shop::products::ProductProvider;
use crate::shop::scenario;
use crate::shop::scenario::Order;
use crate::shop::scenario::OrderDetail;
use crate::shop::scenario::Scenario;
use crate::shop::stores;
use crate::shop::stores::Store;
use crate::shop::stores::StoreProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub orders: Vec<Order>,
    pub order_details: Vec<OrderDetail>,
}

/// Generates the five tables. The same config and rng state always produce
/// the same dataset.
pub fn generate<R: Rng>(cfg: &Generation, rng: &mut R) -> Result<Dataset> {
    cfg.validate()?;

    let to = cfg.overall_end.unwrap_or_else(|| Utc::now().date_naive());
    if to < cfg.overall_start {
        return Err(DatasetGenError::General(format!(
            "overall_end {} is before overall_start {}",
            to, cfg.overall_start
        )));
    }

    let customers = customers::generate_customers(rng, cfg.num_customers, cfg.overall_start, to);
    let products = products::generate_products();
    let stores = stores::generate_stores();

    let gen = Generator::try_new(generator::Config {
        from: cfg.overall_start,
        to,
        low_from: cfg.low_start,
        low_to: cfg.low_end,
        lambda_high: cfg.lambda_high,
        lambda_low: cfg.lambda_low,
    })?;

    let mut scenario = Scenario::try_new(scenario::Config {
        gen,
        customers: CustomerProvider::try_new(customers.clone())?,
        products: ProductProvider::try_new(products.clone())?,
        stores: StoreProvider::try_new(stores.clone(), cfg.store_weights.clone())?,
        customer_share: cfg.customer_share,
    })?;
    let (orders, order_details) = scenario.run(rng)?;

    Ok(Dataset {
        customers,
        products,
        stores,
        orders,
        order_details,
    })
}
