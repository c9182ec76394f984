use chrono::NaiveDate;
use common::MONEY_SCALE;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::Display;
use tracing::info;

use crate::error::DatasetGenError;
use crate::error::Result;
use crate::generator::Generator;
use crate::shop::customers::CustomerProvider;
use crate::shop::products::ProductProvider;
use crate::shop::stores::StoreProvider;

const ITEM_COUNT_CHOICES: [usize; 5] = [1, 2, 3, 4, 5];
const ITEM_COUNT_WEIGHTS: [f64; 5] = [0.4, 0.3, 0.2, 0.07, 0.03];
const QUANTITY_CHOICES: [u32; 3] = [1, 2, 3];
const QUANTITY_WEIGHTS: [f64; 3] = [0.8, 0.15, 0.05];

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, Serialize)]
pub enum OrderType {
    #[strum(serialize = "In-store")]
    #[serde(rename = "In-store")]
    InStore,
    Takeaway,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub order_id: u64,
    pub order_date: NaiveDate,
    pub order_type: OrderType,
    /// Empty for anonymous walk-ins.
    pub customer_id: Option<String>,
    pub store_id: u64,
    pub sub_total: Decimal,
    pub total_amount: Decimal,
    pub discount_applied: bool,
    pub discount_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderDetail {
    pub order_detail_id: u64,
    pub order_id: u64,
    pub product_id: u64,
    pub quantity: u32,
}

pub struct Config {
    pub gen: Generator,
    pub customers: CustomerProvider,
    pub products: ProductProvider,
    pub stores: StoreProvider,
    /// Probability that an order is attributed to a registered customer.
    pub customer_share: f64,
}

/// Assembles orders and their line items day by day. Order and order detail
/// ids are sequential from 1 across the whole run.
pub struct Scenario {
    gen: Generator,
    customers: CustomerProvider,
    products: ProductProvider,
    stores: StoreProvider,
    customer_share: f64,
    item_count_idx: WeightedIndex<f64>,
    quantity_idx: WeightedIndex<f64>,
    next_order_id: u64,
    next_order_detail_id: u64,
}

impl Scenario {
    pub fn try_new(cfg: Config) -> Result<Self> {
        if !(0. ..=1.).contains(&cfg.customer_share) {
            return Err(DatasetGenError::General(format!(
                "customer share must be within [0, 1], got {}",
                cfg.customer_share
            )));
        }

        Ok(Self {
            gen: cfg.gen,
            customers: cfg.customers,
            products: cfg.products,
            stores: cfg.stores,
            customer_share: cfg.customer_share,
            item_count_idx: WeightedIndex::new(ITEM_COUNT_WEIGHTS).unwrap(),
            quantity_idx: WeightedIndex::new(QUANTITY_WEIGHTS).unwrap(),
            next_order_id: 1,
            next_order_detail_id: 1,
        })
    }

    pub fn run<R: Rng>(&mut self, rng: &mut R) -> Result<(Vec<Order>, Vec<OrderDetail>)> {
        let mut orders = Vec::new();
        let mut order_details = Vec::new();

        while let Some(sample) = self.gen.next_day(rng) {
            for _ in 0..sample.orders {
                orders.push(self.next_order(rng, sample.day, &mut order_details));
            }
        }

        info!("generated orders table with {} entries", orders.len());
        info!(
            "generated order details table with {} entries",
            order_details.len()
        );

        Ok((orders, order_details))
    }

    fn next_order<R: Rng>(
        &mut self,
        rng: &mut R,
        day: NaiveDate,
        order_details: &mut Vec<OrderDetail>,
    ) -> Order {
        let order_id = self.next_order_id;
        self.next_order_id += 1;

        let order_type = if rng.gen::<bool>() {
            OrderType::InStore
        } else {
            OrderType::Takeaway
        };
        let customer = if rng.gen::<f64>() < self.customer_share {
            Some(self.customers.sample(rng))
        } else {
            None
        };
        let store_id = self.stores.sample(rng).store_id;

        let num_items = ITEM_COUNT_CHOICES[self.item_count_idx.sample(rng)];
        let mut sub_total = Decimal::ZERO;
        for _ in 0..num_items {
            let product = self.products.sample(rng);
            let quantity = QUANTITY_CHOICES[self.quantity_idx.sample(rng)];
            sub_total += product.price * Decimal::from(quantity);

            order_details.push(OrderDetail {
                order_detail_id: self.next_order_detail_id,
                order_id,
                product_id: product.product_id,
                quantity,
            });
            self.next_order_detail_id += 1;
        }

        let rate = customer
            .map(|c| c.level_of_discount.rate())
            .unwrap_or(Decimal::ZERO);
        let discount_amount = (sub_total * rate).round_dp(MONEY_SCALE);

        Order {
            order_id,
            order_date: day,
            order_type,
            customer_id: customer.map(|c| c.customer_id.clone()),
            store_id,
            sub_total: sub_total.round_dp(MONEY_SCALE),
            total_amount: (sub_total - discount_amount).round_dp(MONEY_SCALE),
            discount_applied: !rate.is_zero(),
            discount_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::generator;
    use crate::shop::customers::generate_customers;
    use crate::shop::products::generate_products;
    use crate::shop::stores::generate_stores;

    const STORE_WEIGHTS: [f64; 5] = [0.3, 0.2, 0.25, 0.15, 0.1];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run_scenario(seed: u64, customer_share: f64) -> (Vec<Order>, Vec<OrderDetail>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let from = date(2022, 1, 1);
        let to = date(2022, 6, 30);
        let customers = generate_customers(&mut rng, 100, from, to);

        let gen = Generator::try_new(generator::Config {
            from,
            to,
            low_from: date(2022, 2, 1),
            low_to: date(2022, 2, 28),
            lambda_high: 10.,
            lambda_low: 3.,
        })
        .unwrap();

        let mut scenario = Scenario::try_new(Config {
            gen,
            customers: CustomerProvider::try_new(customers).unwrap(),
            products: ProductProvider::try_new(generate_products()).unwrap(),
            stores: StoreProvider::try_new(generate_stores(), STORE_WEIGHTS.to_vec()).unwrap(),
            customer_share,
        })
        .unwrap();

        scenario.run(&mut rng).unwrap()
    }

    #[test]
    fn test_order_totals_are_consistent() {
        let (orders, _) = run_scenario(42, 0.15);
        assert!(!orders.is_empty());

        for order in &orders {
            assert!(order.sub_total > Decimal::ZERO);
            assert_eq!(
                order.total_amount,
                (order.sub_total - order.discount_amount).round_dp(MONEY_SCALE)
            );
            assert_eq!(order.discount_applied, order.discount_amount > Decimal::ZERO);
        }
    }

    #[test]
    fn test_discount_only_for_attributed_orders() {
        let (orders, _) = run_scenario(42, 0.15);
        for order in &orders {
            if order.customer_id.is_none() {
                assert!(!order.discount_applied);
                assert_eq!(order.discount_amount, Decimal::ZERO);
                assert_eq!(order.total_amount, order.sub_total);
            }
            if order.discount_applied {
                assert!(order.customer_id.is_some());
            }
        }
    }

    #[test]
    fn test_referential_integrity() {
        let (orders, details) = run_scenario(42, 0.15);

        let order_ids = orders.iter().map(|o| o.order_id).collect::<HashSet<_>>();
        let product_ids = generate_products()
            .iter()
            .map(|p| p.product_id)
            .collect::<HashSet<_>>();
        let store_ids = generate_stores()
            .iter()
            .map(|s| s.store_id)
            .collect::<HashSet<_>>();

        let mut per_order = HashMap::new();
        for detail in &details {
            assert!(order_ids.contains(&detail.order_id));
            assert!(product_ids.contains(&detail.product_id));
            assert!((1..=3).contains(&detail.quantity));
            *per_order.entry(detail.order_id).or_insert(0usize) += 1;
        }

        for order in &orders {
            let items = per_order.get(&order.order_id).copied().unwrap_or(0);
            assert!((1..=5).contains(&items), "order {} has {} items", order.order_id, items);
            assert!(store_ids.contains(&order.store_id));
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let (orders, details) = run_scenario(42, 0.15);
        for (i, order) in orders.iter().enumerate() {
            assert_eq!(order.order_id, i as u64 + 1);
        }
        for (i, detail) in details.iter().enumerate() {
            assert_eq!(detail.order_detail_id, i as u64 + 1);
        }
    }

    #[test]
    fn test_subtotal_matches_line_items() {
        let (orders, details) = run_scenario(42, 0.15);
        let prices = generate_products()
            .into_iter()
            .map(|p| (p.product_id, p.price))
            .collect::<HashMap<_, _>>();

        let mut per_order = HashMap::new();
        for detail in &details {
            *per_order.entry(detail.order_id).or_insert(Decimal::ZERO) +=
                prices[&detail.product_id] * Decimal::from(detail.quantity);
        }

        for order in &orders {
            assert_eq!(order.sub_total, per_order[&order.order_id]);
        }
    }

    #[test]
    fn test_customer_share_is_respected() {
        let (orders, _) = run_scenario(42, 0.15);
        let attributed = orders.iter().filter(|o| o.customer_id.is_some()).count();
        let share = attributed as f64 / orders.len() as f64;
        assert!(
            (share - 0.15).abs() < 0.05,
            "attributed share {share} too far from 0.15"
        );
    }

    #[test]
    fn test_zero_customer_share_never_attributes() {
        let (orders, _) = run_scenario(42, 0.);
        assert!(orders.iter().all(|o| o.customer_id.is_none()));
        assert!(orders.iter().all(|o| !o.discount_applied));
    }

    #[test]
    fn test_store_distribution_follows_weights() {
        let (orders, _) = run_scenario(42, 0.15);
        let mut counts = [0usize; 5];
        for order in &orders {
            counts[(order.store_id - 1) as usize] += 1;
        }
        for (i, weight) in STORE_WEIGHTS.iter().enumerate() {
            let freq = counts[i] as f64 / orders.len() as f64;
            assert!(
                (freq - weight).abs() < 0.05,
                "store {} frequency {} too far from {}",
                i + 1,
                freq,
                weight
            );
        }
    }

    #[test]
    fn test_invalid_customer_share_rejected() {
        let gen = Generator::try_new(generator::Config {
            from: date(2022, 1, 1),
            to: date(2022, 1, 2),
            low_from: date(2022, 2, 1),
            low_to: date(2022, 2, 28),
            lambda_high: 10.,
            lambda_low: 3.,
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let res = Scenario::try_new(Config {
            gen,
            customers: CustomerProvider::try_new(generate_customers(
                &mut rng,
                10,
                date(2022, 1, 1),
                date(2022, 1, 2),
            ))
            .unwrap(),
            products: ProductProvider::try_new(generate_products()).unwrap(),
            stores: StoreProvider::try_new(generate_stores(), STORE_WEIGHTS.to_vec()).unwrap(),
            customer_share: 1.5,
        });
        assert!(res.is_err());
    }
}
