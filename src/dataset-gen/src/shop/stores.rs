use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::DatasetGenError;
use crate::error::Result;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Store {
    pub store_id: u64,
    pub store_name: String,
    pub district: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The fixed store fleet, one per Kyiv district.
pub fn generate_stores() -> Vec<Store> {
    let fleet = [
        (
            1,
            "Brazil Coffee",
            "Shevchenkivskyi",
            "1 Shevchenko St, Kyiv",
            50.4501,
            30.5234,
        ),
        (
            2,
            "Colombia Coffee",
            "Podilskyi",
            "5 Podil St, Kyiv",
            50.4410,
            30.5140,
        ),
        (
            3,
            "Ethiopia Coffee",
            "Pecherskyi",
            "10 Pechersk St, Kyiv",
            50.4350,
            30.5550,
        ),
        (
            4,
            "Vietnam Coffee",
            "Obolonskyi",
            "20 Obolon Ave, Kyiv",
            50.4450,
            30.4800,
        ),
        (
            5,
            "Indonesia Coffee",
            "Darnytskyi",
            "15 Darnytsia Rd, Kyiv",
            50.4580,
            30.5980,
        ),
    ];

    let stores = fleet
        .into_iter()
        .map(|(id, name, district, address, lat, lon)| Store {
            store_id: id,
            store_name: name.to_string(),
            district: district.to_string(),
            city: "Kyiv".to_string(),
            address: address.to_string(),
            latitude: lat,
            longitude: lon,
        })
        .collect::<Vec<_>>();

    info!("generated stores table with {} entries", stores.len());

    stores
}

pub struct StoreProvider {
    pub stores: Vec<Store>,
    weight_idx: WeightedIndex<f64>,
}

impl StoreProvider {
    pub fn try_new(stores: Vec<Store>, weights: Vec<f64>) -> Result<Self> {
        if stores.is_empty() {
            return Err(DatasetGenError::General("stores table is empty".to_string()));
        }
        if weights.len() != stores.len() {
            return Err(DatasetGenError::General(format!(
                "expected {} store weights, got {}",
                stores.len(),
                weights.len()
            )));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(DatasetGenError::General(format!(
                "store weights must sum to 1, got {sum}"
            )));
        }
        let weight_idx =
            WeightedIndex::new(&weights).map_err(|err| DatasetGenError::Internal(err.to_string()))?;

        Ok(Self { stores, weight_idx })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Store {
        &self.stores[self.weight_idx.sample(rng)]
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const WEIGHTS: [f64; 5] = [0.3, 0.2, 0.25, 0.15, 0.1];

    #[test]
    fn test_generate_stores() {
        let stores = generate_stores();
        assert_eq!(stores.len(), 5);
        for (i, store) in stores.iter().enumerate() {
            assert_eq!(store.store_id, i as u64 + 1);
            assert_eq!(store.city, "Kyiv");
        }
        assert_eq!(stores[0].store_name, "Brazil Coffee");
        assert_eq!(stores[4].district, "Darnytskyi");
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let res = StoreProvider::try_new(generate_stores(), vec![0.5, 0.5, 0.5, 0.5, 0.5]);
        assert!(res.is_err());
    }

    #[test]
    fn test_weight_count_must_match_stores() {
        let res = StoreProvider::try_new(generate_stores(), vec![0.5, 0.5]);
        assert!(res.is_err());
    }

    #[test]
    fn test_empty_stores_rejected() {
        assert!(StoreProvider::try_new(vec![], vec![]).is_err());
    }

    #[test]
    fn test_sampling_follows_weights() {
        let provider = StoreProvider::try_new(generate_stores(), WEIGHTS.to_vec()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let n = 20_000;
        let mut counts = [0usize; 5];
        for _ in 0..n {
            counts[(provider.sample(&mut rng).store_id - 1) as usize] += 1;
        }

        for (i, weight) in WEIGHTS.iter().enumerate() {
            let freq = counts[i] as f64 / n as f64;
            assert!(
                (freq - weight).abs() < 0.02,
                "store {} frequency {} too far from {}",
                i + 1,
                freq,
                weight
            );
        }
    }
}
