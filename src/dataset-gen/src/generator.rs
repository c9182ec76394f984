use chrono::NaiveDate;
use rand::prelude::*;
use rand_distr::Poisson;

use crate::error::DatasetGenError;
use crate::error::Result;

pub struct Config {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub low_from: NaiveDate,
    pub low_to: NaiveDate,
    pub lambda_high: f64,
    pub lambda_low: f64,
}

/// Walks the date range day by day and draws the number of orders for each
/// day from a Poisson distribution. Days inside the low-demand window use
/// `lambda_low`, all others `lambda_high`. Both range ends are inclusive.
pub struct Generator {
    cur: Option<NaiveDate>,
    to: NaiveDate,
    low_from: NaiveDate,
    low_to: NaiveDate,
    high: Poisson<f64>,
    low: Poisson<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySample {
    pub day: NaiveDate,
    pub orders: u64,
}

impl Generator {
    pub fn try_new(cfg: Config) -> Result<Self> {
        if cfg.from > cfg.to {
            return Err(DatasetGenError::General(format!(
                "date range start {} is after end {}",
                cfg.from, cfg.to
            )));
        }
        let high =
            Poisson::new(cfg.lambda_high).map_err(|err| DatasetGenError::Internal(err.to_string()))?;
        let low =
            Poisson::new(cfg.lambda_low).map_err(|err| DatasetGenError::Internal(err.to_string()))?;

        Ok(Self {
            cur: Some(cfg.from),
            to: cfg.to,
            low_from: cfg.low_from,
            low_to: cfg.low_to,
            high,
            low,
        })
    }

    pub fn next_day<R: Rng>(&mut self, rng: &mut R) -> Option<DaySample> {
        let day = self.cur?;
        if day > self.to {
            return None;
        }
        self.cur = day.succ_opt();

        let dist = if day >= self.low_from && day <= self.low_to {
            &self.low
        } else {
            &self.high
        };

        Some(DaySample {
            day,
            orders: dist.sample(rng) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_walks_every_day_inclusive() {
        let mut gen = Generator::try_new(Config {
            from: date(2022, 1, 1),
            to: date(2022, 1, 10),
            low_from: date(2021, 1, 1),
            low_to: date(2021, 1, 31),
            lambda_high: 10.,
            lambda_low: 3.,
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut days = Vec::new();
        while let Some(sample) = gen.next_day(&mut rng) {
            days.push(sample.day);
        }

        assert_eq!(days.len(), 10);
        assert_eq!(days[0], date(2022, 1, 1));
        assert_eq!(days[9], date(2022, 1, 10));
        for pair in days.windows(2) {
            assert_eq!(pair[0].succ_opt().unwrap(), pair[1]);
        }
    }

    #[test]
    fn test_single_day_range() {
        let mut gen = Generator::try_new(Config {
            from: date(2022, 1, 1),
            to: date(2022, 1, 1),
            low_from: date(2022, 2, 1),
            low_to: date(2022, 2, 28),
            lambda_high: 10.,
            lambda_low: 3.,
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        assert!(gen.next_day(&mut rng).is_some());
        assert!(gen.next_day(&mut rng).is_none());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let res = Generator::try_new(Config {
            from: date(2022, 1, 2),
            to: date(2022, 1, 1),
            low_from: date(2022, 2, 1),
            low_to: date(2022, 2, 28),
            lambda_high: 10.,
            lambda_low: 3.,
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_poisson_means_follow_windows() {
        let low_from = date(2022, 7, 1);
        let low_to = date(2023, 6, 30);
        let mut gen = Generator::try_new(Config {
            from: date(2022, 1, 1),
            to: date(2024, 12, 31),
            low_from,
            low_to,
            lambda_high: 10.,
            lambda_low: 3.,
        })
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut low = Vec::new();
        let mut high = Vec::new();
        while let Some(sample) = gen.next_day(&mut rng) {
            if sample.day >= low_from && sample.day <= low_to {
                low.push(sample.orders);
            } else {
                high.push(sample.orders);
            }
        }

        assert_eq!(low.len(), 365);
        assert_eq!(high.len(), 731);
        let low_mean = low.iter().sum::<u64>() as f64 / low.len() as f64;
        let high_mean = high.iter().sum::<u64>() as f64 / high.len() as f64;
        assert!((low_mean - 3.).abs() < 0.5, "low mean {low_mean} too far from 3");
        assert!(
            (high_mean - 10.).abs() < 0.5,
            "high mean {high_mean} too far from 10"
        );
    }
}
