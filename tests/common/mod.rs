#![allow(dead_code)]

use candle_canvas::{Chart, ChartConfig, MemoryStore, OhlcRecord, PriceSeries};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random-walk daily candles starting 2020-01-01, reproducible per seed.
pub fn synthetic_series(n: usize, seed: u64) -> PriceSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date");
    let mut price = 100.0_f64;
    let records = (0..n).map(|i| {
        let open = price;
        price += (rng.random::<f64>() - 0.5) * 10.0;
        let close = price;
        OhlcRecord {
            date: start.checked_add_days(Days::new(i as u64)),
            open,
            high: open.max(close) + rng.random::<f64>() * 5.0,
            low: open.min(close) - rng.random::<f64>() * 5.0,
            close,
        }
    });
    PriceSeries::from_records(records.collect::<Vec<_>>()).expect("finite prices")
}

pub fn chart_with(config: ChartConfig, store: MemoryStore) -> Chart {
    Chart::new(config, synthetic_series(1000, 42), Box::new(store)).expect("chart builds")
}

pub fn default_chart() -> Chart {
    chart_with(ChartConfig::default(), MemoryStore::new())
}
