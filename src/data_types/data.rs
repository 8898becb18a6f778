use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::geometry::price_bounds;

/// One OHLC sample. `index` is the position in its series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl DataPoint {
    pub fn is_bearish(&self) -> bool {
        self.open > self.close
    }

    fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// Raw record as delivered by a data feed, before indices are assigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OhlcRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Immutable, index-ordered price series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<DataPoint>,
}

impl PriceSeries {
    /// Ingests records in order; `index` is assigned from position.
    pub fn from_records(records: impl IntoIterator<Item = OhlcRecord>) -> Result<Self, ChartError> {
        let points: Vec<DataPoint> = records
            .into_iter()
            .enumerate()
            .map(|(index, r)| DataPoint {
                index,
                date: r.date,
                open: r.open,
                high: r.high,
                low: r.low,
                close: r.close,
            })
            .collect();

        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(ChartError::Initialization(format!(
                "data point {} has a non-finite price",
                bad.index
            )));
        }
        Ok(Self { points })
    }

    /// Parses a JSON array of `{date?, open, high, low, close}` records.
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        let records: Vec<OhlcRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    /// `(min(low), max(high))` over the whole series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        price_bounds(self.points.iter().map(|p| (p.low, p.high)))
    }
}
