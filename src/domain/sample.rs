// Sample domain models
use chrono::{DateTime, Utc};

/// One tick produced by a sample generator
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub delta: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64, delta: f64) -> Self {
        Self {
            timestamp,
            value,
            delta,
        }
    }

    /// Keep the timestamp and primary value, drop the delta
    pub fn into_point(self) -> DataPoint {
        DataPoint::new(self.timestamp, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}
