// Synthetic random-walk series used to feed demo charts
use crate::application::sample_source::SampleSource;
use crate::domain::sample::Sample;
use crate::infrastructure::config::SeriesConfig;
use anyhow::Context;
use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct FakeTimeSeries {
    rng: StdRng,
    min: f64,
    max: f64,
    variation: f64,
    time: DateTime<Utc>,
    step: TimeDelta,
    x: f64,
}

impl FakeTimeSeries {
    pub fn new(
        min: f64,
        max: f64,
        variation: f64,
        start_value: Option<f64>,
        start: DateTime<Utc>,
        step: TimeDelta,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            anyhow::bail!("Series bounds are invalid: min {} max {}", min, max);
        }
        if start_value.is_some_and(f64::is_nan) {
            anyhow::bail!("Series start value is NaN");
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let x = match start_value {
            Some(v) => v.clamp(min, max),
            None if max > min => rng.gen_range(min..=max),
            None => min,
        };

        Ok(Self {
            rng,
            min,
            max,
            variation,
            time: start,
            step,
            x,
        })
    }

    pub fn from_config(series: &SeriesConfig, seed: Option<u64>) -> anyhow::Result<Self> {
        let start = match &series.start {
            Some(s) => DateTime::parse_from_rfc3339(s)
                .with_context(|| format!("Invalid series start time: {}", s))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        Self::new(
            series.min,
            series.max,
            series.variation,
            series.start_value,
            start,
            TimeDelta::seconds(series.step_secs),
            seed,
        )
    }
}

impl SampleSource for FakeTimeSeries {
    fn next_sample(&mut self) -> Sample {
        let t = self.time;
        self.time += self.step;

        let x0 = self.x;
        let step = if self.variation > 0.0 {
            self.rng.gen_range(-0.5..0.5) * self.variation
        } else {
            0.0
        };
        let x = (x0 + step).clamp(self.min, self.max);
        self.x = x;

        let delta = if x0 == 0.0 { 0.0 } else { (x - x0) / x0 };
        Sample::new(t, x, delta)
    }
}
