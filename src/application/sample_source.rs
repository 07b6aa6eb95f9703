// Sample source trait for synthetic or live series
use crate::domain::sample::{DataPoint, Sample};

pub trait SampleSource: Send {
    /// Produce the next sample, advancing internal state
    fn next_sample(&mut self) -> Sample;
}

/// Draw `n` samples and keep `(timestamp, value)` from each
pub fn take_points(source: &mut dyn SampleSource, n: usize) -> Vec<DataPoint> {
    (0..n).map(|_| source.next_sample().into_point()).collect()
}
