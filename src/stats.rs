//! Min/mean/max reductions that skip missing values.

/// Streaming min/mean/max over the values of one metric.
///
/// Values are summed in insertion order, so the mean is reproducible for a
/// given input order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    /// Returns `None` until at least one value has been pushed.
    pub fn summary(&self) -> Option<StatTriple> {
        if self.count == 0 {
            return None;
        }
        Some(StatTriple {
            min: self.min,
            mean: self.sum / self.count as f64,
            max: self.max,
        })
    }
}

/// Minimum, arithmetic mean and maximum of a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatTriple {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// Arithmetic mean of the present values. Returns `None` when there are none.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}

/// Largest present value.
pub fn max(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Smallest present value.
pub fn min(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::min)
}
