// Series domain model

/// A single observation of the charted quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint<T> {
    pub timestamp: T,
    pub value: f64,
}

impl<T> TimePoint<T> {
    pub fn new(timestamp: T, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered timestamp/value pairs, stored as two parallel collections.
///
/// The parallel layout mirrors what the chart surface consumes, so a
/// fragment can be handed over without reshaping.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
    timestamps: Vec<T>,
    values: Vec<f64>,
}

impl<T> Series<T> {
    /// Builds a series from parallel collections. Returns `None` when the
    /// collections differ in length.
    pub fn from_parallel(timestamps: Vec<T>, values: Vec<f64>) -> Option<Self> {
        if timestamps.len() != values.len() {
            return None;
        }
        Some(Self { timestamps, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<f64>) {
        (self.timestamps, self.values)
    }
}

impl<T> FromIterator<TimePoint<T>> for Series<T> {
    fn from_iter<I: IntoIterator<Item = TimePoint<T>>>(iter: I) -> Self {
        let (timestamps, values) = iter
            .into_iter()
            .map(|point| (point.timestamp, point.value))
            .unzip();
        Self { timestamps, values }
    }
}
