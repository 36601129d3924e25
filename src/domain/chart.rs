// Chart state - the live series the rendering surface draws
use super::series::Series;
use serde::Serialize;
use thiserror::Error;

const NORMAL_RADIUS: f32 = 1.0;
const FLAGGED_RADIUS: f32 = 5.0;

/// Per-point visual weight on the displayed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Flagged,
}

impl Emphasis {
    pub fn radius(self) -> f32 {
        match self {
            Emphasis::Normal => NORMAL_RADIUS,
            Emphasis::Flagged => FLAGGED_RADIUS,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("timestamp and value collections differ in length ({timestamps} vs {values})")]
    LengthMismatch { timestamps: usize, values: usize },
    #[error("appended points must be strictly after the last displayed timestamp")]
    OutOfOrder,
    #[error("emphasis index {index} out of range for {len} displayed points")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("displayed series no longer matches the base series")]
    StaleBase,
}

/// Borrowed view of the series currently on screen.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a, T> {
    pub timestamps: &'a [T],
    pub values: &'a [f64],
}

/// Mutation contract of the rendering surface.
///
/// Everything that changes what the chart shows goes through these four
/// calls; implementors must keep one emphasis marker per displayed point.
pub trait ChartSurface<T> {
    fn display_series(&self) -> SeriesView<'_, T>;

    /// Appends points after the current display. Must leave the surface
    /// untouched when it returns an error.
    fn append_points(&mut self, timestamps: Vec<T>, values: Vec<f64>) -> Result<(), ChartError>;

    fn set_emphasis(&mut self, index: usize, level: Emphasis) -> Result<(), ChartError>;

    fn request_redraw(&mut self);
}

/// Serializable read model handed to whatever draws the chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSnapshot<T> {
    pub timestamps: Vec<T>,
    pub values: Vec<f64>,
    pub point_radius: Vec<f32>,
    pub revision: u64,
}

#[derive(Debug, Clone)]
pub struct ChartState<T> {
    timestamps: Vec<T>,
    values: Vec<f64>,
    emphasis: Vec<Emphasis>,
    revision: u64,
}

impl<T> ChartState<T> {
    pub fn new(seed: Series<T>) -> Self {
        let (timestamps, values) = seed.into_parts();
        let emphasis = vec![Emphasis::Normal; values.len()];
        Self {
            timestamps,
            values,
            emphasis,
            revision: 0,
        }
    }

    pub fn emphasis(&self) -> &[Emphasis] {
        &self.emphasis
    }

    /// Number of redraws requested so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<T: Clone> ChartState<T> {
    pub fn snapshot(&self) -> ChartSnapshot<T> {
        ChartSnapshot {
            timestamps: self.timestamps.clone(),
            values: self.values.clone(),
            point_radius: self.emphasis().iter().map(|e| e.radius()).collect(),
            revision: self.revision(),
        }
    }
}

impl<T: Ord> ChartSurface<T> for ChartState<T> {
    fn display_series(&self) -> SeriesView<'_, T> {
        SeriesView {
            timestamps: &self.timestamps,
            values: &self.values,
        }
    }

    fn append_points(&mut self, timestamps: Vec<T>, values: Vec<f64>) -> Result<(), ChartError> {
        if timestamps.len() != values.len() {
            return Err(ChartError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }

        let mut previous = self.timestamps.last();
        for timestamp in &timestamps {
            if previous.is_some_and(|p| p >= timestamp) {
                return Err(ChartError::OutOfOrder);
            }
            previous = Some(timestamp);
        }

        let added = values.len();
        self.timestamps.extend(timestamps);
        self.values.extend(values);
        self.emphasis.extend(std::iter::repeat_n(Emphasis::Normal, added));
        Ok(())
    }

    fn set_emphasis(&mut self, index: usize, level: Emphasis) -> Result<(), ChartError> {
        let len = self.emphasis.len();
        let marker = self
            .emphasis
            .get_mut(index)
            .ok_or(ChartError::IndexOutOfRange { index, len })?;
        *marker = level;
        Ok(())
    }

    fn request_redraw(&mut self) {
        self.revision += 1;
        tracing::debug!(
            revision = self.revision,
            points = self.values.len(),
            "chart redraw requested"
        );
    }
}
