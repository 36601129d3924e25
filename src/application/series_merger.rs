// Series merger - applies fetched fragments to the chart surface
use crate::domain::chart::{ChartError, ChartSurface, Emphasis};
use crate::domain::series::Series;

/// Extend the displayed series with a forecast fragment.
///
/// `base_timestamps` are the timestamps the forecast was computed from and
/// must still be what the chart shows; otherwise nothing is changed and
/// `ChartError::StaleBase` is returned. Existing points are never altered.
/// Returns the number of appended points.
pub fn append_forecast<T, S>(
    chart: &mut S,
    base_timestamps: &[T],
    fragment: Series<T>,
) -> Result<usize, ChartError>
where
    T: PartialEq,
    S: ChartSurface<T> + ?Sized,
{
    if chart.display_series().timestamps != base_timestamps {
        tracing::warn!(
            displayed = chart.display_series().timestamps.len(),
            base = base_timestamps.len(),
            "chart no longer shows the forecast base; refusing to append"
        );
        return Err(ChartError::StaleBase);
    }

    let appended = fragment.len();
    let (timestamps, values) = fragment.into_parts();
    chart.append_points(timestamps, values)?;
    chart.request_redraw();
    Ok(appended)
}

/// Emphasize, for every flagged value, the first displayed point holding an
/// equal value. Flagged values that are not displayed are skipped.
///
/// Duplicate values resolve to the lowest index, and appended forecast
/// points take part in the lookup. Returns how many flagged points matched.
pub fn mark_anomalies<T, S>(chart: &mut S, fragment: &Series<T>) -> Result<usize, ChartError>
where
    S: ChartSurface<T> + ?Sized,
{
    let indices: Vec<usize> = {
        let display = chart.display_series();
        fragment
            .values()
            .iter()
            .filter_map(|flagged| {
                let index = display.values.iter().position(|v| v == flagged);
                if index.is_none() {
                    tracing::debug!(value = flagged, "flagged value not displayed; skipping");
                }
                index
            })
            .collect()
    };

    emphasize::<T, S>(chart, &indices)
}

/// Emphasize the displayed points whose timestamps match the fragment's.
/// Unmatched timestamps are skipped.
pub fn mark_anomalies_by_timestamp<T, S>(
    chart: &mut S,
    fragment: &Series<T>,
) -> Result<usize, ChartError>
where
    T: PartialEq,
    S: ChartSurface<T> + ?Sized,
{
    let indices: Vec<usize> = {
        let display = chart.display_series();
        fragment
            .timestamps()
            .iter()
            .filter_map(|flagged| display.timestamps.iter().position(|ts| ts == flagged))
            .collect()
    };

    if indices.len() < fragment.len() {
        tracing::debug!(
            skipped = fragment.len() - indices.len(),
            "flagged timestamps not displayed"
        );
    }
    emphasize::<T, S>(chart, &indices)
}

fn emphasize<T, S>(chart: &mut S, indices: &[usize]) -> Result<usize, ChartError>
where
    S: ChartSurface<T> + ?Sized,
{
    for &index in indices {
        chart.set_emphasis(index, Emphasis::Flagged)?;
    }
    chart.request_redraw();
    Ok(indices.len())
}
