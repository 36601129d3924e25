// Response parser - normalizes statistics service payloads into a Series
use crate::application::error::AugmentError;
use crate::domain::series::{Series, TimePoint};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const TIMESTAMP_KEY: &str = "timestamp";
const VALUE_KEY: &str = "value";
const ANOMALY_KEY: &str = "anomaly";
const ENVELOPE_KEY: &str = "data";

/// Parse a `{timestamp: [...], value: [...]}` payload, either at the top
/// level or wrapped in a `data` envelope.
///
/// When the payload also carries an `anomaly` column, only the flagged
/// entries are kept. Order is preserved and values pass through unchanged.
pub fn parse_response<T: DeserializeOwned>(response: &Value) -> Result<Series<T>, AugmentError> {
    let payload = locate_payload(response)?;

    let raw_timestamps = column(payload, TIMESTAMP_KEY)?;
    let raw_values = column(payload, VALUE_KEY)?;

    if raw_timestamps.len() != raw_values.len() {
        return Err(AugmentError::MalformedResponse(format!(
            "{} timestamps but {} values",
            raw_timestamps.len(),
            raw_values.len()
        )));
    }
    if raw_timestamps.is_empty() {
        return Err(AugmentError::EmptySeries);
    }

    let timestamps = raw_timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            T::deserialize(ts).map_err(|e| {
                AugmentError::MalformedResponse(format!("timestamp at index {i}: {e}"))
            })
        })
        .collect::<Result<Vec<T>, _>>()?;

    let values = raw_values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().ok_or_else(|| {
                AugmentError::MalformedResponse(format!("value at index {i} is not a number: {v}"))
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let series = match anomaly_flags(payload, timestamps.len())? {
        None => Series::from_parallel(timestamps, values).ok_or_else(|| {
            AugmentError::MalformedResponse("timestamp and value collections differ".to_string())
        })?,
        Some(flags) => timestamps
            .into_iter()
            .zip(values)
            .zip(flags)
            .filter(|(_, flagged)| *flagged)
            .map(|((timestamp, value), _)| TimePoint::new(timestamp, value))
            .collect(),
    };

    if series.is_empty() {
        return Err(AugmentError::EmptySeries);
    }
    Ok(series)
}

fn locate_payload(response: &Value) -> Result<&Map<String, Value>, AugmentError> {
    let root = response.as_object().ok_or_else(|| {
        AugmentError::MalformedResponse("response is not a JSON object".to_string())
    })?;

    if root.contains_key(TIMESTAMP_KEY) || root.contains_key(VALUE_KEY) {
        return Ok(root);
    }
    Ok(root
        .get(ENVELOPE_KEY)
        .and_then(Value::as_object)
        .unwrap_or(root))
}

fn column<'a>(
    payload: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a Vec<Value>, AugmentError> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| AugmentError::MalformedResponse(format!("missing `{key}` collection")))
}

fn anomaly_flags(
    payload: &Map<String, Value>,
    expected: usize,
) -> Result<Option<Vec<bool>>, AugmentError> {
    let Some(raw) = payload.get(ANOMALY_KEY) else {
        return Ok(None);
    };
    let flags = raw.as_array().ok_or_else(|| {
        AugmentError::MalformedResponse(format!("`{ANOMALY_KEY}` is not a collection"))
    })?;
    if flags.len() != expected {
        return Err(AugmentError::MalformedResponse(format!(
            "{} anomaly flags for {} points",
            flags.len(),
            expected
        )));
    }

    flags
        .iter()
        .map(|flag| match flag {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
            other => Err(AugmentError::MalformedResponse(format!(
                "anomaly flag is neither boolean nor number: {other}"
            ))),
        })
        .collect::<Result<Vec<bool>, _>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_top_level_payload() {
        let response = json!({
            "timestamp": ["2013-01-01", "2013-02-01", "2013-03-01"],
            "value": [7.5, 8, 7.9],
        });

        let series: Series<String> = parse_response(&response).unwrap();
        assert_eq!(series.timestamps(), &["2013-01-01", "2013-02-01", "2013-03-01"]);
        assert_eq!(series.values(), &[7.5, 8.0, 7.9]);
    }

    #[test]
    fn test_parse_enveloped_payload_ignores_extra_keys() {
        let response = json!({
            "message": "success",
            "data": {
                "timestamp": [4, 5],
                "value": [40.0, 50.0],
                "lo-90": [35.0, 44.0],
            },
        });

        let series: Series<i64> = parse_response(&response).unwrap();
        assert_eq!(series.timestamps(), &[4, 5]);
        assert_eq!(series.values(), &[40.0, 50.0]);
    }

    #[test]
    fn test_mismatched_lengths_are_malformed() {
        let response = json!({ "timestamp": [1, 2, 3], "value": [1.0, 2.0] });
        let result = parse_response::<i64>(&response);
        assert!(matches!(result, Err(AugmentError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_collection_is_malformed() {
        let response = json!({ "timestamp": [1, 2] });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::MalformedResponse(_))
        ));

        let response = json!({ "data": { "value": [1.0] } });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::MalformedResponse(_))
        ));

        assert!(matches!(
            parse_response::<i64>(&json!([1, 2, 3])),
            Err(AugmentError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_empty_collections_are_empty_series() {
        let response = json!({ "timestamp": [], "value": [] });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::EmptySeries)
        ));
    }

    #[test]
    fn test_non_numeric_value_is_malformed() {
        let response = json!({ "timestamp": [1, 2], "value": [1.0, null] });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::MalformedResponse(_))
        ));

        let response = json!({ "timestamp": [1, "two"], "value": [1.0, 2.0] });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_anomaly_column_keeps_flagged_points() {
        let response = json!({
            "timestamp": [1, 2, 3, 4],
            "value": [10.0, 99.0, 30.0, 5.0],
            "anomaly": [false, true, 0, 1],
        });

        let series: Series<i64> = parse_response(&response).unwrap();
        assert_eq!(series.timestamps(), &[2, 4]);
        assert_eq!(series.values(), &[99.0, 5.0]);
    }

    #[test]
    fn test_anomaly_column_without_flags_is_empty() {
        let response = json!({
            "timestamp": [1, 2],
            "value": [10.0, 20.0],
            "anomaly": [false, false],
        });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::EmptySeries)
        ));

        let response = json!({
            "timestamp": [1, 2],
            "value": [10.0, 20.0],
            "anomaly": [true],
        });
        assert!(matches!(
            parse_response::<i64>(&response),
            Err(AugmentError::MalformedResponse(_))
        ));
    }
}
