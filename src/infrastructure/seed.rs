// Seed series loading
use crate::application::response_parser::parse_response;
use crate::domain::series::Series;
use anyhow::Context;
use std::path::Path;

/// Load the series the chart starts with. The file uses the same
/// `{timestamp, value}` shape the statistics service answers with.
pub fn load_seed_series(path: impl AsRef<Path>) -> anyhow::Result<Series<String>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed series from {}", path.display()))?;

    let series = parse_seed(&raw)
        .with_context(|| format!("Invalid seed series in {}", path.display()))?;
    tracing::debug!(points = series.len(), path = %path.display(), "loaded seed series");
    Ok(series)
}

fn parse_seed(raw: &str) -> anyhow::Result<Series<String>> {
    let payload: serde_json::Value =
        serde_json::from_str(raw).context("Seed file is not valid JSON")?;
    let series: Series<String> =
        parse_response(&payload).context("Seed file is not a valid series")?;

    // The chart refuses to extend a series whose axis is not strictly increasing.
    if let Some(i) = series.timestamps().windows(2).position(|w| w[0] >= w[1]) {
        let ts = series.timestamps();
        anyhow::bail!(
            "Seed timestamps must be strictly increasing: {:?} at index {} follows {:?}",
            ts[i + 1],
            i + 1,
            ts[i]
        );
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seed_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/seed.json");
        let series = load_seed_series(path).unwrap();

        assert_eq!(series.len(), 36);
        assert_eq!(series.timestamps()[0], "2013-01-01");
        assert!(series.timestamps().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_seed_is_an_error() {
        assert!(load_seed_series("does/not/exist.json").is_err());
    }

    #[test]
    fn test_unordered_seed_is_rejected() {
        let out_of_order = r#"{
            "timestamp": ["2013-01-01", "2013-03-01", "2013-02-01"],
            "value": [1.0, 3.0, 2.0]
        }"#;
        let err = parse_seed(out_of_order).unwrap_err();
        assert!(err.to_string().contains("strictly increasing"));
        assert!(err.to_string().contains("index 2"));

        let duplicated = r#"{
            "timestamp": ["2013-01-01", "2013-01-01"],
            "value": [1.0, 2.0]
        }"#;
        assert!(parse_seed(duplicated).is_err());
    }

    #[test]
    fn test_seed_file_with_bad_order_fails_to_load() {
        let path = std::env::temp_dir().join(format!("seed-unordered-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "timestamp": ["b", "a"], "value": [1.0, 2.0] }"#).unwrap();

        let result = load_seed_series(&path);
        std::fs::remove_file(&path).unwrap();

        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("strictly increasing"));
    }
}
