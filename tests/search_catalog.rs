use approx::assert_relative_eq;
use camino::Utf8Path;
use eclipse_predictor::catalog::load_catalog;
use eclipse_predictor::time::{epoch_from_julian_date, format_timestamp, night_window};
use eclipse_predictor::{
    search_eclipses, PredictorError, RawSearchParams, SearchMode, SearchParams,
};
use hifitime::Epoch;

mod common;

fn request(mode: &str, start: &str, end: &str) -> RawSearchParams {
    serde_json::from_value(serde_json::json!({
        "searchType": "eclipsing",
        "searchMode": mode,
        "longitude": "-1.25",
        "latitude": "51.75",
        "minimumAltitude": "-90",
        "maximumMagnitude": "20",
        "startDate": start,
        "endDate": end,
    }))
    .unwrap()
}

#[test]
fn test_fast_search_over_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&common::build_sample_catalog(&dir)).unwrap();

    let params =
        SearchParams::from_raw(&request("fast", "2024-03-01T20:00:00", "2024-03-02T04:00:00"))
            .unwrap();
    let results = search_eclipses(&catalog, &params);

    assert_eq!(results.len(), catalog.len());
    for result in &results {
        assert!(result.fast);
        assert_eq!(result.window.mid.instant, params.window_midpoint());
        assert_eq!(
            format_timestamp(&epoch_from_julian_date(result.window.mid.instant)),
            "2024-03-02T00:00:00.000"
        );
    }
}

#[test]
fn test_standard_search_propagates_ephemerides() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&common::build_sample_catalog(&dir)).unwrap();

    let params = SearchParams::from_raw(&request(
        "standard",
        "2024-03-03T00:00:00",
        "2024-03-21T00:00:00",
    ))
    .unwrap();
    let results = search_eclipses(&catalog, &params);
    assert_eq!(results.len(), catalog.len());

    for (result, entry) in results.iter().zip(&catalog) {
        assert_eq!(result.names, entry.names);
        assert!(!result.fast);

        let mid = result.window.mid.instant;
        assert!(mid >= params.window_start() && mid <= params.window_end());
        assert!(mid - entry.period < params.window_start());
        let cycles = (mid - entry.epoch) / entry.period;
        assert_relative_eq!(cycles, cycles.round(), epsilon = 1e-6);

        if entry.eclipse_time > 0.0 {
            let start = result.window.start.unwrap().instant;
            let end = result.window.end.unwrap().instant;
            assert_relative_eq!(end - start, entry.eclipse_time, epsilon = 1e-9);
        } else {
            assert!(result.window.start.is_none() && result.window.end.is_none());
        }
    }
}

#[test]
fn test_eclipse_straddling_window_start_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&common::build_sample_catalog(&dir)).unwrap();

    // the first TX UMa minimum falls 0.18 d after the start, inside half its duration
    let params = SearchParams::from_raw(&request(
        "standard",
        "2024-03-01T00:00:00",
        "2024-03-21T00:00:00",
    ))
    .unwrap();
    let results = search_eclipses(&catalog, &params);
    let names: Vec<&str> = results.iter().map(|r| r.names["GCVS"].as_str()).collect();
    assert_eq!(names, ["bet Per", "V0338 And"]);
}

#[test]
fn test_search_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&common::build_sample_catalog(&dir)).unwrap();
    let params = SearchParams::from_raw(&request(
        "standard",
        "2024-06-01T20:00:00",
        "2024-06-15T05:00:00",
    ))
    .unwrap();

    let first = serde_json::to_string(&search_eclipses(&catalog, &params)).unwrap();
    let second = serde_json::to_string(&search_eclipses(&catalog, &params)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_horizon_threshold_narrows_results() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = load_catalog(&common::build_sample_catalog(&dir)).unwrap();

    let date = Epoch::from_gregorian_utc_hms(2024, 1, 15, 0, 0, 0);
    let (start, end) = night_window(&date);
    let everything = SearchParams::builder()
        .latitude(51.75)
        .min_altitude(-90.0)
        .window_jd(start, end)
        .mode(SearchMode::Fast)
        .build()
        .unwrap();
    let above = SearchParams::builder()
        .latitude(51.75)
        .min_altitude(30.0)
        .window_jd(start, end)
        .mode(SearchMode::Fast)
        .build()
        .unwrap();

    let all = search_eclipses(&catalog, &everything);
    let visible = search_eclipses(&catalog, &above);
    assert_eq!(all.len(), catalog.len());
    assert!(visible.len() <= all.len());
    for result in &visible {
        assert!(result.window.mid.altitude >= 30.0_f64.to_radians());
    }
    for result in &all {
        if result.window.mid.altitude >= 30.0_f64.to_radians() {
            assert!(visible.iter().any(|v| v.names == result.names));
        }
    }
}

#[test]
fn test_rejected_request() {
    let mut raw = request("standard", "2024-03-01T20:00:00", "2024-03-02T04:00:00");
    raw.minimum_altitude = None;
    assert_eq!(
        SearchParams::from_raw(&raw),
        Err(PredictorError::MissingParameter("minimumAltitude"))
    );

    let mut raw = request("standard", "2024-03-01T20:00:00", "2024-03-02T04:00:00");
    raw.search_type = None;
    assert_eq!(
        SearchParams::from_raw(&raw),
        Err(PredictorError::MissingParameter("searchType"))
    );
}

#[test]
fn test_search_type_locates_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let built = common::build_sample_catalog(&dir);
    let data_dir = Utf8Path::from_path(dir.path()).unwrap();

    let params = SearchParams::from_raw(&request(
        "fast",
        "2024-03-01T20:00:00",
        "2024-03-02T04:00:00",
    ))
    .unwrap();
    let path = params.catalog_kind().path_in(data_dir);
    assert_eq!(path, built);
    assert_eq!(load_catalog(&path).unwrap().len(), 3);
}
