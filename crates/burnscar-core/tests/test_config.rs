use std::path::PathBuf;

use burnscar_core::error::BurnScarError;
use burnscar_core::io::TemporalStack;
use burnscar_core::pipeline::{AnnualConfig, PipelineConfig, PipelineStage, YearRange};
use burnscar_core::threshold::ThresholdParams;

fn stack(years: &[i32]) -> TemporalStack {
    let mut csv = String::from("file,year,julian\n");
    for (i, year) in years.iter().enumerate() {
        csv.push_str(&format!("s{i}.tif,{year},100\n"));
    }
    TemporalStack::from_csv_str(&csv).unwrap()
}

// ---------------------------------------------------------------------------
// Defaults and serialization
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_defaults() {
    let params = ThresholdParams::default();
    assert_eq!(params.seed_prob_thresh, 97.5);
    assert_eq!(params.seed_size_thresh, 5);
    assert_eq!(params.flood_fill_prob_thresh, 75.0);
    assert_eq!(params.to_string(), "seed >= 97.5% (5 px min), fill > 75%");
}

#[test]
fn test_minimal_toml_uses_defaults() {
    let config: PipelineConfig = toml::from_str(
        r#"
        stack_file = "stack.csv"
        bp_dir = "bp"
        bc_dir = "bc"
        output_dir = "out"
        workers = 2

        [threshold]
        seed_prob_thresh = 95.0
        "#,
    )
    .unwrap();
    assert_eq!(config.stack_file, PathBuf::from("stack.csv"));
    assert_eq!(config.start_year, None);
    assert_eq!(config.threshold.seed_prob_thresh, 95.0);
    assert_eq!(config.threshold.seed_size_thresh, 5);
    assert_eq!(config.annual, AnnualConfig::default());
    assert!(config.composite.is_none());
}

#[test]
fn test_default_config_survives_toml() {
    let config = PipelineConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: PipelineConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_threshold_params_json_keys() {
    let json = serde_json::to_value(ThresholdParams::default()).unwrap();
    assert_eq!(json["seed_prob_thresh"], 97.5);
    assert_eq!(json["seed_size_thresh"], 5);
    assert_eq!(json["flood_fill_prob_thresh"], 75.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_years_before_1984_are_rejected() {
    let config = PipelineConfig {
        start_year: Some(1983),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BurnScarError::Config(_))));
}

#[test]
fn test_end_before_start_is_rejected() {
    let config = PipelineConfig {
        start_year: Some(2006),
        end_year: Some(2005),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BurnScarError::Config(_))));
}

#[test]
fn test_zero_workers_and_block_size_are_rejected() {
    let config = PipelineConfig {
        workers: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());

    let config = PipelineConfig {
        annual: AnnualConfig {
            block_size: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_out_of_range_thresholds_are_rejected() {
    let config = PipelineConfig {
        threshold: ThresholdParams {
            flood_fill_prob_thresh: -1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(BurnScarError::Config(_))));
}

// ---------------------------------------------------------------------------
// Year range resolution
// ---------------------------------------------------------------------------

#[test]
fn test_default_years_skip_first_stack_year() {
    let config = PipelineConfig::default();
    let years = config.resolve_years(&stack(&[2003, 2004, 2007])).unwrap();
    assert_eq!(years, YearRange { start: 2004, end: 2007 });
    assert_eq!(years.len(), 4);
    assert_eq!(years.to_string(), "2004-2007");
}

#[test]
fn test_explicit_years_override_stack() {
    let config = PipelineConfig {
        start_year: Some(2003),
        end_year: Some(2005),
        ..Default::default()
    };
    let years = config.resolve_years(&stack(&[2003, 2004, 2007])).unwrap();
    assert_eq!(years.years().collect::<Vec<_>>(), vec![2003, 2004, 2005]);
}

#[test]
fn test_single_year_stack_has_no_default_range() {
    let config = PipelineConfig::default();
    assert!(config.resolve_years(&stack(&[2005])).is_err());
}

#[test]
fn test_empty_stack_is_rejected() {
    let config = PipelineConfig::default();
    assert!(matches!(
        config.resolve_years(&TemporalStack::default()),
        Err(BurnScarError::Config(_))
    ));
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(PipelineStage::Thresholding.to_string(), "Thresholding scenes");
    assert_eq!(PipelineStage::Aggregating.to_string(), "Aggregating years");
}
