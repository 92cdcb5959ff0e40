use fortune_core::{
    bias::{Bias, BiasLevel},
    clock::{parse_date, DEFAULT_UTC_OFFSET_MINUTES},
    config::FortuneConfig,
    fortune::DEFAULT_SECRET_SUFFIX,
    options::Algorithm,
    FortuneError,
};

#[test]
fn empty_object_gives_defaults() {
    let config = FortuneConfig::from_json("{}").unwrap();
    assert_eq!(config, FortuneConfig::default());
    assert_eq!(config.secret_suffix, DEFAULT_SECRET_SUFFIX);
    assert_eq!(config.utc_offset_minutes, DEFAULT_UTC_OFFSET_MINUTES);
    assert_eq!(config.random.algorithm, Algorithm::Xoshiro256PlusPlus);
}

#[test]
fn full_config_decodes() {
    let json = r#"{
        "random": { "algorithm": "xoshiro256pp", "bias": "slight_up" },
        "secret_suffix": "_pepper",
        "utc_offset_minutes": 0,
        "lunar_new_year": { "2041": "02-01" }
    }"#;
    let config = FortuneConfig::from_json(json).unwrap();
    assert_eq!(config.random.bias, Bias::Named(BiasLevel::SlightUp));
    assert_eq!(config.secret_suffix, "_pepper");
    assert_eq!(config.clock().utc_offset_minutes, 0);
    assert_eq!(
        config.calendar().festival_on(parse_date("2041-02-01").unwrap()).as_deref(),
        Some("春节")
    );
}

#[test]
fn unsupported_algorithm_is_a_config_error() {
    let err = FortuneConfig::from_json(r#"{"random":{"algorithm":"pcg64"}}"#).unwrap_err();
    assert!(matches!(err, FortuneError::Serialization(_)));
    assert!(err.to_string().contains("pcg64"));
}

#[test]
fn load_reads_a_file_and_reports_missing_ones() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = std::env::temp_dir();
    let path = dir.join(format!("fortune-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"random":{"bias":-0.5}}"#).unwrap();

    let config = FortuneConfig::load(path.to_str().unwrap()).unwrap();
    assert_eq!(config.random.bias, Bias::Tilt(-0.5));
    std::fs::remove_file(&path).unwrap();

    let err = FortuneConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read /definitely/not/here.json"));
}
