use civic_triage::{
    config::Config,
    model::{Category, Severity},
};

#[test]
fn parse_example_config() {
    let raw = include_str!("../civic-triage.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.dashboard.recent_limit, 5);
    assert_eq!(cfg.thresholds.hours_for(Severity::Critical), 24);
    assert_eq!(cfg.analytics.target_for(Category::PublicSafety), Some(1.0));
    assert!(cfg.triage.enforce_lifecycle);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[dashboard]\nrecent_limit = 3\n").expect("parse TOML");
    assert_eq!(cfg.dashboard.recent_limit, 3);
    assert_eq!(cfg.thresholds.hours_for(Severity::Low), 336);
    assert!(cfg.search.normalize_unicode);
    assert!(cfg.data.fixture_path.is_empty());
}
