use timeline_diary::DiaryError;
use timeline_diary::api::{DiaryConfig, DiaryEngine, DiaryEngineConfig};
use timeline_diary::core::SelectionMode;
use timeline_diary::render::NullRenderer;

const STUDY_JSON: &str = r##"{
    "timelines": [
        {
            "key": "primary",
            "name": "Main activity",
            "description": "What were you mainly doing?",
            "minCoverage": 1440,
            "categories": [
                {"name": "Personal care", "activities": [
                    {"name": "Sleep", "color": "#224466"},
                    {"name": "Eating", "color": "#bb7711"}
                ]}
            ]
        },
        {
            "key": "secondary",
            "name": "Side activity",
            "mode": "multiple-choice",
            "min_coverage": null
        }
    ]
}"##;

#[test]
fn study_config_builds_modules_in_order() {
    let config = DiaryConfig::from_json_str(STUDY_JSON).expect("parse");
    let engine = DiaryEngine::new(
        NullRenderer::default(),
        &config,
        DiaryEngineConfig::new(1600.0),
    )
    .expect("engine init");

    let keys: Vec<&str> = engine
        .manager()
        .modules()
        .map(|module| module.key())
        .collect();
    assert_eq!(keys, vec!["primary", "secondary"]);

    let primary = engine.manager().module("primary").expect("primary");
    assert_eq!(primary.min_coverage(), 1440);
    assert_eq!(primary.name(), "Main activity");
    assert_eq!(primary.categories()[0].activities.len(), 2);

    let secondary = engine.manager().module("secondary").expect("secondary");
    assert_eq!(secondary.mode(), SelectionMode::MultipleChoice);
    assert_eq!(secondary.min_coverage(), 0);
    assert_eq!(engine.active_timeline_key(), "primary");
}

#[test]
fn invalid_min_coverage_is_fatal() {
    for bad in ["125", "1450", "-10", "\"120\""] {
        let json = format!(r#"{{"timelines": [{{"key": "primary", "minCoverage": {bad}}}]}}"#);
        let config = DiaryConfig::from_json_str(&json).expect("parse");
        let err = DiaryEngine::new(
            NullRenderer::default(),
            &config,
            DiaryEngineConfig::new(1600.0),
        )
        .err()
        .expect("engine init must fail");
        assert!(
            matches!(
                err,
                DiaryError::InvalidMinCoverage { .. } | DiaryError::InvalidConfig(_)
            ),
            "unexpected error for {bad}: {err}"
        );
    }
}

#[test]
fn empty_or_duplicate_timelines_are_config_errors() {
    let empty = DiaryConfig::from_json_str(r#"{"timelines": []}"#).expect("parse");
    let err = DiaryEngine::new(
        NullRenderer::default(),
        &empty,
        DiaryEngineConfig::new(1600.0),
    )
    .err()
    .expect("no timelines");
    assert!(matches!(err, DiaryError::InvalidConfig(_)));

    let duplicate =
        DiaryConfig::from_json_str(r#"{"timelines": [{"key": "a"}, {"key": "a"}]}"#)
            .expect("parse");
    let err = DiaryEngine::new(
        NullRenderer::default(),
        &duplicate,
        DiaryEngineConfig::new(1600.0),
    )
    .err()
    .expect("duplicate keys");
    assert!(matches!(err, DiaryError::InvalidConfig(_)));
}

#[test]
fn malformed_json_is_reported() {
    let err = DiaryConfig::from_json_str("{not json").expect_err("malformed");
    assert!(matches!(err, DiaryError::InvalidConfig(_)));
}

#[test]
fn engine_config_deserializes_with_defaults() {
    let config: DiaryEngineConfig =
        serde_json::from_str(r#"{"viewport_width_px": 1024.0}"#).expect("parse");
    assert_eq!(config, DiaryEngineConfig::new(1024.0));

    let engine = DiaryEngine::new(
        NullRenderer::default(),
        &DiaryConfig::from_json_str(r#"{"timelines": [{"key": "primary"}]}"#).expect("parse"),
        config,
    )
    .expect("engine init");
    assert_eq!(
        engine.layout(),
        timeline_diary::core::Layout::Vertical
    );
}

#[test]
fn engine_config_rejects_bad_viewport() {
    let err = DiaryEngine::new(
        NullRenderer::default(),
        &DiaryConfig::from_json_str(r#"{"timelines": [{"key": "primary"}]}"#).expect("parse"),
        DiaryEngineConfig::new(f64::NAN),
    )
    .err()
    .expect("nan viewport");
    assert!(matches!(err, DiaryError::InvalidConfig(_)));
}
