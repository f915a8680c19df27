use timeline_diary::api::{DiaryConfig, DiaryEngine, DiaryEngineConfig, TimelineConfig};
use timeline_diary::core::{
    PlacementRejection, PointerPosition, SelectionMode, SelectionState, TimeSpan,
    minutes_to_percentage, validate_min_coverage,
};
use timeline_diary::interaction::{ClickTarget, PlacementOutcome};
use timeline_diary::render::NullRenderer;
use timeline_diary::DiaryError;

fn diary() -> DiaryConfig {
    DiaryConfig::new(vec![
        TimelineConfig::new("primary"),
        TimelineConfig::new("secondary")
            .with_mode(SelectionMode::MultipleChoice)
            .with_min_coverage(60),
    ])
}

fn engine() -> DiaryEngine<NullRenderer> {
    DiaryEngine::new(
        NullRenderer::default(),
        &diary(),
        DiaryEngineConfig::new(1600.0),
    )
    .expect("engine init")
}

fn sleep() -> SelectionState {
    SelectionState::single("Personal care", "Sleep", "#224466")
}

#[test]
fn click_at_timeline_start_places_first_ten_minutes() {
    let mut engine = engine();
    engine.set_selection(sleep()).expect("select");

    let outcome = engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place");
    let PlacementOutcome::Placed { span, .. } = outcome else {
        panic!("expected placement, got {outcome:?}");
    };
    assert_eq!(span, TimeSpan::new(240, 250));

    let record = &engine.manager().active_activities().records()[0];
    assert_eq!(record.start_time(), "04:00");
    assert_eq!(record.end_time(), "04:10");
    assert_eq!(record.activity, "Sleep");
    assert!(engine.selection().is_none());
}

#[test]
fn overlapping_span_is_refused_and_store_unchanged() {
    let mut engine = engine();
    engine.set_selection(sleep()).expect("select");
    engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place");
    let before = engine.manager().active_activities().clone();

    assert!(!engine.manager().can_place(245, 255, None));
    assert_eq!(engine.manager().active_activities(), &before);
}

#[test]
fn click_on_existing_block_is_silently_ignored() {
    let mut engine = engine();
    engine.set_selection(sleep()).expect("select");
    let PlacementOutcome::Placed { id, .. } = engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place")
    else {
        panic!("expected placement");
    };

    engine.set_selection(sleep()).expect("select again");
    let outcome = engine
        .place_at_percent(0.2, ClickTarget::Block(id))
        .expect("click block");
    assert_eq!(
        outcome,
        PlacementOutcome::Rejected {
            reason: PlacementRejection::InsideExistingBlock,
            candidate: None,
        }
    );
    assert_eq!(engine.manager().active_activities().len(), 1);
}

#[test]
fn click_without_selection_is_a_no_op() {
    let mut engine = engine();
    let outcome = engine
        .place_at_percent(50.0, ClickTarget::Empty)
        .expect("click");
    assert!(matches!(
        outcome,
        PlacementOutcome::Rejected {
            reason: PlacementRejection::NoSelection,
            ..
        }
    ));
    assert!(engine.manager().active_activities().is_empty());
}

#[test]
fn click_at_timeline_end_is_refused() {
    let mut engine = engine();
    engine.set_selection(sleep()).expect("select");
    let outcome = engine
        .place_at_percent(100.0, ClickTarget::Empty)
        .expect("click");
    assert!(matches!(
        outcome,
        PlacementOutcome::Rejected {
            reason: PlacementRejection::PastTimelineEnd,
            ..
        }
    ));
}

#[test]
fn pointer_click_maps_client_coordinates_through_timeline_rect() {
    let mut engine = engine();
    engine.set_selection(sleep()).expect("select");
    // Default rect spans 1440 px, so one pixel is one minute along x.
    let outcome = engine
        .pointer_click(PointerPosition::new(60.0, 700.0), ClickTarget::Empty)
        .expect("click");
    assert!(matches!(
        outcome,
        PlacementOutcome::Placed { span, .. } if span == TimeSpan::new(300, 310)
    ));
}

#[test]
fn multiple_choice_selection_needs_a_multiple_choice_timeline() {
    let mut engine = engine();
    let multi = SelectionState::multiple(
        "Leisure",
        vec![
            timeline_diary::core::ActivityOption::new("Reading", "#336699"),
            timeline_diary::core::ActivityOption::new("Music", "#993366"),
        ],
    );
    let err = engine
        .set_selection(multi.clone())
        .expect_err("single-choice timeline");
    assert!(matches!(err, DiaryError::InvalidData(_)));

    engine
        .set_active_timeline("secondary")
        .expect("switch timeline");
    engine.set_selection(multi).expect("multi allowed");
    engine
        .place_at_percent(minutes_to_percentage(600), ClickTarget::Empty)
        .expect("place");
    let record = &engine.manager().active_activities().records()[0];
    assert_eq!(record.activity, "Reading | Music");
    assert_eq!(record.count, 2);
}

#[test]
fn undo_and_clear_only_touch_the_active_timeline() {
    let mut engine = engine();
    for minutes in [240, 300, 360] {
        engine.set_selection(sleep()).expect("select");
        engine
            .place_at_percent(minutes_to_percentage(minutes), ClickTarget::Empty)
            .expect("place");
    }
    engine.set_active_timeline("secondary").expect("switch");
    engine.set_selection(sleep()).expect("select");
    engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place secondary");
    engine.set_active_timeline("primary").expect("switch back");

    let popped = engine.undo().expect("undo").expect("record popped");
    assert_eq!(popped.start_minutes, 360);
    assert_eq!(engine.coverage_minutes(), 20);

    assert_eq!(engine.clear_active_timeline().expect("clear"), 2);
    assert_eq!(engine.coverage_minutes(), 0);
    assert_eq!(
        engine
            .manager()
            .module("secondary")
            .expect("secondary")
            .activities()
            .len(),
        1
    );
    assert!(engine.undo().expect("undo empty").is_none());
}

#[test]
fn minimum_coverage_validation_lists_short_timelines() {
    let mut engine = engine();
    engine.validate_all_timelines().expect_err("secondary needs an hour");

    engine.set_active_timeline_index(1).expect("switch");
    engine
        .set_selection(SelectionState::single("Work", "Office", "#aa5500"))
        .expect("select");
    engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place");
    assert!(!engine.meets_minimum_coverage());
    let err = engine.validate_all_timelines().expect_err("still short");
    assert!(format!("{err}").contains("secondary"));
}

#[test]
fn min_coverage_validation_matches_documented_cases() {
    assert!(validate_min_coverage(125.0).is_err());
    assert!(validate_min_coverage(1450.0).is_err());
    assert_eq!(validate_min_coverage(120.0).expect("valid"), 120);
}

#[test]
fn switching_to_unknown_timeline_fails() {
    let mut engine = engine();
    let err = engine
        .set_active_timeline("missing")
        .expect_err("unknown key");
    assert!(matches!(err, DiaryError::UnknownTimeline(_)));
    let err = engine.set_active_timeline_index(7).expect_err("bad index");
    assert!(matches!(err, DiaryError::UnknownTimeline(_)));
    assert_eq!(engine.active_timeline_key(), "primary");
}
