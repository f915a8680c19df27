use std::cell::RefCell;
use std::rc::Rc;

use timeline_diary::DiaryError;
use timeline_diary::api::{DiaryConfig, DiaryEngine, DiaryEngineConfig, TimelineConfig};
use timeline_diary::core::{Layout, PhysicalEdge, SelectionState, minutes_to_percentage};
use timeline_diary::extensions::{DiaryContext, DiaryEvent, DiaryPlugin};
use timeline_diary::interaction::{ClickTarget, PlacementOutcome};
use timeline_diary::render::NullRenderer;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(DiaryEvent, DiaryContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(DiaryEvent, DiaryContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl DiaryPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: DiaryEvent, context: DiaryContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn event_kind(event: &DiaryEvent) -> &'static str {
    match event {
        DiaryEvent::ActivityPlaced { .. } => "placed",
        DiaryEvent::ActivityResized { .. } => "resized",
        DiaryEvent::ActivityRemoved { .. } => "removed",
        DiaryEvent::TimelineCleared { .. } => "cleared",
        DiaryEvent::ActiveTimelineChanged { .. } => "timeline",
        DiaryEvent::LayoutChanged { .. } => "layout",
        DiaryEvent::ResizeStarted { .. } => "resize_start",
        DiaryEvent::ResizeEnded { .. } => "resize_end",
        DiaryEvent::Restored => "restored",
        DiaryEvent::Rendered => "rendered",
    }
}

fn engine() -> DiaryEngine<NullRenderer> {
    DiaryEngine::new(
        NullRenderer::default(),
        &DiaryConfig::new(vec![
            TimelineConfig::new("primary"),
            TimelineConfig::new("secondary"),
        ]),
        DiaryEngineConfig::new(1600.0),
    )
    .expect("engine init")
}

fn select(engine: &mut DiaryEngine<NullRenderer>) {
    engine
        .set_selection(SelectionState::single("Work", "Office", "#aa5500"))
        .expect("select");
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    select(&mut engine);
    let PlacementOutcome::Placed { id, .. } = engine
        .place_at_percent(0.0, ClickTarget::Empty)
        .expect("place")
    else {
        panic!("expected placement");
    };
    engine
        .resize_start(id, PhysicalEdge::Right)
        .expect("grab");
    engine
        .resize_to_percent(minutes_to_percentage(300))
        .expect("move");
    engine.resize_end().expect("release");
    engine.undo().expect("undo");
    engine.set_active_timeline("secondary").expect("switch");
    engine.set_viewport_width(900.0).expect("shrink");
    engine.clear_active_timeline().expect("clear");
    let snapshot = engine.snapshot();
    engine.restore(&snapshot).expect("restore");

    let kinds: Vec<&'static str> = events
        .borrow()
        .iter()
        .map(|(event, _)| event_kind(event))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "placed",
            "rendered",
            "resize_start",
            "rendered",
            "resized",
            "rendered",
            "resize_end",
            "rendered",
            "removed",
            "rendered",
            "timeline",
            "rendered",
            "layout",
            "rendered",
            "cleared",
            "rendered",
            "restored",
            "rendered",
        ]
    );
}

#[test]
fn context_reflects_state_after_the_change() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("ctx", events.clone())))
        .expect("register plugin");

    select(&mut engine);
    engine
        .place_at_percent(minutes_to_percentage(600), ClickTarget::Empty)
        .expect("place");
    engine.set_viewport_width(700.0).expect("shrink");

    let events = events.borrow();
    let (event, context) = events[0];
    assert!(event.mutates_store());
    assert_eq!(context.activities_len, 1);
    assert_eq!(context.coverage_minutes, 10);
    let (event, context) = events
        .iter()
        .copied()
        .find(|(event, _)| matches!(event, DiaryEvent::LayoutChanged { .. }))
        .expect("layout event");
    assert!(!event.mutates_store());
    assert_eq!(context.layout, Layout::Vertical);
}

#[test]
fn duplicate_plugin_ids_are_rejected() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("dupe", events.clone())))
        .expect("first plugin");
    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("dupe", events)))
        .expect_err("duplicate must fail");
    assert!(matches!(err, DiaryError::InvalidData(_)));
}

#[test]
fn unregister_plugin_stops_dispatch() {
    let mut engine = engine();
    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("to-remove", events.clone())))
        .expect("register");
    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("to-remove"));

    engine.render().expect("render");
    assert!(engine.unregister_plugin("to-remove"));
    assert_eq!(engine.plugin_count(), 0);
    assert!(!engine.has_plugin("to-remove"));

    engine.render().expect("render again");
    assert_eq!(events.borrow().len(), 1);
}
