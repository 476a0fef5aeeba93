use std::io::Write;
use std::sync::Arc;

use eframe::egui::{Color32, vec2};
use tweetscape::dataset::load_records;
use tweetscape::{
    Attribute, Canvas, DrawList, Engine, EnginePhase, Record, RecordId, SelectionChange,
    SimulationConfig,
};

fn engine(attribute: Attribute) -> Engine {
    Engine::new(Canvas::default(), SimulationConfig::default(), attribute)
}

fn settle(engine: &mut Engine) {
    while engine.advance(u32::MAX, |_| {}) {}
}

#[test]
fn two_march_tweets_settle_apart_near_their_anchor() {
    let mut engine = engine(Attribute::Sentiment);
    let records: Arc<[Record]> = vec![
        Record::new(1, "March", 1.0, 0.5, "love it"),
        Record::new(2, "March", -1.0, 0.5, "hate it"),
    ]
    .into();

    engine.receive(&records);
    assert!(engine.initialize());
    settle(&mut engine);

    let march = vec2(360.0, 87.5);
    let points = engine.points();
    assert_eq!(points.len(), 2);
    for point in points {
        assert!(
            (point.position - march).length() < 20.0,
            "{:?} drifted from the March anchor",
            point.position
        );
    }
    let gap = (points[0].position - points[1].position).length();
    assert!(gap >= 2.0 * 4.0 - 0.5, "discs overlap: gap {gap}");

    assert_eq!(engine.color_of_record(0), Some(Color32::from_rgb(0x00, 0x80, 0x00)));
    assert_eq!(engine.color_of_record(1), Some(Color32::from_rgb(0xFF, 0x00, 0x00)));
}

#[test]
fn switching_attribute_recolors_without_moving_points() {
    let mut engine = engine(Attribute::Sentiment);
    let records: Arc<[Record]> = (0..30)
        .map(|i| {
            let month = ["March", "April", "May"][i % 3];
            Record::new(i as u64, month, (i as f32 / 15.0) - 1.0, i as f32 / 30.0, "tweet")
        })
        .collect::<Vec<_>>()
        .into();

    engine.receive(&records);
    engine.initialize();
    engine.advance(25, |_| {});

    let before: Vec<_> = engine.points().iter().map(|point| point.position).collect();
    let ticks = engine.simulation().map(|simulation| simulation.ticks());

    assert!(engine.set_attribute(Attribute::Subjectivity));
    assert!(!engine.set_attribute(Attribute::Subjectivity));

    let after: Vec<_> = engine.points().iter().map(|point| point.position).collect();
    assert_eq!(before, after);
    assert_eq!(ticks, engine.simulation().map(|simulation| simulation.ticks()));
    assert_eq!(engine.legend().attribute, Attribute::Subjectivity);
    assert_eq!(engine.simulation_runs(), 1);

    let mut surface = DrawList::new();
    engine.render(&mut surface, None);
    let texts: Vec<_> = surface.texts().collect();
    assert!(texts.contains(&"Subjective"));
    assert!(texts.contains(&"Objective"));
    assert!(!texts.contains(&"Positive"));
}

#[test]
fn clicks_drive_the_selection_panel_and_highlight() {
    let mut engine = engine(Attribute::Sentiment);
    let records: Arc<[Record]> = vec![
        Record::new(7, "April", 0.2, 0.3, "a"),
        Record::new(8, "April", -0.2, 0.6, "b"),
    ]
    .into();
    engine.receive(&records);
    engine.initialize();
    settle(&mut engine);

    assert_eq!(engine.click(RecordId(7)), Some(SelectionChange::Selected));
    assert_eq!(engine.click(RecordId(8)), Some(SelectionChange::Selected));
    assert_eq!(engine.click(RecordId(99)), None);

    let panel: Vec<_> = engine
        .selected_records()
        .iter()
        .map(|record| record.idx)
        .collect();
    assert_eq!(panel, vec![RecordId(8), RecordId(7)]);

    assert_eq!(engine.click(RecordId(8)), Some(SelectionChange::Deselected));
    assert_eq!(engine.selection().ids(), vec![RecordId(7)]);

    let mut surface = DrawList::new();
    engine.render(&mut surface, None);
    let stroked = surface
        .circles()
        .filter(|(_, _, stroke)| stroke.width > 0.0)
        .count();
    assert_eq!(stroked, 1);

    let target = engine.points()[0].position;
    assert_eq!(engine.point_at(target), Some(RecordId(7)));
}

#[test]
fn loaded_file_runs_one_simulation_per_dataset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"idx": 1, "Month": "March", "Sentiment": 0.5, "Subjectivity": 0.1, "RawTweet": "one"}},
            {{"idx": 2, "Month": "May", "Sentiment": -0.5, "Subjectivity": 0.9, "RawTweet": "two"}}
        ]"#
    )
    .unwrap();

    let records: Arc<[Record]> = load_records(file.path()).unwrap().into();
    let mut engine = engine(Attribute::Sentiment);
    assert_eq!(engine.phase(), EnginePhase::Empty);

    engine.receive(&records);
    assert!(engine.initialize());
    engine.receive(&records);
    assert!(!engine.initialize());
    assert_eq!(engine.phase(), EnginePhase::Active);
    assert_eq!(engine.simulation_runs(), 1);

    let reloaded: Arc<[Record]> = records.to_vec().into();
    engine.receive(&reloaded);
    assert_eq!(engine.phase(), EnginePhase::Initializing);
    assert!(engine.initialize());
    assert_eq!(engine.simulation_runs(), 2);
}
