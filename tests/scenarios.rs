//! End-to-end scenarios: JSON input through validation, layout and overlay.

use chrono::NaiveDate;
use gantt_timeline::chart::{ChartLayout, OverlayMode, OverlayState, RowMetrics};
use gantt_timeline::io::parse_tasks;
use gantt_timeline::model::{validate_dependencies, TaskPosition, TimelineRange};
use gantt_timeline::{GanttError, Task};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn scenario_a() -> Vec<Task> {
    parse_tasks(
        r#"[
            {"key": 1, "name": "Design", "start_date": "2024-01-01", "end_date": "2024-01-31"},
            {"key": 2, "name": "Build", "start_date": "2024-02-01", "end_date": "2024-02-15", "depends": [1]}
        ]"#,
    )
    .unwrap()
}

#[test]
fn scenario_a_valid_chain_lays_out() {
    let tasks = scenario_a();
    assert!(validate_dependencies(&tasks).is_ok());

    let range = TimelineRange::compute(&tasks).unwrap();
    assert_eq!(range.months, vec![d(2024, 1, 1), d(2024, 2, 1)]);

    let first = TaskPosition::compute(&tasks[0], range.min_date, range.max_date);
    let second = TaskPosition::compute(&tasks[1], range.min_date, range.max_date);
    assert_eq!(first.left, 0.0);
    // 31 days into a 59-day span (Jan 1 to Feb 29, 2024).
    assert!((second.left - 52.542_372_881).abs() < 1e-6);
    assert_eq!(first.css_left(), "0%");
}

#[test]
fn scenario_b_start_before_dependency_end() {
    let mut tasks = scenario_a();
    tasks[1].start_date = d(2024, 1, 15);
    let err = validate_dependencies(&tasks).unwrap_err();
    assert!(matches!(
        err,
        GanttError::TemporalViolation { task_key: 2, dependency_key: 1, .. }
    ));
    let msg = err.to_string();
    assert!(msg.contains("Build") && msg.contains("Design"));
    assert!(msg.contains("2024-01-15") && msg.contains("2024-01-31"));
}

#[test]
fn scenario_c_missing_dependency() {
    let mut tasks = scenario_a();
    tasks[1].depends = vec![99];
    let err = validate_dependencies(&tasks).unwrap_err();
    assert!(matches!(err, GanttError::MissingDependency { missing_key: 99, .. }));
    assert!(err.to_string().contains("99"));
}

#[test]
fn scenario_d_hover_emphasis() {
    let mut tasks = scenario_a();
    tasks.push(Task::new(3, "Docs", d(2024, 2, 1), d(2024, 2, 5)));

    let mut overlay = OverlayState::new(OverlayMode::Hover);
    overlay.hover_task(Some(1));

    let dependent = &tasks[1];
    assert!(overlay.should_show_arrow(dependent));
    assert!(overlay.is_highlighted(dependent));
    assert_eq!(overlay.opacity(overlay.is_highlighted(dependent)), 1.0);

    let unrelated = &tasks[2];
    assert_eq!(overlay.opacity(overlay.is_highlighted(unrelated)), 0.2);
}

#[test]
fn non_array_root_is_malformed() {
    for input in [r#"{"tasks": []}"#, "42", r#""text""#, "not json"] {
        assert!(
            matches!(parse_tasks(input), Err(GanttError::MalformedInput(_))),
            "{input}"
        );
    }
}

#[test]
fn full_layout_serializes_for_renderers() {
    let tasks = scenario_a();
    let layout = ChartLayout::build(&tasks).unwrap();
    let rects = layout.bar_rects(&RowMetrics::default());
    let view = layout.overlay_view(&OverlayState::new(OverlayMode::All), &rects);

    let json = serde_json::json!({ "layout": layout, "overlay": view });
    assert_eq!(json["layout"]["timeline"]["min_date"], "2024-01-01");
    assert_eq!(json["layout"]["timeline"]["max_date"], "2024-02-29");
    assert_eq!(json["layout"]["timeline"]["years"][0]["month_count"], 2);
    assert_eq!(json["layout"]["groups"][0]["name"], "Ungrouped");
    assert_eq!(json["overlay"]["mode"], "all");
    assert_eq!(json["overlay"]["arrows"][0]["color"], "hsl(282, 70%, 50%)");
    assert!(json["overlay"]["arrows"][0]["path"]["start"]["x"].is_number());
}
