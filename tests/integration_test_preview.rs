mod common;

use common::{date, slot, weekly_definition, TestApp};
use schedule_core::domain::models::preview::{PreviewStage, Severity};
use schedule_core::domain::models::directory::Teacher;

#[tokio::test]
async fn test_happy_path_preview() {
    let app = TestApp::new();
    let mut definition = weekly_definition(
        "Happy Path",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(3, 9, 0)],
        8,
        1,
    );
    definition.default_room_id = Some("r1".to_string());
    definition.default_teacher_id = Some("t1".to_string());

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert!(result.can_create);
    assert_eq!(result.stage_reached, PreviewStage::Done);
    assert!(result.issues.is_empty());
    assert!(result.conflict_report.is_empty());
    assert_eq!(result.session_preview.len(), 8);
}

#[tokio::test]
async fn test_structural_issues_halt_before_generation() {
    let app = TestApp::new();
    // 7 hours cannot be split into 2-hour sessions.
    let definition = weekly_definition("Bad Hours", date(2025, 1, 6), vec![slot(1, 9, 0)], 7, 2);

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert!(!result.can_create);
    assert_eq!(result.stage_reached, PreviewStage::ValidatingStructure);
    assert!(result
        .issues
        .iter()
        .any(|i| i.code == "total_hours_not_divisible"));
    assert!(result.session_preview.is_empty());
    assert!(result.holiday_impacts.is_empty());
}

#[tokio::test]
async fn test_duplicate_slot_weekday_is_structural() {
    let app = TestApp::new();
    let definition = weekly_definition(
        "Dup Weekday",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(1, 14, 0)],
        4,
        1,
    );

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert_eq!(result.stage_reached, PreviewStage::ValidatingStructure);
    assert!(result
        .issues
        .iter()
        .any(|i| i.code == "slot_weekday_duplicate"));
}

#[tokio::test]
async fn test_slot_count_must_match_sessions_per_week() {
    let app = TestApp::new();
    let mut definition =
        weekly_definition("Mismatch", date(2025, 1, 6), vec![slot(1, 9, 0)], 4, 1);
    definition.session_per_week = 2;

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert!(result.issues.iter().any(|i| i.code == "slot_count_mismatch"));
}

#[tokio::test]
async fn test_missing_branch_is_fatal_domain_issue() {
    let app = TestApp::new();
    let mut definition =
        weekly_definition("No Branch", date(2025, 1, 6), vec![slot(1, 9, 0)], 4, 1);
    definition.branch_id = "nope".to_string();

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert!(!result.can_create);
    assert_eq!(result.stage_reached, PreviewStage::ValidatingDomain);
    assert!(result.issues.iter().any(|i| i.code == "branch_not_found"));
    assert!(result.session_preview.is_empty());
}

#[tokio::test]
async fn test_unpaid_group_member_is_advisory() {
    let app = TestApp::new();
    app.add_group("g1", &["s1"], &["s2"]);

    let mut definition =
        weekly_definition("Class", date(2025, 1, 6), vec![slot(1, 9, 0)], 4, 1);
    definition.group_id = Some("g1".to_string());
    definition.participant_user_ids = vec![];

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    // Advisory: the pipeline still runs to completion with a full preview,
    // but creation is gated.
    assert!(!result.can_create);
    assert_eq!(result.stage_reached, PreviewStage::Done);
    assert_eq!(result.session_preview.len(), 4);

    let issue = result
        .issues
        .iter()
        .find(|i| i.code == "group_member_unpaid")
        .unwrap();
    assert_eq!(issue.severity, Severity::Error);
    assert_eq!(issue.details["student_ids"][0], "s2");
}

#[tokio::test]
async fn test_inactive_teacher_is_advisory() {
    let app = TestApp::new();
    app.directory.add_teacher(Teacher {
        id: "t9".to_string(),
        name: "Lee".to_string(),
        active: false,
    });

    let mut definition =
        weekly_definition("Inactive", date(2025, 1, 6), vec![slot(1, 9, 0)], 4, 1);
    definition.default_teacher_id = Some("t9".to_string());

    let result = app.state.preview_service.preview(&definition).await.unwrap();
    assert!(!result.can_create);
    assert_eq!(result.stage_reached, PreviewStage::Done);
    assert_eq!(result.session_preview.len(), 4);
    assert!(result
        .issues
        .iter()
        .any(|i| i.code == "teacher_not_authorized"));
}

#[tokio::test]
async fn test_preview_is_repeatable() {
    let app = TestApp::new();
    let definition = weekly_definition(
        "Repeatable",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(3, 9, 0)],
        8,
        1,
    );

    let first = app.state.preview_service.preview(&definition).await.unwrap();
    let second = app.state.preview_service.preview(&definition).await.unwrap();

    assert_eq!(first.can_create, second.can_create);
    assert_eq!(first.session_preview, second.session_preview);
    assert_eq!(app.store.schedule_count(), 0, "preview never persists");
}
