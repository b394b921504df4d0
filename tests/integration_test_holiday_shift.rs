mod common;

use std::collections::HashMap;

use common::{date, slot, weekly_definition, TestApp};
use schedule_core::domain::models::branch::BranchHours;
use schedule_core::domain::models::directory::Holiday;
use schedule_core::domain::services::generator::{build_plan, generate};
use schedule_core::domain::services::holiday::reschedule;

fn mon_wed_sessions() -> Vec<schedule_core::domain::models::session::CandidateSession> {
    let definition = weekly_definition(
        "Mon Wed",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(3, 9, 0)],
        8,
        1,
    );
    let plan = build_plan(&definition).unwrap();
    generate(
        &definition,
        &plan,
        8,
        1,
        BranchHours {
            open_minutes: 480,
            close_minutes: 1260,
        },
    )
    .unwrap()
}

#[test]
fn test_holiday_session_moves_to_next_template_slot() {
    // Scenario: Jan 13 is a holiday; the displaced session lands on the next
    // Mon/Wed slot after the Jan 29 tail, which is Mon Feb 3.
    let sessions = mon_wed_sessions();
    let mut holidays = HashMap::new();
    holidays.insert(date(2025, 1, 13), Some("Foundation Day".to_string()));

    let (shifted, impacts) = reschedule(&sessions, &holidays);

    assert_eq!(shifted.len(), sessions.len());
    let dates: Vec<_> = shifted.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2025, 1, 6),
            date(2025, 1, 8),
            date(2025, 1, 15),
            date(2025, 1, 20),
            date(2025, 1, 22),
            date(2025, 1, 27),
            date(2025, 1, 29),
            date(2025, 2, 3),
        ]
    );

    assert_eq!(impacts.len(), 1);
    assert_eq!(impacts[0].old_date, date(2025, 1, 13));
    assert_eq!(impacts[0].new_date, date(2025, 2, 3));
    assert_eq!(impacts[0].holiday_name.as_deref(), Some("Foundation Day"));
}

#[test]
fn test_reschedule_preserves_length_and_input() {
    let sessions = mon_wed_sessions();
    let mut holidays = HashMap::new();
    holidays.insert(date(2025, 1, 6), None);
    holidays.insert(date(2025, 1, 8), None);

    let before = sessions.clone();
    let (shifted, impacts) = reschedule(&sessions, &holidays);

    assert_eq!(sessions, before, "input must not be mutated");
    assert_eq!(shifted.len(), sessions.len());
    assert_eq!(impacts.len(), 2);
    // Replacements continue the template past the tail, in encounter order.
    assert_eq!(impacts[0].old_date, date(2025, 1, 6));
    assert_eq!(impacts[0].new_date, date(2025, 2, 3));
    assert_eq!(impacts[1].old_date, date(2025, 1, 8));
    assert_eq!(impacts[1].new_date, date(2025, 2, 5));
}

#[test]
fn test_replacement_skips_holidays_too() {
    let sessions = mon_wed_sessions();
    let mut holidays = HashMap::new();
    holidays.insert(date(2025, 1, 13), None);
    holidays.insert(date(2025, 2, 3), None); // next Monday is blocked as well

    let (shifted, impacts) = reschedule(&sessions, &holidays);
    assert_eq!(shifted.len(), sessions.len());
    assert_eq!(impacts[0].new_date, date(2025, 2, 5));
}

#[test]
fn test_no_holidays_is_identity() {
    let sessions = mon_wed_sessions();
    let (shifted, impacts) = reschedule(&sessions, &HashMap::new());
    assert_eq!(shifted, sessions);
    assert!(impacts.is_empty());
}

#[tokio::test]
async fn test_preview_reports_holiday_impacts() {
    let app = TestApp::new();
    app.holidays.add_holiday(Holiday {
        date: date(2025, 1, 13),
        name: Some("Foundation Day".to_string()),
    });

    let definition = weekly_definition(
        "Mon Wed",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(3, 9, 0)],
        8,
        1,
    );
    let result = app.state.preview_service.preview(&definition).await.unwrap();

    assert!(result.can_create, "issues: {:?}", result.issues);
    assert_eq!(result.holiday_impacts.len(), 1);
    assert_eq!(result.holiday_impacts[0].new_date, date(2025, 2, 3));
    assert_eq!(result.estimated_end_date, Some(date(2025, 2, 3)));

    // After reindexing the replacement is the last numbered session.
    let last = result.session_preview.last().unwrap();
    assert_eq!(last.date, date(2025, 2, 3));
    assert_eq!(last.session_number, 8);
    assert_eq!(last.week_number, 5);
}

#[tokio::test]
async fn test_failing_holiday_provider_is_non_fatal() {
    let app = TestApp::new();
    app.holidays.add_holiday(Holiday {
        date: date(2025, 1, 13),
        name: None,
    });
    app.holidays.set_failing(true);

    let definition = weekly_definition(
        "Mon Wed",
        date(2025, 1, 6),
        vec![slot(1, 9, 0), slot(3, 9, 0)],
        8,
        1,
    );
    let result = app.state.preview_service.preview(&definition).await.unwrap();

    assert!(result.can_create, "a warning must not gate creation");
    assert!(result
        .issues
        .iter()
        .any(|i| i.code == "holiday_provider_unavailable"));
    assert!(result.holiday_impacts.is_empty());
    assert_eq!(result.session_preview.len(), 8);
    assert_eq!(result.estimated_end_date, Some(date(2025, 1, 29)));
}
