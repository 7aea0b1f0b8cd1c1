//! Integration tests for the SQLite repositories against an in-memory
//! database.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};
use praxis_core::{AppointmentRepository, IntegrationRepository, WorkingHoursProvider};
use praxis_domain::{
    Appointment, AppointmentOrigin, AppointmentStatus, CalendarIntegration, WorkingHoursConfig,
};
use praxis_infra::{
    open_in_memory_pool, open_pool, SqliteAppointmentRepository, SqliteIntegrationRepository,
    SqliteWorkingHoursProvider,
};
use uuid::Uuid;

fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap().and_hms_opt(hour, minute, 0).unwrap()
}

fn appointment(
    professional_id: Uuid,
    start: NaiveDateTime,
    duration_minutes: Option<u32>,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        contact_id: Uuid::new_v4(),
        professional_id,
        title: Some("Consultation".to_string()),
        scheduled_start: start,
        duration_minutes,
        status: AppointmentStatus::Scheduled,
        origin: AppointmentOrigin::Local,
        external_event_id: None,
    }
}

fn integration(professional_id: Uuid, created_offset_secs: i64) -> CalendarIntegration {
    CalendarIntegration {
        id: Uuid::new_v4(),
        professional_id,
        provider: "google".to_string(),
        calendar_id: "primary".to_string(),
        sync_enabled: true,
        access_token: Some("token".to_string()),
        created_at: DateTime::<Utc>::from_timestamp(1_700_000_000 + created_offset_secs, 0)
            .unwrap(),
    }
}

#[tokio::test]
async fn on_disk_pool_bootstraps_schema_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("praxis.db");
    let professional = Uuid::new_v4();

    {
        let pool = open_pool(&db_path).unwrap();
        let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
        repo.insert(&appointment(professional, monday_at(9, 0), Some(30))).unwrap();
    }

    // A fresh pool over the same file sees the committed row.
    let pool = open_pool(&db_path).unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let found = repo.query_range(monday_at(9, 0), monday_at(10, 0), Some(professional))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[tokio::test]
async fn range_query_applies_strict_overlap() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    let inside = appointment(professional, monday_at(9, 0), Some(60));
    let inside_id = inside.id;
    repo.insert(&inside).unwrap();
    // Ends exactly at the window start; must not match.
    repo.insert(&appointment(professional, monday_at(8, 30), Some(60))).unwrap();
    // Starts exactly at the window end; must not match.
    repo.insert(&appointment(professional, monday_at(10, 0), Some(60))).unwrap();

    let found = repo.query_range(monday_at(9, 30), monday_at(10, 0), Some(professional))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, inside_id);
}

#[tokio::test]
async fn cancelled_appointments_are_not_returned() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    let mut cancelled = appointment(professional, monday_at(9, 0), Some(60));
    cancelled.status = AppointmentStatus::Cancelled;
    repo.insert(&cancelled).unwrap();

    let found = repo.query_range(monday_at(9, 0), monday_at(10, 0), Some(professional))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn legacy_null_duration_blocks_a_full_hour() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    repo.insert(&appointment(professional, monday_at(9, 0), None)).unwrap();

    // 09:45 falls inside the implied 60-minute extent.
    let found = repo.query_range(monday_at(9, 45), monday_at(10, 15), Some(professional))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].effective_duration_minutes(), 60);

    // 10:00 onward is free again.
    let clear = repo.query_range(monday_at(10, 0), monday_at(10, 30), Some(professional))
        .await
        .unwrap();
    assert!(clear.is_empty());
}

#[tokio::test]
async fn range_query_is_scoped_to_the_professional() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let ours = Uuid::new_v4();
    let theirs = Uuid::new_v4();

    repo.insert(&appointment(theirs, monday_at(9, 0), Some(60))).unwrap();

    let found = repo.query_range(monday_at(9, 0), monday_at(10, 0), Some(ours)).await.unwrap();
    assert!(found.is_empty());

    // Without a professional filter the appointment is visible.
    let all = repo.query_range(monday_at(9, 0), monday_at(10, 0), None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn range_results_are_ordered_by_start() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    repo.insert(&appointment(professional, monday_at(11, 0), Some(60))).unwrap();
    repo.insert(&appointment(professional, monday_at(9, 0), Some(60))).unwrap();
    repo.insert(&appointment(professional, monday_at(10, 0), Some(60))).unwrap();

    let found = repo.query_range(monday_at(8, 0), monday_at(13, 0), Some(professional))
        .await
        .unwrap();
    let starts: Vec<NaiveDateTime> = found.iter().map(|a| a.scheduled_start).collect();
    assert_eq!(starts, vec![monday_at(9, 0), monday_at(10, 0), monday_at(11, 0)]);
}

#[tokio::test]
async fn find_for_day_filters_date_and_professional() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    repo.insert(&appointment(professional, monday_at(9, 0), Some(30))).unwrap();
    let tuesday =
        NaiveDate::from_ymd_opt(2024, 6, 11).unwrap().and_hms_opt(9, 0, 0).unwrap();
    repo.insert(&appointment(professional, tuesday, Some(30))).unwrap();
    repo.insert(&appointment(Uuid::new_v4(), monday_at(10, 0), Some(30))).unwrap();

    let monday = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let found = repo.find_for_day(monday, professional).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].scheduled_start, monday_at(9, 0));
}

#[tokio::test]
async fn appointment_round_trip_preserves_fields() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteAppointmentRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    let mut original = appointment(professional, monday_at(14, 0), Some(45));
    original.origin = AppointmentOrigin::External;
    original.external_event_id = Some("evt-123".to_string());
    original.status = AppointmentStatus::Confirmed;
    repo.insert(&original).unwrap();

    let found = repo.query_range(monday_at(14, 0), monday_at(15, 0), Some(professional))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    let read = &found[0];
    assert_eq!(read.id, original.id);
    assert_eq!(read.title.as_deref(), Some("Consultation"));
    assert_eq!(read.duration_minutes, Some(45));
    assert_eq!(read.status, AppointmentStatus::Confirmed);
    assert_eq!(read.origin, AppointmentOrigin::External);
    assert_eq!(read.external_event_id.as_deref(), Some("evt-123"));
}

#[tokio::test]
async fn only_syncable_integrations_are_returned_in_creation_order() {
    let pool = open_in_memory_pool().unwrap();
    let repo = SqliteIntegrationRepository::new(Arc::clone(&pool));
    let professional = Uuid::new_v4();

    let newer = integration(professional, 120);
    let older = integration(professional, 0);
    let mut disabled = integration(professional, 30);
    disabled.sync_enabled = false;
    let mut token_less = integration(professional, 60);
    token_less.access_token = None;
    let mut empty_token = integration(professional, 90);
    empty_token.access_token = Some(String::new());

    for row in [&newer, &older, &disabled, &token_less, &empty_token] {
        repo.insert(row).unwrap();
    }
    // Another professional's connection never leaks in.
    repo.insert(&integration(Uuid::new_v4(), 10)).unwrap();

    let found = repo.syncable_for_professional(professional).await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].id, older.id);
    assert_eq!(found[1].id, newer.id);
}

#[tokio::test]
async fn missing_settings_row_yields_permissive_default() {
    let pool = open_in_memory_pool().unwrap();
    let provider = SqliteWorkingHoursProvider::new(Arc::clone(&pool));

    let config = provider.get(Uuid::new_v4()).await.unwrap();

    assert!(config.working_days.is_none());
    assert!(config.work_start.is_none());
    assert!(!config.has_lunch_break);
}

#[tokio::test]
async fn settings_round_trip() {
    let pool = open_in_memory_pool().unwrap();
    let provider = SqliteWorkingHoursProvider::new(Arc::clone(&pool));
    let clinic = Uuid::new_v4();

    let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    let config = WorkingHoursConfig::weekdays_with_lunch(hm(8, 0), hm(18, 0), hm(12, 0), hm(13, 0));
    provider.upsert(clinic, &config).unwrap();

    let read = provider.get(clinic).await.unwrap();

    let days = read.working_days.unwrap();
    assert_eq!(days.len(), 5);
    assert!(days.contains(&Weekday::Mon));
    assert!(!days.contains(&Weekday::Sat));
    assert_eq!(read.work_start, Some(hm(8, 0)));
    assert_eq!(read.lunch_end, Some(hm(13, 0)));
    assert!(read.has_lunch_break);
}

#[tokio::test]
async fn unparsable_settings_fields_degrade_to_absent() {
    let pool = open_in_memory_pool().unwrap();
    let provider = SqliteWorkingHoursProvider::new(Arc::clone(&pool));
    let clinic = Uuid::new_v4();

    {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO clinic_settings
                 (clinic_id, working_days, work_start, work_end, has_lunch_break)
             VALUES (?1, 'mon,funday', 'not-a-time', '18:00', 1)",
            rusqlite::params![clinic.to_string()],
        )
        .unwrap();
    }

    let config = provider.get(clinic).await.unwrap();

    // Fail-open: the broken pieces vanish instead of erroring out.
    assert!(config.working_days.is_none());
    assert!(config.work_start.is_none());
    assert_eq!(config.work_end, Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
    assert!(config.has_lunch_break);
}
