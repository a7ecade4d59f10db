use chorebook_core::db::open_db_in_memory;
use chorebook_core::{
    ChildService, ChoreDueState, ChoreService, FixedClock, Frequency, HistoryService,
    ServiceError, SqliteChildRepository, SqliteChoreRepository, SqliteHistoryRepository,
};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add_child(conn: &Connection, clock: &FixedClock) -> i64 {
    ChildService::new(SqliteChildRepository::new(conn), clock)
        .create_child("Ada")
        .unwrap()
        .id
}

fn completion_rows(conn: &Connection, chore_id: i64) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM chore_completions WHERE chore_id = ?1;",
        [chore_id],
        |row| row.get(0),
    )
    .unwrap()
}

fn find(states: &[ChoreDueState], chore_id: i64) -> Option<&ChoreDueState> {
    states.iter().find(|state| state.id == chore_id)
}

#[test]
fn mark_complete_is_idempotent_within_period() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();

    let first = service.mark_complete(chore.id).unwrap();
    assert!(!first.already_completed);

    clock.set(date(2024, 5, 15).and_time(NaiveTime::from_hms_opt(18, 30, 0).unwrap()));
    let second = service.mark_complete(chore.id).unwrap();
    assert!(second.already_completed);
    assert_eq!(second.completion.completed_at, first.completion.completed_at);
    assert_eq!(completion_rows(&conn, chore.id), 1);
}

#[test]
fn mark_complete_requires_active_chore() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();
    service.delete_chore(chore.id).unwrap();

    assert!(matches!(
        service.mark_complete(chore.id).unwrap_err(),
        ServiceError::ChoreNotFound(_)
    ));
    assert!(matches!(
        service.mark_complete(404).unwrap_err(),
        ServiceError::ChoreNotFound(404)
    ));
}

#[test]
fn mark_incomplete_then_complete_creates_fresh_completion() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();

    let first = service.mark_complete(chore.id).unwrap();
    assert_eq!(service.mark_incomplete(chore.id).unwrap(), 1);

    let states = service.due_state(child_id).unwrap();
    let state = find(&states, chore.id).unwrap();
    assert!(!state.completed);
    assert_eq!(state.completed_at, None);

    clock.set(date(2024, 5, 15).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    let again = service.mark_complete(chore.id).unwrap();
    assert!(!again.already_completed);
    assert_ne!(again.completion.id, first.completion.id);
    assert_eq!(again.completion.completed_at.time().to_string(), "12:00:00");
}

#[test]
fn mark_incomplete_accepts_inactive_chore() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();
    service.mark_complete(chore.id).unwrap();
    service.delete_chore(chore.id).unwrap();

    assert_eq!(service.mark_incomplete(chore.id).unwrap(), 1);
    assert!(matches!(
        service.mark_incomplete(404).unwrap_err(),
        ServiceError::ChoreNotFound(404)
    ));
}

#[test]
fn daily_mark_incomplete_only_clears_today() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 14));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();

    service.mark_complete(chore.id).unwrap();
    clock.advance_days(1);
    service.mark_complete(chore.id).unwrap();

    assert_eq!(service.mark_incomplete(chore.id).unwrap(), 1);
    assert_eq!(completion_rows(&conn, chore.id), 1);
}

#[test]
fn daily_chore_resets_next_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();
    service.mark_complete(chore.id).unwrap();

    assert!(find(&service.due_state(child_id).unwrap(), chore.id).unwrap().completed);
    clock.advance_days(1);
    assert!(!find(&service.due_state(child_id).unwrap(), chore.id).unwrap().completed);
}

#[test]
fn weekly_completion_holds_until_next_monday() {
    let conn = open_db_in_memory().unwrap();
    // 2024-05-13 is a Monday.
    let clock = FixedClock::at_date(date(2024, 5, 13));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Bins", "weekly").unwrap();
    let outcome = service.mark_complete(chore.id).unwrap();
    assert_eq!(outcome.completion.date, date(2024, 5, 13));

    for _ in 0..6 {
        clock.advance_days(1);
        let states = service.due_state(child_id).unwrap();
        let state = find(&states, chore.id).unwrap();
        assert!(state.completed, "still completed on {}", clock_today(&clock));
        assert_eq!(state.completed_at, Some(outcome.completion.completed_at));
    }

    clock.advance_days(1);
    assert_eq!(clock_today(&clock), date(2024, 5, 20));
    assert!(!find(&service.due_state(child_id).unwrap(), chore.id).unwrap().completed);
}

#[test]
fn weekly_mark_complete_mid_week_sees_monday_completion() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 13));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Bins", "weekly").unwrap();
    let monday = service.mark_complete(chore.id).unwrap();

    clock.set_date(date(2024, 5, 15));
    let wednesday = service.mark_complete(chore.id).unwrap();
    assert!(wednesday.already_completed);
    assert_eq!(wednesday.completion.date, monday.completion.date);
    assert_eq!(completion_rows(&conn, chore.id), 1);

    assert_eq!(service.mark_incomplete(chore.id).unwrap(), 1);
    assert_eq!(completion_rows(&conn, chore.id), 0);
}

#[test]
fn monthly_completion_resets_on_first_of_month() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 2, 10));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Tidy closet", "monthly").unwrap();
    service.mark_complete(chore.id).unwrap();

    clock.set_date(date(2024, 2, 29));
    assert!(find(&service.due_state(child_id).unwrap(), chore.id).unwrap().completed);
    clock.set_date(date(2024, 3, 1));
    assert!(!find(&service.due_state(child_id).unwrap(), chore.id).unwrap().completed);
}

#[test]
fn one_off_without_completion_disappears_next_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Clean garage", "oneoff").unwrap();

    let state = service.due_state(child_id).unwrap();
    assert!(!find(&state, chore.id).unwrap().completed);

    clock.advance_days(1);
    assert!(find(&service.due_state(child_id).unwrap(), chore.id).is_none());
}

#[test]
fn one_off_completed_on_creation_day_disappears_next_day() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Clean garage", "oneoff").unwrap();
    service.mark_complete(chore.id).unwrap();

    let states = service.due_state(child_id).unwrap();
    let state = find(&states, chore.id).unwrap();
    assert!(state.completed);
    assert_eq!(state.frequency, Frequency::OneOff);

    clock.advance_days(1);
    assert!(find(&service.due_state(child_id).unwrap(), chore.id).is_none());
    assert!(matches!(
        service.mark_complete(chore.id).unwrap_err(),
        ServiceError::ChoreNotFound(_)
    ));
}

#[test]
fn due_state_orders_by_frequency_rank_then_display_order_then_id() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);

    let one_off = service.create_chore(child_id, "Garage", "oneoff").unwrap();
    let monthly = service.create_chore(child_id, "Closet", "monthly").unwrap();
    let weekly = service.create_chore(child_id, "Bins", "weekly").unwrap();
    let daily_a = service.create_chore(child_id, "Dishes", "daily").unwrap();
    let daily_b = service.create_chore(child_id, "Bed", "daily").unwrap();
    service
        .update_chore(
            daily_b.id,
            &chorebook_core::ChorePatch {
                display_order: Some(0),
                ..Default::default()
            },
        )
        .unwrap();

    let order: Vec<i64> = service
        .due_state(child_id)
        .unwrap()
        .iter()
        .map(|state| state.id)
        .collect();
    assert_eq!(
        order,
        vec![daily_b.id, daily_a.id, weekly.id, monthly.id, one_off.id]
    );
}

#[test]
fn due_state_for_unknown_child_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    assert!(service.due_state(77).unwrap().is_empty());
}

#[test]
fn soft_deleted_chore_leaves_due_state_but_keeps_history() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);
    let chore = service.create_chore(child_id, "Dishes", "daily").unwrap();
    service.mark_complete(chore.id).unwrap();

    service.delete_chore(chore.id).unwrap();
    assert!(find(&service.due_state(child_id).unwrap(), chore.id).is_none());

    let history = HistoryService::new(SqliteHistoryRepository::new(&conn), &clock)
        .child_history(child_id, None)
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].chores[0].chore_id, chore.id);
    assert_eq!(history[0].chores[0].title, "Dishes");
}

#[test]
fn legacy_null_frequency_reads_as_daily() {
    let conn = open_db_in_memory().unwrap();
    let clock = FixedClock::at_date(date(2024, 5, 15));
    let child_id = add_child(&conn, &clock);
    conn.execute(
        "INSERT INTO chores (child_id, title, frequency, display_order, is_active, created_at)
         VALUES (?1, 'Legacy', NULL, 1, 1, '2024-01-01 08:00:00');",
        [child_id],
    )
    .unwrap();
    let service = ChoreService::new(SqliteChoreRepository::new(&conn), &clock);

    let states = service.due_state(child_id).unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].frequency, Frequency::Daily);
}

fn clock_today(clock: &FixedClock) -> NaiveDate {
    use chorebook_core::Clock;
    clock.today()
}
