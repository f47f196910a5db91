//! Integration tests: flights flown through the controller end up in the
//! SQLite-backed history and are reflected in the statistics.

use flightdeck_core::storage::FLIGHTS_KEY;
use flightdeck_core::{
    FlightCommand, FlightController, FlightLog, FlightPlan, FlightStatus, KeyValueStore,
    NoopNavigator, Preferences, SqliteStore,
};

fn plan(origin: &str, destination: &str, minutes: f64) -> FlightPlan {
    FlightPlan::new(origin, destination, minutes).unwrap()
}

#[test]
fn flights_persist_across_store_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flightdeck.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();

        let (mut controller, _) =
            FlightController::depart(plan("LHR", "DXB", 0.05), &store, NoopNavigator);
        for _ in 0..3 {
            controller.tick();
        }
        assert!(controller.session().is_ended());

        let (mut controller, _) =
            FlightController::depart(plan("GLA", "JFK", 90.0), &store, NoopNavigator);
        controller.apply(FlightCommand::TogglePause);
        controller.apply(FlightCommand::End);
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let stats = FlightLog::new(&store).stats();
    assert_eq!(stats.flight_count, 2);
    assert_eq!(stats.completed_count, 1);
    assert_eq!(stats.aborted_count, 1);
    assert!((stats.total_minutes - 90.05).abs() < 1e-9);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.recent.len(), 2);
}

#[test]
fn legacy_history_is_kept_and_counted() {
    let store = SqliteStore::open_memory().unwrap();
    store
        .set(
            FLIGHTS_KEY,
            r#"[
                {"origin":"EDI","destination":"AMS","duration":40,"startedAt":"2023-11-02T07:00:00Z","status":"completed"},
                {"origin":"EDI","destination":"AMS","duration":"forty"},
                {"durationMinutes":15,"startedAt":"2023-11-03T07:00:00Z","endedAt":"2023-11-03T07:15:00Z","status":"aborted"}
            ]"#,
        )
        .unwrap();

    let (_controller, _) = FlightController::depart(
        FlightPlan::from_route(Some("EDI"), Some("CDG"), Some("0")),
        &store,
        NoopNavigator,
    );

    let log = FlightLog::new(&store);
    assert_eq!(log.load_raw().unwrap().len(), 4);

    let stats = log.stats();
    assert_eq!(stats.flight_count, 3);
    assert_eq!(stats.total_minutes, 55.0);
    assert_eq!(stats.completed_count, 2);
    assert_eq!(stats.aborted_count, 1);
    assert_eq!(stats.streak_days, 3);
    assert_eq!(stats.recent[0].destination, "CDG");
    assert_eq!(stats.recent[0].status, Some(FlightStatus::Completed));
}

#[test]
fn preferences_share_the_store_with_history() {
    let store = SqliteStore::open_memory().unwrap();
    let prefs = Preferences::new(&store);
    prefs.set_map_style("Satellite").unwrap();

    let (_controller, _) =
        FlightController::depart(FlightPlan::from_route(None, None, None), &store, NoopNavigator);

    assert_eq!(prefs.map_style_name(), "Satellite");
    assert_eq!(FlightLog::new(&store).stats().flight_count, 1);
}
