use chrono::{Local, Timelike};
use clap::Subcommand;
use flightdeck_core::display::greeting;
use flightdeck_core::{Config, FlightLog, FlightStats};

use super::open_store;

#[derive(Subcommand)]
pub enum StatsAction {
    /// All statistics as JSON
    Summary,
    /// The most recent flights as JSON
    Recent,
    /// Human-readable overview
    Show,
}

pub fn run(action: StatsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // An unreadable store reads as no history. Days are the user's days.
    let stats = match open_store(config) {
        Ok(store) => FlightLog::new(store).stats_in(&Local),
        Err(e) => {
            tracing::warn!(error = %e, "failed to open flight history");
            FlightStats::default()
        }
    };

    match action {
        StatsAction::Summary => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent => {
            println!("{}", serde_json::to_string_pretty(&stats.recent)?);
        }
        StatsAction::Show => print_overview(&stats, config),
    }
    Ok(())
}

fn print_overview(stats: &FlightStats, config: &Config) {
    println!(
        "{}, {}",
        greeting(Local::now().hour()),
        config.ui.home_city
    );
    println!();
    if stats.is_empty() {
        println!("No flights yet");
        println!("Start a flight to see stats here.");
        return;
    }

    println!("Flights            {}", stats.flight_count);
    println!("  completed        {}", stats.completed_count);
    println!("  ended early      {}", stats.aborted_count);
    println!(
        "Total focus time   {}m ({})",
        stats.total_minutes.floor(),
        stats.formatted_total()
    );
    println!("Days flown         {}", stats.streak_days);

    println!();
    println!("Recent flights");
    for entry in &stats.recent {
        let status = entry.status.map(|s| s.as_str()).unwrap_or("-");
        println!(
            "  {}  {} → {}  {}m  {}",
            entry.sort_key().with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            entry.origin,
            entry.destination,
            entry.duration_minutes,
            status
        );
    }
}
