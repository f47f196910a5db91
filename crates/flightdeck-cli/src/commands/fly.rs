use std::io::Write;

use clap::Args;
use flightdeck_core::display::{format_clock, format_minutes, progress_bar};
use flightdeck_core::{
    progress_fraction, Config, FlightCommand, FlightController, FlightEvent, FlightPlan,
    FlightRecord, FlightStatus, KeyValueStore, Navigator,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::open_store;

#[derive(Args)]
pub struct FlyArgs {
    /// Departure code or name (e.g. LHR)
    pub origin: String,
    /// Arrival code or name (e.g. DXB)
    pub destination: String,
    /// Planned duration in minutes
    #[arg(allow_hyphen_values = true)]
    pub minutes: String,
    /// Print events as JSON lines instead of a live clock
    #[arg(long)]
    pub json: bool,
}

/// Prints the landing summary; the CLI has no screen to leave.
struct TerminalNavigator {
    json: bool,
}

impl Navigator for TerminalNavigator {
    fn leave(&mut self, record: &FlightRecord) {
        if self.json {
            return;
        }
        let verb = match record.status {
            FlightStatus::Completed => "Landed",
            FlightStatus::Aborted => "Flight ended early",
        };
        println!(
            "\n{verb}: {} → {} · {}",
            record.origin,
            record.destination,
            format_minutes(record.duration_minutes)
        );
    }
}

struct Renderer {
    json: bool,
    total_secs: u64,
    bar_width: Option<usize>,
}

impl Renderer {
    fn render(&self, event: &FlightEvent) {
        if self.json {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
            return;
        }

        let mut out = std::io::stdout();
        match event {
            FlightEvent::Departed {
                origin,
                destination,
                total_secs,
                ..
            } => {
                println!("In flight: {origin} → {destination}");
                println!("p + Enter to pause/resume, e + Enter to end the flight");
                self.clock(*total_secs, 0.0);
            }
            FlightEvent::Ticked {
                remaining_secs,
                progress,
            } => self.clock(*remaining_secs, *progress),
            FlightEvent::Paused { .. } => println!("  [paused]"),
            FlightEvent::Resumed { remaining_secs, .. } => self.clock(
                *remaining_secs,
                progress_fraction(*remaining_secs, self.total_secs),
            ),
            FlightEvent::Ended { .. } | FlightEvent::Snapshot { .. } => {}
        }
        let _ = out.flush();
    }

    fn clock(&self, remaining_secs: u64, progress: f64) {
        match self.bar_width {
            Some(width) => print!(
                "\r{} {} {:>3.0}%",
                format_clock(remaining_secs),
                progress_bar(progress, width),
                progress * 100.0
            ),
            None => print!("\r{}", format_clock(remaining_secs)),
        }
    }
}

pub fn run(args: FlyArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    // Names are checked before the duration, as the planner does.
    let plan = match FlightPlan::parse_duration(&args.minutes) {
        Ok(minutes) => FlightPlan::new(&args.origin, &args.destination, minutes),
        Err(e) => FlightPlan::new(&args.origin, &args.destination, 1.0).and(Err(e)),
    }?;

    let store = open_store(config)?;
    let renderer = Renderer {
        json: args.json,
        total_secs: plan.total_secs(),
        bar_width: config
            .ui
            .show_progress_bar
            .then_some(config.ui.bar_width as usize),
    };
    let navigator = TerminalNavigator { json: args.json };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(fly(plan, store, navigator, renderer));
    // Stdin reads sit on a blocking thread; don't wait for them.
    runtime.shutdown_background();
    Ok(())
}

async fn fly<S: KeyValueStore>(
    plan: FlightPlan,
    store: S,
    navigator: TerminalNavigator,
    renderer: Renderer,
) {
    let (mut controller, departed) = FlightController::depart(plan, store, navigator);
    renderer.render(&departed);
    if departed.is_ended() {
        return;
    }

    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(read_commands(tx.clone()));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(FlightCommand::End).await;
        }
    });

    if controller.fly(rx, |event| renderer.render(event)).await.is_none() {
        tracing::warn!("flight closed without a record");
    }
}

async fn read_commands(tx: mpsc::Sender<FlightCommand>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let command = match line.trim().to_lowercase().as_str() {
            "p" | "pause" | "resume" => FlightCommand::TogglePause,
            "e" | "end" => FlightCommand::End,
            "" => continue,
            other => {
                eprintln!("unknown input '{other}': p to pause/resume, e to end");
                continue;
            }
        };
        if tx.send(command).await.is_err() {
            return;
        }
    }
    // Input is gone; keep the flight going until it lands.
    tx.closed().await;
}
