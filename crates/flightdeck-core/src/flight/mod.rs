mod controller;
mod plan;
mod session;

pub use controller::{FlightCommand, FlightController, Navigator, NoopNavigator};
pub use plan::FlightPlan;
pub use session::{progress_fraction, FlightSession, SessionState};
