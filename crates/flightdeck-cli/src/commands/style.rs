use clap::Subcommand;
use flightdeck_core::{Config, MapStyle, Preferences};

use super::open_store;

#[derive(Subcommand)]
pub enum StyleAction {
    /// Print the stored map style
    Get,
    /// Store a map style (free-form; unknown names render as Standard)
    Set {
        /// Style name, e.g. "Terra"
        name: String,
    },
    /// List the built-in map styles
    List,
}

pub fn run(action: StyleAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let prefs = Preferences::new(open_store(config)?);

    match action {
        StyleAction::Get => {
            println!("{}", prefs.map_style_name());
        }
        StyleAction::Set { name } => {
            prefs.set_map_style(&name)?;
            println!("ok");
        }
        StyleAction::List => {
            let current = prefs.map_style();
            for style in MapStyle::ALL {
                let marker = if style == current { "*" } else { " " };
                let palette = style.palette();
                println!(
                    "{marker} {:<11} {:<27} {}",
                    style.label(),
                    style.description(),
                    palette.accent
                );
            }
        }
    }
    Ok(())
}
