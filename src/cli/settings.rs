//! Settings CLI commands

use clap::Subcommand;

use crate::backup::RestoreOutcome;
use crate::display::{format_applied, format_settings, format_values};
use crate::error::{MouseError, MouseResult};
use crate::models::{AccelerationLevel, SettingKey};
use crate::services::Services;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current mouse settings
    Show {
        /// Show every raw key and value
        #[arg(short, long)]
        raw: bool,
    },

    /// Change one setting (e.g. `set speed 12`, `set swap on`)
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },

    /// Apply an acceleration preset: disabled, low, medium, high
    Accel {
        level: String,
    },

    /// Restore the Windows default mouse settings
    Defaults,

    /// List the settings that can be changed
    Keys,
}

/// Handle a settings command
pub fn handle_settings_command(services: &Services, cmd: SettingsCommands) -> MouseResult<()> {
    let mouse = services.mouse();

    match cmd {
        SettingsCommands::Show { raw } => {
            println!("Mouse Settings ({})", services.system().name());
            if raw {
                println!("{}", format_values(&mouse.current_values()?));
            } else {
                println!("{}", format_settings(&mouse.current()?, &services.system().info()));
            }
        }

        SettingsCommands::Set { key, value } => {
            let outcome = mouse.set_from_str(&key, &value)?;
            report(&outcome);
        }

        SettingsCommands::Accel { level } => {
            let level = AccelerationLevel::parse(&level).ok_or_else(|| {
                MouseError::Validation(format!(
                    "Unknown acceleration level '{}' (use disabled, low, medium or high)",
                    level
                ))
            })?;
            let outcome = mouse.apply_preset(level)?;
            println!("Acceleration set to {}", level);
            report(&outcome);
        }

        SettingsCommands::Defaults => {
            let outcome = mouse.reset_defaults()?;
            println!("Default settings restored");
            report(&outcome);
        }

        SettingsCommands::Keys => {
            for key in SettingKey::ALL {
                println!("  {:<24} {}", key.as_str(), key.label());
            }
        }
    }

    Ok(())
}

fn report(outcome: &RestoreOutcome) {
    println!("{}", format_applied(&outcome.applied));
    if let Some(backup) = &outcome.safety_backup {
        println!("Previous settings saved to {}", backup.filename);
    }
}
