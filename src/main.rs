use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use mouse_manager::cli::{
    handle_backup_command, handle_devices_command, handle_logs_command, handle_settings_command,
    BackupCommands, SettingsCommands,
};
use mouse_manager::config::{FirstRun, MousePaths, Settings};
use mouse_manager::logging;
use mouse_manager::services::Services;

#[derive(Parser)]
#[command(
    name = "mousemgr",
    version,
    about = "Detect mice and manage pointer settings with versioned backups",
    long_about = "Mouse Manager lists the mice connected to this computer, shows and \
                  changes pointer speed, acceleration, double-click time and friends, \
                  and keeps checksummed backups of those settings that can be \
                  restored at any time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// List detected mice
    Devices {
        /// Rescan instead of using the cached list
        #[arg(short, long)]
        refresh: bool,
        /// Show every field of every device
        #[arg(short, long)]
        details: bool,
    },

    /// Show or change pointer settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Create, inspect and restore settings backups
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show recent log entries
    Logs {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, Some(Commands::Tui));

    let paths = MousePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let _log_guard = logging::init(&paths.log_dir(), &settings.logging, !is_tui)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        command = command_name(&cli.command),
        "Starting"
    );

    let first_run = FirstRun::new(&paths);
    if first_run.is_first_run() {
        settings.save(&paths)?;
    }
    let welcome = first_run.take_welcome()?;
    if let (Some(message), false) = (welcome, is_tui) {
        println!("{}", message);
        println!();
    }

    let services = Services::for_platform(paths, settings);
    services.check_permissions();

    match cli.command {
        Some(Commands::Tui) => {
            mouse_manager::tui::run_tui(&services, welcome)?;
        }
        Some(Commands::Devices { refresh, details }) => {
            handle_devices_command(&services, refresh, details)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&services, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&services, cmd)?;
        }
        Some(Commands::Logs { count }) => {
            handle_logs_command(&services, count)?;
        }
        Some(Commands::Config) => print_config(&services),
        None => {
            println!("Mouse Manager - mouse detection and settings backup");
            println!();
            println!("Run 'mousemgr --help' for usage information.");
            println!("Run 'mousemgr tui' to launch the interactive interface.");
        }
    }

    Ok(())
}

fn command_name(command: &Option<Commands>) -> &'static str {
    match command {
        Some(Commands::Tui) => "tui",
        Some(Commands::Devices { .. }) => "devices",
        Some(Commands::Settings(_)) => "settings",
        Some(Commands::Backup(_)) => "backup",
        Some(Commands::Logs { .. }) => "logs",
        Some(Commands::Config) => "config",
        None => "none",
    }
}

fn print_config(services: &Services) {
    let paths = services.paths();
    let settings = services.settings();
    let retention = &settings.retention;
    let limit = |v: Option<String>| v.unwrap_or_else(|| "none".to_string());

    println!("Mouse Manager Configuration");
    println!("===========================");
    println!("Config directory: {}", paths.config_dir().display());
    println!("Backup directory: {}", settings.backup_dir(paths).display());
    println!("Log directory:    {}", paths.log_dir().display());
    let info = services.system().info();
    println!("Settings backend: {}", info.backend);
    println!(
        "Administrator:    {}",
        if info.admin_required { "not elevated (some changes may be refused)" } else { "ok" }
    );
    for (label, value) in info.summary() {
        println!("{:<17} {}", format!("{}:", label), value);
    }
    println!();
    println!("Retention:");
    println!("  Always keep newest: {}", retention.keep_latest);
    println!("  Max backups:        {}", limit(retention.max_count.map(|n| n.to_string())));
    println!("  Max age (days):     {}", limit(retention.max_age_days.map(|n| n.to_string())));
    println!(
        "  Compress after:     {}",
        limit(retention.compress_after_days.map(|n| format!("{} days", n)))
    );
    println!();
    println!("Logging:");
    println!("  Level:     {}", settings.logging.level);
    println!("  Keep files: {}", settings.logging.max_files);
    println!();
    println!("Auto backup before change: {}", settings.auto_backup_before_change);
    println!("Device cache:              {} ms", settings.device_cache_ms);
}
