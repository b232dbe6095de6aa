//! Log CLI command

use crate::display::format_log_entries;
use crate::error::MouseResult;
use crate::logging::LogReader;
use crate::services::Services;

/// Print the most recent log entries
pub fn handle_logs_command(services: &Services, count: usize) -> MouseResult<()> {
    let reader = LogReader::new(services.paths().log_dir());
    let entries = reader.read_recent(count)?;
    print!("{}", format_log_entries(&entries));
    if entries.is_empty() {
        println!();
    }
    Ok(())
}
