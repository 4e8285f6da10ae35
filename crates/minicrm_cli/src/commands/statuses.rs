use super::Session;
use anyhow::Result;
use minicrm_core::{ContactStatus, DateVisibility};
use std::io::Write;

pub fn run(session: &mut Session<'_>) -> Result<()> {
    for status in ContactStatus::ALL {
        let visibility = DateVisibility::for_status(status);
        let dates: Vec<&str> = [
            (visibility.date_called, "--date-called"),
            (visibility.date_emailed, "--date-emailed"),
        ]
        .into_iter()
        .filter_map(|(shown, flag)| shown.then_some(flag))
        .collect();

        if dates.is_empty() {
            writeln!(session.out, "{}", status.label())?;
        } else {
            writeln!(session.out, "{:<20} {}", status.label(), dates.join(" "))?;
        }
    }
    Ok(())
}
