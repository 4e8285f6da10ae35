//! Default template seeding.
//!
//! Runs on every open: an empty `templates` table always gets the follow-up
//! template back, so the email action never starts without a template.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};

pub const DEFAULT_TEMPLATE_NAME: &str = "Follow-up";
pub const DEFAULT_TEMPLATE_SUBJECT: &str = "Following up with {{name}}";
pub const DEFAULT_TEMPLATE_BODY: &str =
    "Hi {{name}},\n\nJust following up on our previous conversation.\n\nBest regards";

pub(super) fn seed_default_template(conn: &Connection) -> DbResult<()> {
    // Single statement so concurrent openers cannot both insert.
    let inserted = conn.execute(
        "INSERT INTO templates (name, subject, body)
         SELECT ?1, ?2, ?3
         WHERE NOT EXISTS (SELECT 1 FROM templates);",
        params![
            DEFAULT_TEMPLATE_NAME,
            DEFAULT_TEMPLATE_SUBJECT,
            DEFAULT_TEMPLATE_BODY
        ],
    )?;
    if inserted > 0 {
        info!("event=db_seed module=db status=ok table=templates rows={inserted}");
    }
    Ok(())
}
