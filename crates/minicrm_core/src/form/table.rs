//! Contact table projection.

use crate::model::contact::{Contact, ContactId, DATE_ADDED_FORMAT, FOLLOW_UP_DATE_FORMAT};
use serde::Serialize;

/// Column headings, in display order.
pub const CONTACT_COLUMNS: [&str; 10] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Website",
    "Status",
    "Date Added",
    "Date Called",
    "Date Emailed",
    "Action",
];

/// Label of the per-row action cell.
pub const EMAIL_ACTION: &str = "Email";

/// One table row, every cell already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRow {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub status: String,
    pub date_added: String,
    pub date_called: String,
    pub date_emailed: String,
    pub action: &'static str,
}

impl ContactRow {
    pub fn cells(&self) -> [String; 10] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.website.clone(),
            self.status.clone(),
            self.date_added.clone(),
            self.date_called.clone(),
            self.date_emailed.clone(),
            self.action.to_string(),
        ]
    }
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            website: contact.website.clone(),
            status: contact.status.label().to_string(),
            date_added: contact
                .date_added
                .map(|value| value.format(DATE_ADDED_FORMAT).to_string())
                .unwrap_or_default(),
            date_called: contact
                .date_called
                .map(|value| value.format(FOLLOW_UP_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            date_emailed: contact
                .date_emailed
                .map(|value| value.format(FOLLOW_UP_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            action: EMAIL_ACTION,
        }
    }
}

/// Renders rows as a fixed-width text table with a heading line.
pub fn render_text_table(rows: &[ContactRow]) -> String {
    let mut widths = CONTACT_COLUMNS.map(|heading| heading.chars().count());
    let cells: Vec<[String; 10]> = rows.iter().map(ContactRow::cells).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, CONTACT_COLUMNS.iter().copied(), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{render_text_table, ContactRow};
    use crate::model::contact::{Contact, ContactStatus};
    use chrono::NaiveDate;

    #[test]
    fn row_formats_dates_and_action() {
        let contact = Contact {
            id: 4,
            name: "Kim".to_string(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            status: ContactStatus::Called,
            notes: String::new(),
            date_added: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0),
            date_called: NaiveDate::from_ymd_opt(2024, 1, 3),
            date_emailed: None,
        };
        let row = ContactRow::from(&contact);
        assert_eq!(row.date_added, "2024-01-02 09:30:00");
        assert_eq!(row.date_called, "2024-01-03");
        assert_eq!(row.date_emailed, "");
        assert_eq!(row.action, "Email");

        let table = render_text_table(&[row]);
        let mut lines = table.lines();
        assert!(lines.next().unwrap().starts_with("ID  Name"));
        assert!(lines.next().unwrap().starts_with("4   Kim"));
    }
}
