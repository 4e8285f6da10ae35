//! Headless UI state for the contacts and templates tabs.
//!
//! # Responsibility
//! - Model form fields, selection and date-picker visibility without tying
//!   core to a widget toolkit.
//! - Project stored contacts into table rows.
//!
//! Front-ends own rendering and confirmation prompts; everything they show
//! or save goes through these types.

pub mod contact_form;
pub mod table;
pub mod template_form;
