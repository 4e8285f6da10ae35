//! Domain model for contacts and outreach templates.
//!
//! # Responsibility
//! - Define the canonical records shared by storage, services and front-ends.
//! - Own field-level validation rules.

pub mod contact;
pub mod template;
