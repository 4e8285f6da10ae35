//! FFI surface for the MiniCRM desktop front-end.

pub mod api;
