//! Template structs and render helpers.

pub mod views;
