//! Command implementations.

pub mod install;
pub mod list_rules;
pub mod print;
pub mod verify;
