//! Ratatui widgets for the lookup TUI.

pub mod command_bar;
pub mod help;
pub mod query_bar;
pub mod results;
pub mod schedule_grid;
pub mod tab_bar;
