//! cooler-tui - Terminal UI for the unit cooler dashboard
//!
//! This crate provides the ratatui-based terminal interface. It creates an Engine
//! from cooler-app and adds terminal rendering, event polling, and the dashboard
//! cards.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run;
