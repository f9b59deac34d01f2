//! Terminal User Interface for the problems dashboard.
//!
//! Poll-diff-render loop on top of ratatui.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_dashboard_app, DashboardApp, PollState};
pub use event_handler::DashboardEvent;
