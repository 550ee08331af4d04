//! Single-screen day planner: an in-memory task store filtered by calendar
//! day, with completion tracking and delayed reminder notifications, plus
//! the terminal front end that drives it.

pub mod app;
pub mod components;
pub mod config;
pub mod logging;
pub mod planner;
pub mod theme;
pub mod tui;
