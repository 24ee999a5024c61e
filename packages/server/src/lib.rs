//! Live classroom poll server.
//!
//! A teacher creates timed multiple-choice polls, students answer over
//! WebSocket, and results are pushed to everyone as they change.

pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
