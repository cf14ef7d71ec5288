//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: weather, translation and speech requests
//! - Terminal events: user input and terminal ticks
//! - Scheduled tasks: periodic refresh tied to the app lifecycle

pub mod network;
pub mod schedule;
pub mod terminal;
