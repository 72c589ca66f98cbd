//! UI rendering module for the TUI application.
//!
//! This module provides the user interface: the runtime loop, the main view
//! that hosts routes and modals, components, themes and utilities.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
