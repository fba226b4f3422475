//! CLI infrastructure for the free-energy landscape toolkit
//!
//! This module provides the command-line interface for rendering, summarising
//! and exporting landscapes computed from two-column projection files.

pub mod commands;
pub mod config;
pub mod output;
