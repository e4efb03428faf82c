//! Terminal resource monitor built on a pull-based `/proc` sampler.
//!
//! [`system`] holds the sampling and derivation core and has no UI
//! dependencies; the remaining modules host it in a terminal.

pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod system;
pub mod ui;
