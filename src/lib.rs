//! brewpanel — 20x4 I2C character-LCD status panel plugin for brewing
//! controllers.
//!
//! The host owns the brewing domain (steps, kettles, fermenters,
//! actors, sensors) and exposes it through the port traits in
//! [`app::ports`]. This crate renders that state onto an HD44780 panel
//! behind a PCF8574 expander: construct a
//! [`DisplayService`](app::service::DisplayService) once at startup and
//! call its `tick()` from the host's periodic task (0.7 s works well).
//!
//! All hardware-specific code is behind the `rpi` feature; the logic
//! surface tests on any host against mock ports.

#![deny(unused_must_use)]

pub mod app;
pub mod charmap;
pub mod config;
pub mod interval;
pub mod screen;

mod error;

pub mod adapters;
pub mod drivers;
pub mod render;

pub use error::{DisplayError, Error};
