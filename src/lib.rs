//! Theme Toggle
//!
//! Light/dark display mode for a web page, persisted across visits.
//!
//! This library provides:
//! - The binary light/dark flip over the root element's theme attribute
//! - A toggler that restores the saved theme on load and persists every flip
//! - Host capability traits (storage, page, ready/click events)
//! - A browser host over `web-sys` (wasm32) and an in-process simulated host
//! - A Dioxus context and toggle button for apps built on Dioxus

pub mod app;
pub mod config;
pub mod error;
pub mod host;
#[cfg(feature = "native")]
pub mod logging;
pub mod sim;
pub mod theme;
pub mod toggler;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ToggleConfig;
pub use error::ThemeError;
pub use theme::Theme;
pub use toggler::{install, ThemeToggler};
