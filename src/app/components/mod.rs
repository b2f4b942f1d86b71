//! Shared UI components for Dioxus apps.

pub mod theme;

pub use theme::ThemeToggleButton;
