//! Dioxus integration: theme context and toggle button.

pub mod components;
pub mod theme;

pub use components::ThemeToggleButton;
pub use theme::{use_theme, use_theme_provider, use_theme_provider_with, ThemeContext};
