//! Theme values and the light/dark flip.
//!
//! The root attribute is free text from the page's point of view, so the flip
//! works on the raw attribute value rather than on a parsed `Theme`.

use std::fmt;

/// Theme options
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse an exact attribute/storage value. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Theme that follows the given root attribute value.
    ///
    /// Unset (or empty) reads as `light`. Exactly `"light"` goes to `dark`;
    /// every other value, recognized or not, goes back to `light`.
    pub fn next_after(current: Option<&str>) -> Self {
        match current.filter(|v| !v.is_empty()).unwrap_or("light") {
            "light" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Theme the stylesheet ends up showing for a root attribute value.
    /// Only an exact `"dark"` selects the dark rules.
    pub fn effective(attribute: Option<&str>) -> Self {
        match attribute {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
