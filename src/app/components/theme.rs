//! Light/dark toggle button for Dioxus apps.

use dioxus::prelude::*;

use crate::app::theme::use_theme;

/// Button flipping between light and dark. Needs `use_theme_provider` above it.
#[component]
pub fn ThemeToggleButton() -> Element {
    let theme = use_theme();
    let shown = theme.get();
    let title = format!("Switch to {} theme", shown.toggled().label());
    let label = shown.label();

    rsx! {
        button {
            class: "theme-toggle",
            r#type: "button",
            title: "{title}",
            "data-theme-current": shown.as_str(),
            onclick: move |_| {
                theme.toggle();
            },
            "{label}"
        }
    }
}
