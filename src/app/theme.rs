//! Theme context for Dioxus apps, backed by the same toggler as the page script.
//!
//! The signal holds the theme the stylesheet shows (`Theme::effective`); the
//! flip itself works on the raw root attribute, as on a plain page.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::host::{Page, PreferenceStore};
use crate::theme::Theme;
use crate::toggler::ThemeToggler;

/// Toggler as seen by the context: every call reports the theme now shown.
trait ThemeTarget {
    fn restore_shown(&self) -> Theme;
    fn toggle_shown(&self) -> Theme;
}

impl<P: Page, S: PreferenceStore> ThemeTarget for ThemeToggler<P, S> {
    fn restore_shown(&self) -> Theme {
        if let Err(e) = self.restore() {
            tracing::warn!("Failed to restore theme: {}", e);
        }
        self.shown()
    }

    fn toggle_shown(&self) -> Theme {
        // On a failed write the attribute may already be flipped
        self.toggle().unwrap_or_else(|_| self.shown())
    }
}

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    current: Signal<Theme>,
    target: Signal<Rc<dyn ThemeTarget>>,
}

impl ThemeContext {
    /// Get current theme
    pub fn get(&self) -> Theme {
        (self.current)()
    }

    /// Flip and persist the theme, returning the theme now shown
    pub fn toggle(&self) -> Theme {
        let next = self.target.peek().toggle_shown();
        let mut current = self.current;
        current.set(next);
        next
    }
}

/// Initialize theme context provider over a given toggler - call once at app root.
///
/// The saved theme is restored when the provider is first created.
pub fn use_theme_provider_with<P, S>(init: impl FnOnce() -> ThemeToggler<P, S>) -> ThemeContext
where
    P: Page + 'static,
    S: PreferenceStore + 'static,
{
    let target = use_signal(move || Rc::new(init()) as Rc<dyn ThemeTarget>);
    let current = use_signal(|| target.peek().restore_shown());
    use_context_provider(|| ThemeContext { current, target })
}

/// Initialize theme context provider for the current page - call once at app root.
///
/// In the browser this is `localStorage` and the document root; elsewhere an
/// in-memory page that lives as long as the app.
pub fn use_theme_provider() -> ThemeContext {
    #[cfg(target_arch = "wasm32")]
    {
        use crate::web::{BrowserPage, LocalStorage};

        match BrowserPage::current() {
            Ok(page) => {
                return use_theme_provider_with(move || {
                    ThemeToggler::new(page, LocalStorage, Default::default())
                });
            }
            Err(e) => tracing::warn!("No document, theme kept in memory: {}", e),
        }
    }

    use_theme_provider_with(|| {
        ThemeToggler::new(
            crate::sim::SimulatedPage::new(),
            crate::sim::MemoryStore::new(),
            Default::default(),
        )
    })
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}
