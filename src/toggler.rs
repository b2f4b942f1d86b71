//! Theme toggler - restores the saved theme on load and flips it on click.
//!
//! Both the root attribute and the persisted entry are written from here
//! only, attribute first, inside a single synchronous handler.

use crate::config::ToggleConfig;
use crate::error::ThemeError;
use crate::host::{HostEnvironment, Page, PreferenceStore};
use crate::theme::Theme;

/// Toggler bound to one page and one preference store
pub struct ThemeToggler<P, S> {
    page: P,
    store: S,
    config: ToggleConfig,
}

impl<P: Page, S: PreferenceStore> ThemeToggler<P, S> {
    pub fn new(page: P, store: S, config: ToggleConfig) -> Self {
        Self {
            page,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    /// Apply the persisted theme to the root attribute, if there is one.
    ///
    /// The stored value is applied verbatim, without validation. Returns the
    /// applied value, or `None` when nothing was stored (attribute untouched).
    pub fn restore(&self) -> Result<Option<String>, ThemeError> {
        let saved = self
            .store
            .get(&self.config.storage_key)?
            .filter(|v| !v.is_empty());

        let Some(saved) = saved else {
            tracing::debug!("No saved theme under {:?}", self.config.storage_key);
            return Ok(None);
        };

        if Theme::parse(&saved).is_none() {
            tracing::warn!("Applying unrecognized saved theme {:?}", saved);
        }
        self.page.set_root_attribute(&self.config.attribute, &saved)?;
        tracing::debug!("Restored theme {}", saved);
        Ok(Some(saved))
    }

    /// Raw root attribute value, `"light"` when unset or empty.
    pub fn current(&self) -> String {
        self.page
            .root_attribute(&self.config.attribute)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| Theme::Light.as_str().to_string())
    }

    /// Theme the stylesheet is showing for the current root attribute.
    pub fn shown(&self) -> Theme {
        Theme::effective(self.page.root_attribute(&self.config.attribute).as_deref())
    }

    /// Flip the theme: set the root attribute, then persist it.
    ///
    /// A failed write leaves the new attribute in place and returns the error
    /// to the caller.
    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        let current = self.current();
        let next = Theme::next_after(Some(&current));

        self.page.set_root_attribute(&self.config.attribute, next.as_str())?;
        if let Err(e) = self.store.set(&self.config.storage_key, next.as_str()) {
            tracing::error!("Theme switched to {} but not persisted: {}", next, e);
            return Err(e);
        }

        tracing::info!("Theme toggled {} -> {}", current, next);
        Ok(next)
    }
}

/// Wire the toggler into a host: restore on ready, flip on control click.
///
/// A missing control is not an error; the page simply has no toggle.
pub fn install<H: HostEnvironment>(host: &H, config: ToggleConfig) {
    let page = host.page();
    let store = host.store();

    host.on_ready(Box::new(move || {
        let control_id = config.control_id.clone();
        let toggler = ThemeToggler::new(page.clone(), store, config);
        toggler.restore()?;

        let attached = page.on_click(&control_id, Box::new(move || toggler.toggle().map(|_| ())));
        if attached {
            tracing::debug!("Theme toggle attached to #{}", control_id);
        } else {
            tracing::warn!("No #{} control on this page, theme toggle disabled", control_id);
        }
        Ok(())
    }));
}

/// [`install`] with the config from [`load_config`](crate::config::load_config)
/// (file and `THEME_TOGGLE__*` overrides). Returns the config in use.
#[cfg(feature = "native")]
pub fn install_configured<H: HostEnvironment>(host: &H) -> anyhow::Result<ToggleConfig> {
    let config = crate::config::load_config(None)?;
    install(host, config.clone());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{MemoryStore, SimulatedPage};

    fn toggler(
        page: &SimulatedPage,
        store: &MemoryStore,
    ) -> ThemeToggler<SimulatedPage, MemoryStore> {
        ThemeToggler::new(page.clone(), store.clone(), ToggleConfig::default())
    }

    #[test]
    fn test_restore_applies_each_theme() {
        for value in ["light", "dark"] {
            let store = MemoryStore::new();
            store.set("theme", value).unwrap();
            let page = SimulatedPage::new();

            let applied = toggler(&page, &store).restore().unwrap();

            assert_eq!(applied.as_deref(), Some(value));
            assert_eq!(page.root_attribute("data-theme").as_deref(), Some(value));
        }
    }

    #[test]
    fn test_restore_without_entry_leaves_attribute_unset() {
        let store = MemoryStore::new();
        let page = SimulatedPage::new();

        assert_eq!(toggler(&page, &store).restore().unwrap(), None);
        assert_eq!(page.root_attribute("data-theme"), None);
    }

    #[test]
    fn test_restore_ignores_empty_entry() {
        let store = MemoryStore::new();
        store.set("theme", "").unwrap();
        let page = SimulatedPage::new();

        assert_eq!(toggler(&page, &store).restore().unwrap(), None);
        assert_eq!(page.root_attribute("data-theme"), None);
    }

    #[test]
    fn test_restore_applies_corrupted_value_verbatim() {
        let store = MemoryStore::new();
        store.set("theme", "blue").unwrap();
        let page = SimulatedPage::new();

        toggler(&page, &store).restore().unwrap();
        assert_eq!(page.root_attribute("data-theme").as_deref(), Some("blue"));
    }

    #[test]
    fn test_toggle_writes_attribute_and_entry() {
        let store = MemoryStore::new();
        let page = SimulatedPage::new();
        let t = toggler(&page, &store);

        assert_eq!(t.current(), "light");
        assert_eq!(t.toggle().unwrap(), Theme::Dark);
        assert_eq!(page.root_attribute("data-theme").as_deref(), Some("dark"));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        assert_eq!(t.toggle().unwrap(), Theme::Light);
        assert_eq!(page.root_attribute("data-theme").as_deref(), Some("light"));
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_write_failure_keeps_attribute() {
        let store = MemoryStore::new();
        store.fail_writes(true);
        let page = SimulatedPage::new();

        let err = toggler(&page, &store).toggle().unwrap_err();

        assert!(matches!(err, ThemeError::StorageWrite { .. }));
        assert_eq!(page.root_attribute("data-theme").as_deref(), Some("dark"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_shown_follows_stylesheet_rules() {
        let store = MemoryStore::new();
        let page = SimulatedPage::new();
        let t = toggler(&page, &store);
        assert_eq!(t.shown(), Theme::Light);

        page.set_root_attribute("data-theme", "blue").unwrap();
        assert_eq!(t.shown(), Theme::Light);
        assert_eq!(t.current(), "blue");

        page.set_root_attribute("data-theme", "dark").unwrap();
        assert_eq!(t.shown(), Theme::Dark);
    }

    #[test]
    fn test_custom_config_names() {
        let store = MemoryStore::new();
        store.set("site-theme", "dark").unwrap();
        let page = SimulatedPage::new();
        let config = ToggleConfig {
            storage_key: "site-theme".to_string(),
            attribute: "data-mode".to_string(),
            control_id: "mode".to_string(),
        };
        let t = ThemeToggler::new(page.clone(), store.clone(), config);

        t.restore().unwrap();
        assert_eq!(page.root_attribute("data-mode").as_deref(), Some("dark"));
        assert_eq!(page.root_attribute("data-theme"), None);

        t.toggle().unwrap();
        assert_eq!(store.get("site-theme").unwrap().as_deref(), Some("light"));
        assert_eq!(store.get("theme").unwrap(), None);
        assert_eq!(t.config().control_id, "mode");
    }
}
