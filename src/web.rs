//! Browser host over `web-sys`: localStorage, the document root and DOM events.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Storage};

use crate::error::ThemeError;
use crate::host::{ClickHandler, HostEnvironment, Page, PreferenceStore, ReadyHandler};

fn js_reason(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Report a handler error the way the page script would: as an uncaught exception.
fn raise(error: ThemeError) -> ! {
    tracing::error!("{}", error);
    wasm_bindgen::throw_str(&error.to_string())
}

/// `window.localStorage`, looked up on each access
#[derive(Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<Storage, ThemeError> {
        let window = web_sys::window()
            .ok_or_else(|| ThemeError::StorageUnavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(ThemeError::StorageUnavailable(
                "localStorage is disabled".to_string(),
            )),
            Err(e) => Err(ThemeError::StorageUnavailable(js_reason(&e))),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| ThemeError::StorageRead {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| ThemeError::StorageWrite {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }
}

/// The current document
#[derive(Clone)]
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Page for `window.document`
    pub fn current() -> Result<Self, ThemeError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or(ThemeError::NoDocument)
    }
}

impl Page for BrowserPage {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.document.document_element()?.get_attribute(name)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        let root = self
            .document
            .document_element()
            .ok_or(ThemeError::NoDocument)?;
        root.set_attribute(name, value)
            .map_err(|e| ThemeError::Attribute {
                attribute: name.to_string(),
                reason: js_reason(&e),
            })
    }

    fn on_click(&self, element_id: &str, mut handler: ClickHandler) -> bool {
        let Some(element) = self.document.get_element_by_id(element_id) else {
            return false;
        };

        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = handler() {
                raise(e);
            }
        });
        if let Err(e) =
            element.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to attach click listener to #{}: {}", element_id, js_reason(&e));
            return false;
        }
        // Listener lives as long as the page
        callback.forget();
        true
    }
}

/// Browser event loop: window + document + localStorage
pub struct BrowserHost {
    page: BrowserPage,
}

impl BrowserHost {
    pub fn new() -> Result<Self, ThemeError> {
        Ok(Self {
            page: BrowserPage::current()?,
        })
    }
}

impl HostEnvironment for BrowserHost {
    type Page = BrowserPage;
    type Store = LocalStorage;

    fn page(&self) -> BrowserPage {
        self.page.clone()
    }

    fn store(&self) -> LocalStorage {
        LocalStorage
    }

    fn on_ready(&self, handler: ReadyHandler) {
        let run = move || {
            if let Err(e) = handler() {
                raise(e);
            }
        };

        // Module scripts usually start after DOMContentLoaded has already fired
        if self.page.document.ready_state() != "loading" {
            run();
            return;
        }

        let callback = Closure::once_into_js(run);
        if let Err(e) = self
            .page
            .document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        {
            tracing::warn!("Failed to subscribe to DOMContentLoaded: {}", js_reason(&e));
        }
    }
}

/// Module entry point: install the toggle into the current page.
///
/// Dioxus apps (`web` feature) go through `app::theme` instead.
#[cfg(not(feature = "web"))]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if dioxus::logger::init(tracing::Level::INFO).is_err() {
        tracing::debug!("Logger already initialized");
    }

    let host = BrowserHost::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    crate::toggler::install(&host, crate::config::ToggleConfig::default());
    Ok(())
}
