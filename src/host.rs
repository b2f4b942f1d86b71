use crate::error::ThemeError;

/// Runs once when the page structure has finished loading.
pub type ReadyHandler = Box<dyn FnOnce() -> Result<(), ThemeError>>;

/// Runs on every click of the control it is attached to.
pub type ClickHandler = Box<dyn FnMut() -> Result<(), ThemeError>>;

// =============================================================================
// PreferenceStore - origin-scoped key-value persistence
// =============================================================================

/// Durable key-value store provided by the host (localStorage in a browser).
pub trait PreferenceStore {
    /// Read an entry. A missing key is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

// =============================================================================
// Page - root element attribute access and control wiring
// =============================================================================

/// The loaded document as seen by the toggler.
pub trait Page {
    /// Current value of an attribute on the root element, if set.
    fn root_attribute(&self, name: &str) -> Option<String>;

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError>;

    /// Attach a click handler to the element with the given id.
    ///
    /// Returns `false` (and drops the handler) when no such element exists.
    fn on_click(&self, element_id: &str, handler: ClickHandler) -> bool;
}

// =============================================================================
// HostEnvironment - event loop the toggler is installed into
// =============================================================================

/// Single-threaded host: hands out the page and store, and dispatches the
/// ready event. Handlers run to completion, one at a time.
///
/// Errors returned by handlers are faults of the host (uncaught exceptions in
/// a browser); the toggler never retries or recovers from them.
pub trait HostEnvironment {
    type Page: Page + Clone + 'static;
    type Store: PreferenceStore + Clone + 'static;

    fn page(&self) -> Self::Page;

    fn store(&self) -> Self::Store;

    /// Register a handler for the page-structure-ready event (fires once).
    fn on_ready(&self, handler: ReadyHandler);
}
