//! In-process host for running the toggler without a browser.
//!
//! `MemoryStore` outlives pages, so a "reload" is just a new `SimulatedHost`
//! over the same store. Events are dispatched synchronously on the calling
//! thread, one handler at a time.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::ThemeError;
use crate::host::{ClickHandler, HostEnvironment, Page, PreferenceStore, ReadyHandler};

/// Key-value store shared by every page that uses it
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `get` fail, like a store the host has disabled.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every subsequent `set` fail, like a full or disabled store.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        if self.fail_reads.get() {
            return Err(ThemeError::StorageRead {
                key: key.to_string(),
                reason: "storage disabled".to_string(),
            });
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        if self.fail_writes.get() {
            return Err(ThemeError::StorageWrite {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct PageState {
    root: RefCell<HashMap<String, String>>,
    elements: HashSet<String>,
    clicks: RefCell<HashMap<String, Vec<ClickHandler>>>,
    faults: RefCell<Vec<ThemeError>>,
}

/// A loaded document: root attributes, the ids present in its markup and
/// the click handlers attached to them.
#[derive(Clone, Default)]
pub struct SimulatedPage {
    state: Rc<PageState>,
}

impl SimulatedPage {
    /// Page with no elements besides the root
    pub fn new() -> Self {
        Self::default()
    }

    /// Page whose markup contains elements with the given ids
    pub fn with_elements(ids: &[&str]) -> Self {
        Self {
            state: Rc::new(PageState {
                elements: ids.iter().map(|id| id.to_string()).collect(),
                ..PageState::default()
            }),
        }
    }

    /// Dispatch a click on the element with this id.
    ///
    /// Handler errors are recorded as faults, not returned. Returns the number
    /// of handlers that ran.
    pub fn click(&self, element_id: &str) -> usize {
        // Take handlers out so they can touch the page while running
        let Some(mut handlers) = self.state.clicks.borrow_mut().remove(element_id) else {
            return 0;
        };

        for handler in handlers.iter_mut() {
            if let Err(e) = handler() {
                self.record_fault(e);
            }
        }

        let count = handlers.len();
        let mut clicks = self.state.clicks.borrow_mut();
        let slot = clicks.entry(element_id.to_string()).or_default();
        // Keep registration order if a handler attached more listeners
        handlers.append(slot);
        *slot = handlers;
        count
    }

    /// Number of click handlers attached to an element
    pub fn listener_count(&self, element_id: &str) -> usize {
        self.state
            .clicks
            .borrow()
            .get(element_id)
            .map_or(0, Vec::len)
    }

    /// Errors that escaped event handlers (uncaught in browser terms)
    pub fn faults(&self) -> Vec<ThemeError> {
        self.state.faults.borrow().clone()
    }

    fn record_fault(&self, error: ThemeError) {
        tracing::error!("Uncaught error in page handler: {}", error);
        self.state.faults.borrow_mut().push(error);
    }
}

impl Page for SimulatedPage {
    fn root_attribute(&self, name: &str) -> Option<String> {
        self.state.root.borrow().get(name).cloned()
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        self.state
            .root
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn on_click(&self, element_id: &str, handler: ClickHandler) -> bool {
        if !self.state.elements.contains(element_id) {
            return false;
        }
        self.state
            .clicks
            .borrow_mut()
            .entry(element_id.to_string())
            .or_default()
            .push(handler);
        true
    }
}

/// One page load against a store
pub struct SimulatedHost {
    page: SimulatedPage,
    store: MemoryStore,
    ready: RefCell<Vec<ReadyHandler>>,
    ready_fired: Cell<bool>,
}

impl SimulatedHost {
    pub fn new(page: SimulatedPage, store: MemoryStore) -> Self {
        Self {
            page,
            store,
            ready: RefCell::new(Vec::new()),
            ready_fired: Cell::new(false),
        }
    }

    /// Fire the page-structure-ready event. Only the first call dispatches.
    pub fn fire_ready(&self) {
        if self.ready_fired.replace(true) {
            return;
        }
        let handlers = std::mem::take(&mut *self.ready.borrow_mut());
        for handler in handlers {
            if let Err(e) = handler() {
                self.page.record_fault(e);
            }
        }
    }
}

impl HostEnvironment for SimulatedHost {
    type Page = SimulatedPage;
    type Store = MemoryStore;

    fn page(&self) -> SimulatedPage {
        self.page.clone()
    }

    fn store(&self) -> MemoryStore {
        self.store.clone()
    }

    fn on_ready(&self, handler: ReadyHandler) {
        // Late subscribers after the event never run, as in a browser
        if self.ready_fired.get() {
            tracing::debug!("Ready event already fired, handler dropped");
            return;
        }
        self.ready.borrow_mut().push(handler);
    }
}
