//=========================================================================
// Event Hub
//=========================================================================
//
// Named, zero-argument notifications with synchronous listeners.
//
// Architecture:
//   subscribe(name, listener) → HashMap<String, Vec<Listener>>
//                                    ↓
//   fire(name) ─────────────→ every listener, in subscription order
//
// Listeners carry no payload. A listener that needs to act on the scene
// captures a `HostHandle` and sends a `HostEvent` back to the engine.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;

//=== Public API ==========================================================

/// Zero-argument event listener.
pub type Listener = Box<dyn FnMut() + Send>;

//=== EventHub ============================================================

/// Registry of named events and their listeners.
#[derive(Default)]
pub struct EventHub {
    listeners: HashMap<String, Vec<Listener>>,
    fired: HashMap<String, usize>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            fired: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Adds a listener to the named event.
    pub fn subscribe<F>(&mut self, name: impl Into<String>, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.listeners
            .entry(name.into())
            .or_default()
            .push(Box::new(listener));
    }

    /// Removes every listener of the named event.
    pub fn clear(&mut self, name: &str) {
        self.listeners.remove(name);
    }

    //--- Dispatch ---------------------------------------------------------

    /// Fires the named event, invoking each listener synchronously.
    ///
    /// Firing an event nobody listens to is not an error; the firing is still
    /// counted. Returns the number of listeners invoked.
    pub fn fire(&mut self, name: &str) -> usize {
        *self.fired.entry(name.to_string()).or_insert(0) += 1;

        let Some(listeners) = self.listeners.get_mut(name) else {
            debug!("Event {:?} fired with no listeners", name);
            return 0;
        };

        for listener in listeners.iter_mut() {
            listener();
        }

        debug!("Event {:?} fired to {} listener(s)", name, listeners.len());
        listeners.len()
    }

    //--- Queries ----------------------------------------------------------

    /// Number of times the named event has fired since creation.
    pub fn fire_count(&self, name: &str) -> usize {
        self.fired.get(name).copied().unwrap_or(0)
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn fire_without_listeners_is_counted() {
        let mut hub = EventHub::new();

        assert_eq!(hub.fire("door_open"), 0);
        assert_eq!(hub.fire_count("door_open"), 1);
        assert_eq!(hub.fire_count("other"), 0);
    }

    #[test]
    fn fire_invokes_each_listener_once() {
        let mut hub = EventHub::new();
        let (first, listener_a) = counter();
        let (second, listener_b) = counter();
        hub.subscribe("boom", listener_a);
        hub.subscribe("boom", listener_b);

        assert_eq!(hub.fire("boom"), 2);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let mut hub = EventHub::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            hub.subscribe("tick", move || order.lock().unwrap().push(tag));
        }

        hub.fire("tick");
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn events_are_isolated_by_name() {
        let mut hub = EventHub::new();
        let (count, listener) = counter();
        hub.subscribe("open", listener);

        hub.fire("close");
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(hub.listener_count("open"), 1);
        assert_eq!(hub.listener_count("close"), 0);
    }

    #[test]
    fn clear_removes_listeners_but_keeps_count() {
        let mut hub = EventHub::new();
        let (count, listener) = counter();
        hub.subscribe("open", listener);
        hub.fire("open");

        hub.clear("open");
        hub.fire("open");

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(hub.fire_count("open"), 2);
    }
}
