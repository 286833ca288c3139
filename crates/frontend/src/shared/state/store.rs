use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ListenerList<T> = Arc<Mutex<Vec<(u64, Listener<T>)>>>;

/// Explicit state container: snapshot reads, synchronous run-to-completion
/// writes, change notification via `subscribe`.
///
/// Cheap to clone (all clones share the same state); handed to components
/// through Leptos context instead of living in a module-level singleton.
/// Mutations happen on the UI event loop; the locks only exist to satisfy
/// the `Send + Sync` bounds of the component tree and are never contended.
pub struct Store<T> {
    state: Arc<RwLock<T>>,
    listeners: ListenerList<T>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> T {
        self.state.read().expect("store lock poisoned").clone()
    }

    /// Read without cloning the whole state.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read().expect("store lock poisoned"))
    }

    /// Replace the state and notify subscribers.
    pub fn set_state(&self, new_state: T) {
        *self.state.write().expect("store lock poisoned") = new_state;
        self.notify();
    }

    /// Mutate in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.state.write().expect("store lock poisoned"));
        self.notify();
    }

    /// Register a change listener. Dropping the returned `Subscription`
    /// deregisters it, so a component teardown cannot leak callbacks.
    #[must_use]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("store lock poisoned")
            .push((id, Arc::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    fn notify(&self) {
        // Listeners are cloned out first: a listener is allowed to read the
        // store (or drop its own subscription) while we iterate.
        let current: Vec<Listener<T>> = self
            .listeners
            .lock()
            .expect("store lock poisoned")
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        let state = self.get_state();
        for listener in current {
            listener(&state);
        }
    }
}

impl<T: Clone + Send + Sync + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Guard returned by [`Store::subscribe`].
pub struct Subscription<T> {
    id: u64,
    listeners: Weak<Mutex<Vec<(u64, Listener<T>)>>>,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let store = Store::new(1u32);
        assert_eq!(store.get_state(), 1);
        store.set_state(5);
        assert_eq!(store.get_state(), 5);
        store.update(|v| *v += 1);
        assert_eq!(store.get_state(), 6);
    }

    #[test]
    fn test_subscribe_notifies_on_every_mutation() {
        let store = Store::new(0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = store.subscribe(move |v| seen_clone.lock().unwrap().push(*v));

        store.set_state(1);
        store.update(|v| *v = 2);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_dropped_subscription_stops_notifications() {
        let store = Store::new(0u32);
        let count = Arc::new(AtomicU64::new(0));
        let count_clone = Arc::clone(&count);
        let sub = store.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::Relaxed);
        });

        store.set_state(1);
        drop(sub);
        store.set_state(2);
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_listener_may_read_the_store() {
        let store = Store::new(10u32);
        let observed = Arc::new(AtomicU64::new(0));
        let observed_clone = Arc::clone(&observed);
        let reader = store.clone();
        let _sub = store.subscribe(move |_| {
            observed_clone.store(reader.get_state() as u64, Ordering::Relaxed);
        });

        store.set_state(42);
        assert_eq!(observed.load(Ordering::Relaxed), 42);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Store::new(String::new());
        let b = a.clone();
        b.set_state("shared".to_string());
        assert_eq!(a.get_state(), "shared");
    }
}
