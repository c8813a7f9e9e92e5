//! Listener registry
//!
//! An ordered, duplicate-free list of shared listener references. Listeners are
//! compared by address, never by value. The registry is a cheap cloneable
//! handle so a listener can hold one and unregister itself (or others) while an
//! event is being dispatched.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Ordered, duplicate-free collection of listeners
///
/// The registry holds strong references: a listener stays alive until it is
/// removed, even when the caller drops its own handle. A listener that stores a
/// clone of the registry forms a reference cycle with it, which is only broken
/// when the listener is removed.
pub struct ListenerRegistry<L: ?Sized> {
    listeners: Rc<RefCell<Vec<Rc<RefCell<L>>>>>,
}

impl<L: ?Sized> ListenerRegistry<L> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append a listener unless it is already registered
    pub fn add(&self, listener: Rc<RefCell<L>>) {
        let mut listeners = self.listeners.borrow_mut();
        if !listeners.iter().any(|existing| same_listener(existing, &listener)) {
            listeners.push(listener);
        }
    }

    /// Remove a listener by identity
    ///
    /// Returns `true` if the listener was registered.
    pub fn remove<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.iter().position(|existing| same_listener(existing, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check whether a listener is registered
    pub fn contains<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|existing| same_listener(existing, listener))
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Check if no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Copy of the current listener list, in registration order
    ///
    /// Dispatch iterates a snapshot so listeners may mutate the registry from
    /// inside a callback.
    pub fn snapshot(&self) -> Vec<Rc<RefCell<L>>> {
        self.listeners.borrow().clone()
    }

    /// Remove every listener
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}

impl<L: ?Sized> Clone for ListenerRegistry<L> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
        }
    }
}

impl<L: ?Sized> Default for ListenerRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> fmt::Debug for ListenerRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry").field("len", &self.len()).finish()
    }
}

fn same_listener<A: ?Sized, B: ?Sized>(a: &Rc<RefCell<A>>, b: &Rc<RefCell<B>>) -> bool {
    Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named {
        fn name(&self) -> &'static str;
    }

    struct Listener(&'static str);

    impl Named for Listener {
        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn listener(name: &'static str) -> Rc<RefCell<Listener>> {
        Rc::new(RefCell::new(Listener(name)))
    }

    struct SelfRemoving {
        registry: ListenerRegistry<dyn Named>,
    }

    impl Named for SelfRemoving {
        fn name(&self) -> &'static str {
            "self-removing"
        }
    }

    fn names(registry: &ListenerRegistry<dyn Named>) -> Vec<&'static str> {
        registry.snapshot().iter().map(|l| l.borrow().name()).collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let (a, b, c) = (listener("a"), listener("b"), listener("c"));

        registry.add(b.clone());
        registry.add(a.clone());
        registry.add(c.clone());

        assert_eq!(names(&registry), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let a = listener("a");
        let b = listener("b");

        registry.add(a.clone());
        registry.add(b.clone());
        registry.add(a.clone());

        assert_eq!(registry.len(), 2);
        assert_eq!(names(&registry), vec!["a", "b"]);
    }

    #[test]
    fn test_identity_not_equality() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        registry.add(listener("same"));
        registry.add(listener("same"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_reports_match() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let a = listener("a");
        let never_added = listener("x");

        registry.add(a.clone());

        assert!(!registry.remove(&never_added));
        assert!(registry.contains(&a));
        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_remove_sequence() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let (a, b, c, d) = (listener("a"), listener("b"), listener("c"), listener("d"));

        registry.add(a.clone());
        registry.add(b.clone());
        registry.add(c.clone());
        registry.remove(&b);
        registry.add(d.clone());
        registry.add(b.clone());
        registry.add(a.clone());
        registry.remove(&c);

        assert_eq!(names(&registry), vec!["a", "d", "b"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let a = listener("a");
        registry.add(a.clone());

        let snapshot = registry.snapshot();
        registry.remove(&a);
        registry.add(listener("b"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].borrow().name(), "a");
    }

    #[test]
    fn test_clones_share_state() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let handle = registry.clone();
        handle.add(listener("a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_keeps_listener_alive_until_removed() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let a = listener("a");
        let weak = Rc::downgrade(&a);
        registry.add(a.clone());
        assert_eq!(Rc::strong_count(&a), 2);

        drop(a);
        let a = weak.upgrade().expect("registry keeps listener alive");
        assert!(registry.remove(&a));
        assert_eq!(Rc::strong_count(&a), 1);
        drop(a);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_removing_self_holding_listener_breaks_cycle() {
        let registry: ListenerRegistry<dyn Named> = ListenerRegistry::new();
        let holder = Rc::new(RefCell::new(SelfRemoving {
            registry: registry.clone(),
        }));
        let weak = Rc::downgrade(&holder);
        registry.add(holder.clone());
        drop(holder);
        drop(registry);

        let holder = weak.upgrade().expect("cycle keeps listener alive");
        let handle = holder.borrow().registry.clone();
        assert!(handle.remove(&holder));
        drop(handle);
        drop(holder);
        assert!(weak.upgrade().is_none());
    }
}
