use std::{cell::RefCell, fmt, rc::Rc};

/// Callback invoked with a full snapshot on every change
pub type Listener<T> = Rc<dyn Fn(Vec<T>)>;

/// Ordered registry of listeners.
///
/// Listeners are never removed and the same callback may be registered more
/// than once; each registration is called separately.
pub struct Listeners<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T: Clone> Listeners<T> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Registers a listener at the end of the call order
    pub fn add(&self, listener: Listener<T>) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Calls every listener in registration order, each with its own copy of `items`.
    ///
    /// The registry is not borrowed while listeners run, so a listener may
    /// register further listeners; those are first called on the next notification.
    pub fn notify(&self, items: &[T]) {
        let listeners: Vec<Listener<T>> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(items.to_vec());
        }
    }
}

impl<T: Clone> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.borrow().len())
            .finish()
    }
}
