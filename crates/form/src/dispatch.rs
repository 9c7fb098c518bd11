//! Update dispatcher
//!
//! Delivers each recomputed [`FieldSnapshot`] to the field's `on_update`
//! callback exactly once.
//!
//! The callback may itself trigger the field (edit the value, call
//! `touch()`, ...). Such re-entrant updates are queued and delivered after the
//! running callback returns, so every trigger still produces exactly one call
//! and calls arrive in trigger order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;

use crate::messages::Messages;
use crate::state::FieldSnapshot;
use crate::status::Status;

/// Change-notification callback: `(status, state, messages)`.
pub type UpdateCallback = dyn FnMut(&Status, &str, &Messages);

/// Invokes the change-notification callback once per trigger.
pub struct UpdateDispatcher {
    callback: RefCell<Option<Box<UpdateCallback>>>,
    pending: RefCell<VecDeque<FieldSnapshot>>,
    dispatched: Cell<u64>,
}

impl UpdateDispatcher {
    /// Creates a dispatcher; `None` makes every dispatch a no-op.
    #[must_use]
    pub fn new(callback: Option<Box<UpdateCallback>>) -> Self {
        Self {
            callback: RefCell::new(callback),
            pending: RefCell::new(VecDeque::new()),
            dispatched: Cell::new(0),
        }
    }

    /// Returns `true` if a callback is configured.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        match self.callback.try_borrow() {
            Ok(callback) => callback.is_some(),
            // Borrowed mutably only while the callback runs.
            Err(_) => true,
        }
    }

    /// Delivers `snapshot` to the callback.
    ///
    /// Called from inside the callback, the snapshot is queued and delivered
    /// by the outer call once the callback returns.
    pub fn dispatch(&self, snapshot: FieldSnapshot) {
        if !self.has_callback() {
            return;
        }

        self.pending.borrow_mut().push_back(snapshot);

        let Ok(mut callback) = self.callback.try_borrow_mut() else {
            tracing::debug!(
                queued = self.pending.borrow().len(),
                "Queued re-entrant field update"
            );
            return;
        };

        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(snapshot) = next else { break };
            if let Some(callback) = callback.as_mut() {
                callback(&snapshot.status, &snapshot.state, &snapshot.messages);
                self.dispatched.set(self.dispatched.get() + 1);
            }
        }
    }

    /// Number of callback invocations so far.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.get()
    }
}

impl fmt::Debug for UpdateDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateDispatcher")
            .field("has_callback", &self.has_callback())
            .field("pending", &self.pending.borrow().len())
            .field("dispatched", &self.dispatched.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn snapshot(state: &str) -> FieldSnapshot {
        FieldSnapshot {
            state: state.to_owned(),
            ..FieldSnapshot::default()
        }
    }

    #[test]
    fn test_no_callback_is_noop() {
        let dispatcher = UpdateDispatcher::new(None);
        dispatcher.dispatch(snapshot("valid"));
        assert!(!dispatcher.has_callback());
        assert_eq!(dispatcher.dispatched(), 0);
    }

    #[test]
    fn test_one_call_per_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback = move |_: &Status, state: &str, _: &Messages| {
            sink.borrow_mut().push(state.to_owned());
        };
        let dispatcher = UpdateDispatcher::new(Some(Box::new(callback)));

        dispatcher.dispatch(snapshot(""));
        dispatcher.dispatch(snapshot("invalid"));

        assert_eq!(*seen.borrow(), vec!["".to_owned(), "invalid".to_owned()]);
        assert_eq!(dispatcher.dispatched(), 2);
    }

    #[test]
    fn test_reentrant_dispatch_is_queued_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let dispatcher: Rc<RefCell<Option<Rc<UpdateDispatcher>>>> = Rc::new(RefCell::new(None));

        let sink = Rc::clone(&seen);
        let handle = Rc::clone(&dispatcher);
        let inner = Rc::new(UpdateDispatcher::new(Some(Box::new(
            move |_: &Status, state: &str, _: &Messages| {
                sink.borrow_mut().push(state.to_owned());
                if state == "first" {
                    let dispatcher = handle.borrow().clone();
                    if let Some(dispatcher) = dispatcher {
                        dispatcher.dispatch(snapshot("second"));
                        dispatcher.dispatch(snapshot("third"));
                    }
                }
            },
        ))));
        *dispatcher.borrow_mut() = Some(Rc::clone(&inner));

        inner.dispatch(snapshot("first"));

        assert_eq!(
            *seen.borrow(),
            vec!["first".to_owned(), "second".to_owned(), "third".to_owned()]
        );
        assert_eq!(inner.dispatched(), 3);

        // Break the test's reference cycle.
        dispatcher.borrow_mut().take();
    }
}
