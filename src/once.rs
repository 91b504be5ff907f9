//! Once-registration — listeners that self-remove after their first
//! invocation.
//!
//! A once-listener needs to remove itself using a handle that does not
//! exist until [`Emitter::on`] returns, while the wrapper closure has to be
//! built *before* that call. The gap is bridged by a small state machine
//! shared between the wrapper and the registering code: the wrapper records
//! how it was invoked relative to registration, and whichever side learns
//! the handle last performs the removal.

use std::any::TypeId;
use std::cell::RefCell;
use std::mem;
use std::rc::{Rc, Weak};

use crate::emitter::Emitter;
use crate::handle::ListenerId;

/// Lifecycle of a once-listener's self-removal.
enum OnceState {
    /// `on` has not returned yet; the entry's id is unknown.
    Registering,
    /// Registration completed; the wrapper removes itself with this id.
    Armed(ListenerId),
    /// The wrapper has fired. Terminal: a second invocation (possible when
    /// a nested emission and the outer round both hold the wrapper in
    /// their snapshots) must not run the callback again. Observed while
    /// still registering, it means the wrapper fired before the handle
    /// existed, and registration removes the entry itself.
    Fired,
}

impl Emitter {
    /// Register `callback` for message type `M`, firing on the first
    /// matching emission only.
    ///
    /// The listener unregisters itself when it fires, so no handle is
    /// returned or needed. Until then it occupies a regular slot in `M`'s
    /// dispatch order and does not affect other listeners (regular or
    /// once) registered for the same type.
    pub fn once<M: 'static>(&self, callback: impl Fn(&M) + 'static) {
        let state = Rc::new(RefCell::new(OnceState::Registering));
        let shared = Rc::downgrade(self.shared());

        let wrapper_state = Rc::clone(&state);
        let handle = self.on(move |message: &M| {
            let previous = mem::replace(&mut *wrapper_state.borrow_mut(), OnceState::Fired);
            match previous {
                OnceState::Armed(id) => {
                    if let Some(shared) = Weak::upgrade(&shared) {
                        shared.remove_entry(TypeId::of::<M>(), id);
                    }
                }
                OnceState::Registering => {}
                OnceState::Fired => return,
            }
            callback(message);
        });

        let fired_during_registration = {
            let mut state = state.borrow_mut();
            if matches!(*state, OnceState::Fired) {
                true
            } else {
                *state = OnceState::Armed(handle.id());
                false
            }
        };
        if fired_during_registration {
            self.off(handle);
        }
    }
}
