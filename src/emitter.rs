//! [`Emitter`] — the type-indexed registry and its dispatch engine.
//!
//! # Threading model
//!
//! The emitter is single-threaded (`!Send + !Sync`): internal state is
//! `Rc`/`RefCell`, and no lock is taken anywhere. Callers that need to
//! share an emitter across threads must add their own synchronization
//! around it.
//!
//! The critical internal rule is that the registry borrow is **never held
//! while a callback runs**. [`Emitter::emit`] snapshots the callback `Rc`s
//! under the borrow, releases it, and only then invokes, so callbacks are
//! free to call `on`/`off`/`emit` on the same emitter, including nested
//! emission of the same message type.

use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::handle::{next_listener_id, Handle, ListenerId};
use crate::registry::{ErasedSlot, Listeners};

/// Type-indexed publish/subscribe registry with synchronous dispatch.
///
/// Callbacks are registered per message type and invoked, in registration
/// order, for every emission of that type. Listeners for distinct message
/// types are fully isolated.
///
/// Each emitter owns its own registry; registries are never shared between
/// emitter instances, and a [`Handle`] only ever matches the emitter that
/// minted it.
pub struct Emitter {
    shared: Rc<Shared>,
}

/// Registry state, shared (via `Weak`) with the once-wrapper closures so
/// they can unregister themselves without holding the emitter alive.
pub(crate) struct Shared {
    registry: RefCell<HashMap<TypeId, Box<dyn ErasedSlot>>>,
}

impl Shared {
    /// Remove the entry with `id` from the list under `key`, if any.
    pub(crate) fn remove_entry(&self, key: TypeId, id: ListenerId) {
        let mut registry = self.registry.borrow_mut();
        if let Some(slot) = registry.get_mut(&key) {
            slot.remove(id);
        }
    }
}

impl Emitter {
    /// Create an emitter with an empty registry.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub(crate) fn shared(&self) -> &Rc<Shared> {
        &self.shared
    }

    /// Register `callback` for message type `M` and return its handle.
    ///
    /// The new listener is appended to the end of `M`'s dispatch order.
    /// Registering the same callback logic more than once produces
    /// independent listeners, each with its own handle.
    pub fn on<M: 'static>(&self, callback: impl Fn(&M) + 'static) -> Handle<M> {
        let id = next_listener_id();
        let mut registry = self.shared.registry.borrow_mut();
        let slot = registry
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Listeners::<M>::new()));
        let Some(listeners) = slot.as_any_mut().downcast_mut::<Listeners<M>>() else {
            unreachable!("slot under a type's key always holds that type's listener list");
        };
        listeners.push(id, Rc::new(callback));
        tracing::trace!(
            listener = id,
            message_type = std::any::type_name::<M>(),
            "listener registered"
        );
        Handle::new(id)
    }

    /// Invoke every listener registered for `M`, in registration order,
    /// synchronously on the calling thread.
    ///
    /// Emitting a type with no listeners is a no-op. Dispatch iterates a
    /// snapshot taken when the call starts: a listener removed by an earlier
    /// listener in the same round still fires this round, and a listener
    /// added during the round first fires on the next one.
    ///
    /// A panicking listener aborts the rest of the round and propagates to
    /// the caller.
    pub fn emit<M: 'static>(&self, message: &M) {
        let snapshot = {
            let registry = self.shared.registry.borrow();
            let Some(slot) = registry.get(&TypeId::of::<M>()) else {
                return;
            };
            let Some(listeners) = slot.as_any().downcast_ref::<Listeners<M>>() else {
                unreachable!("slot under a type's key always holds that type's listener list");
            };
            listeners.snapshot()
        };
        // Borrow released — callbacks may re-enter the emitter freely.
        for callback in snapshot {
            callback(message);
        }
    }

    /// Remove the listener identified by `handle`.
    ///
    /// Removing a handle that is not present (already removed, never
    /// registered, or minted by a different emitter) is a no-op. Removal is
    /// by identity: other listeners for `M`, including behaviorally
    /// identical ones, are unaffected.
    pub fn off<M: 'static>(&self, handle: Handle<M>) {
        self.shared.remove_entry(TypeId::of::<M>(), handle.id());
    }

    /// Remove every listener registered for `M`.
    ///
    /// Returns whether at least one listener existed before the call.
    pub fn remove_all<M: 'static>(&self) -> bool {
        let removed = self.shared.registry.borrow_mut().remove(&TypeId::of::<M>());
        let had_listeners = removed.is_some_and(|slot| slot.len() > 0);
        if had_listeners {
            tracing::trace!(
                message_type = std::any::type_name::<M>(),
                "all listeners removed"
            );
        }
        had_listeners
    }

    /// Number of listeners currently registered for `M`.
    pub fn listener_count<M: 'static>(&self) -> usize {
        self.shared
            .registry
            .borrow()
            .get(&TypeId::of::<M>())
            .map_or(0, |slot| slot.len())
    }

    /// Whether any listener is registered for `M`.
    pub fn has_listeners<M: 'static>(&self) -> bool {
        self.listener_count::<M>() > 0
    }

    /// Whether no listener is registered for any message type.
    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().values().all(|slot| slot.len() == 0)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}
