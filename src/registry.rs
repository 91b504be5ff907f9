//! Type-erased listener storage.
//!
//! One [`Listeners<M>`] holds the ordered callback list for a single message
//! type. The [`ErasedSlot`] trait is the non-generic view of such a list, so
//! lists for arbitrary message types can live in one `HashMap<TypeId, _>`.
//! The concrete `Listeners<M>` is recovered by downcast only at dispatch,
//! and only under the key `TypeId::of::<M>()` — the registry never stores a
//! list under any other type's key, so the downcast cannot fail through the
//! public API.

use std::any::Any;
use std::rc::Rc;

use crate::handle::ListenerId;

/// Closure type for listeners of message type `M`.
pub type ListenerFn<M> = dyn Fn(&M);

struct Entry<M> {
    id: ListenerId,
    callback: Rc<ListenerFn<M>>,
}

/// Ordered listener list for one message type. Insertion order is dispatch
/// order; duplicate callback logic produces independent entries.
pub(crate) struct Listeners<M> {
    entries: Vec<Entry<M>>,
}

impl<M: 'static> Listeners<M> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, id: ListenerId, callback: Rc<ListenerFn<M>>) {
        self.entries.push(Entry { id, callback });
    }

    /// Clone out the callback `Rc`s in registration order.
    ///
    /// Emission iterates this snapshot, not the live list, so structural
    /// mutation from inside a callback cannot skip or double-invoke entries.
    pub(crate) fn snapshot(&self) -> Vec<Rc<ListenerFn<M>>> {
        self.entries.iter().map(|e| Rc::clone(&e.callback)).collect()
    }
}

/// Non-generic capability shared by every `Listeners<M>`.
///
/// Everything the registry needs without knowing `M` goes through here;
/// only dispatch recovers the concrete list via `as_any`.
pub(crate) trait ErasedSlot {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn len(&self) -> usize;
    fn remove(&mut self, id: ListenerId);
}

impl<M: 'static> ErasedSlot for Listeners<M> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|e| e.id != id);
    }
}
