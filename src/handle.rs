//! Listener identity — ids and the opaque [`Handle`] token.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one registered listener.
///
/// Ids are drawn from a process-wide counter, never reused, and never shared
/// between two live registrations, even across separate [`Emitter`]s. Passing
/// a handle to an emitter that did not mint it therefore matches nothing.
///
/// [`Emitter`]: crate::Emitter
pub type ListenerId = u64;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_listener_id() -> ListenerId {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// An opaque token returned by [`Emitter::on`], consumed by [`Emitter::off`].
///
/// Identity is per-registration: registering the same callback logic twice
/// yields two distinct, independently removable handles. Handles are `Copy`
/// and compare by identity, so they can be stored, cloned into closures, and
/// used as map keys.
///
/// The type parameter ties the handle to the message type it was registered
/// for, which is how [`Emitter::off`] finds the right listener list without a
/// runtime type argument.
///
/// [`Emitter::on`]: crate::Emitter::on
/// [`Emitter::off`]: crate::Emitter::off
pub struct Handle<M> {
    id: ListenerId,
    _message: PhantomData<fn(&M)>,
}

impl<M> Handle<M> {
    pub(crate) fn new(id: ListenerId) -> Self {
        Self {
            id,
            _message: PhantomData,
        }
    }

    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }
}

// Manual impls: the derives would put bounds on `M`, which the phantom
// does not require.

impl<M> Clone for Handle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Handle<M> {}

impl<M> PartialEq for Handle<M> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<M> Eq for Handle<M> {}

impl<M> Hash for Handle<M> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<M> fmt::Debug for Handle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle").field("id", &self.id).finish()
    }
}
