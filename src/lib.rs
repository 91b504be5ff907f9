//! typed-emit — a type-indexed, in-process publish/subscribe registry.
//!
//! # Overview
//!
//! An [`Emitter`] maps message *types* to ordered lists of callbacks.
//! Registering a callback keys it by the type of its parameter; emitting a
//! value of that type invokes every registered callback synchronously, in
//! registration order, on the calling thread. Listeners are removed
//! individually by [`Handle`], in bulk per type, or automatically after
//! their first invocation ([`Emitter::once`]).
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use typed_emit::Emitter;
//!
//! struct Tick {
//!     frame: u32,
//! }
//!
//! let emitter = Emitter::new();
//! let seen = Rc::new(Cell::new(0));
//!
//! let sink = Rc::clone(&seen);
//! emitter.on(move |tick: &Tick| sink.set(tick.frame));
//!
//! emitter.emit(&Tick { frame: 7 });
//! assert_eq!(seen.get(), 7);
//! ```
//!
//! # Threading
//!
//! The emitter is `!Send + !Sync` and takes no locks; sharing one across
//! threads is a caller responsibility (wrap it in your own synchronization).
//! Within a thread it is fully reentrant: callbacks may register, remove,
//! and emit (including nested emission) on the emitter that invoked them.
//!
//! # Modules
//!
//! - [`emitter`] — [`Emitter`]: registration, dispatch, removal.
//! - [`handle`] — [`Handle`] and [`ListenerId`].
//! - `registry` — internal type-erased listener storage.
//! - `once` — [`Emitter::once`].

pub mod emitter;
pub mod handle;
mod once;
mod registry;

pub use emitter::Emitter;
pub use handle::{Handle, ListenerId};
pub use registry::ListenerFn;
