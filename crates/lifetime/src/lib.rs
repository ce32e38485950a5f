//! Process-wide singletons with explicit, reference-counted lifetimes.
//!
//! # Purpose
//!
//! Give every `'static` type at most one live instance per process, constructed lazily
//! and torn down deterministically when the last token referencing it is released.
//!
//! # Mental model
//!
//! * A [`StaticLifetimeGuard<T>`] is a token. Holding one proves the single `T` is alive.
//! * The first token constructs `T` through [`Default`]; the last token drops it.
//! * A singleton that depends on another stores that dependency's guard as a field, so
//!   teardown always runs dependents before their dependencies.
//! * Pinning ([`StaticLifetimeGuard::pin`], [`StaticLifetimeGuard::instance`]) leaks one
//!   token so the instance lives for the rest of the process and can be handed out as
//!   `&'static T`.
//!
//! # Concurrency & ordering
//!
//! * Slot lookup by [`std::any::TypeId`] is a lock-free snapshot load. Registering a new
//!   type serializes on a writer mutex and republishes the snapshot.
//! * Token increments from a non-zero count are a CAS. Only the 0 -> 1 and 1 -> 0
//!   transitions take the per-type transition lock.
//! * Constructing `T` holds only `T`'s own transition lock, so `T::default()` may acquire
//!   guards of other types. Acquiring a guard of `T` itself from `T::default()` deadlocks.

mod guard;
mod slot;

pub use guard::StaticLifetimeGuard;
