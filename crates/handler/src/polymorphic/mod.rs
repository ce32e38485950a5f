//! Process-wide, runtime-replaceable handler with a lock-free read path.
//!
//! # Mental model
//!
//! * One [`PolymorphicHandler`] singleton exists per `(Interface, Default, Hooks)` triple.
//! * `current` points at a pinned [`Binding`], a thin home for the fat `&'static I`.
//! * Every thread caches the binding it last resolved and only rereads `current` once the
//!   cached handler reports itself inactive.
//!
//! # Invariants
//!
//! * Exactly one handler is current; replacements are totally ordered by one `swap`.
//! * The outgoing handler is deactivated after the swap, never before.
//! * Once finalized, `current` never changes again, except for a `set`/`reset` that
//!   passed the finalized check before `finalize` and publishes right after it.
//! * Handlers and bindings are pinned singletons, so a stale cached reference stays valid.
//!
//! # Concurrency & ordering
//!
//! * `get` is wait-free: a thread-local lookup, a relaxed flag load and at most one
//!   acquire load of `current`. It does not loop, so a thread may act on a just-replaced
//!   handler until it observes the deactivation.
//! * `set`/`reset` publish with an acq-rel `swap` so readers of the new binding see the
//!   handler's construction.

mod local;

use std::any::type_name;
use std::marker::PhantomData;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

use switchyard_lifetime::StaticLifetimeGuard;

use crate::{DefaultHooks, Hooks, Upcast};

/// Stable address holding a `&'static I`.
struct Binding<I: ?Sized + 'static> {
	handler: &'static I,
}

/// Singleton form of [`Binding`], one per `(I, H)` pair.
struct BindingOf<I: ?Sized + 'static, H> {
	binding: Binding<I>,
	_handler: PhantomData<fn() -> H>,
}

impl<I, H> Default for BindingOf<I, H>
where
	I: ?Sized + Upcast<H>,
	H: Default + Send + Sync + 'static,
{
	fn default() -> Self {
		Self {
			binding: Binding {
				handler: I::upcast(StaticLifetimeGuard::<H>::instance()),
			},
			_handler: PhantomData,
		}
	}
}

fn binding_of<I, H>() -> &'static Binding<I>
where
	I: ?Sized + Upcast<H>,
	H: Default + Send + Sync + 'static,
{
	&StaticLifetimeGuard::<BindingOf<I, H>>::instance().binding
}

/// Lock-free access to the current handler of one pluggable concern.
///
/// * `I` is the interface, usually `dyn Trait` for a trait declared with
///   [`handler_interface!`](crate::handler_interface).
/// * `D` is the default handler, current until the first [`set`](Self::set).
/// * `H` decides what happens on [`set`](Self::set) or [`reset`](Self::reset) after
///   [`finalize`](Self::finalize).
pub struct PolymorphicHandler<I, D, H = DefaultHooks>
where
	I: ?Sized + 'static,
	D: Default + Send + Sync + 'static,
{
	current: AtomicPtr<Binding<I>>,
	finalized: AtomicBool,
	_default: StaticLifetimeGuard<D>,
	_hooks: PhantomData<fn() -> H>,
}

impl<I, D, H> Default for PolymorphicHandler<I, D, H>
where
	I: ?Sized + Upcast<D>,
	D: Default + Send + Sync + 'static,
{
	fn default() -> Self {
		let default_guard = StaticLifetimeGuard::<D>::new();
		let binding = binding_of::<I, D>();
		Self {
			current: AtomicPtr::new(ptr::from_ref(binding).cast_mut()),
			finalized: AtomicBool::new(false),
			_default: default_guard,
			_hooks: PhantomData,
		}
	}
}

impl<I, D, H> PolymorphicHandler<I, D, H>
where
	I: ?Sized + Upcast<D>,
	D: Default + Send + Sync + 'static,
	H: Hooks<I> + 'static,
{
	/// Returns the handler currently active as seen by this thread.
	///
	/// Never fails, and never blocks once the singleton exists; the default handler is
	/// current until replaced. The default handler's constructor must not call `get` of
	/// its own concern.
	pub fn get() -> &'static I {
		let Some((instance, cached)) = local::load::<Self, Binding<I>>() else {
			let instance = Self::instance();
			let current = instance.current();
			local::store(instance, current);
			return current.handler;
		};

		if cached.handler.activatable().is_active() {
			return cached.handler;
		}

		let current = instance.current();
		local::store(instance, current);
		current.handler
	}

	/// Installs the handler kept alive by `proof` and returns the previous handler.
	///
	/// Returns `None` without changing anything once [`finalize`](Self::finalize) was
	/// called; the hooks policy is invoked instead.
	pub fn set<T>(proof: StaticLifetimeGuard<T>) -> Option<&'static I>
	where
		I: Upcast<T>,
		T: Default + Send + Sync + 'static,
	{
		let instance = Self::instance();
		// Refused handlers are neither pinned nor bound.
		if instance.finalized.load(Ordering::Acquire) {
			instance.reject(I::upcast(proof.get()));
			return None;
		}

		proof.pin();
		let previous = instance.exchange(binding_of::<I, T>())?;
		tracing::trace!(interface = type_name::<I>(), handler = type_name::<T>(), "handler.set");
		Some(previous)
	}

	/// Restores the default handler and returns the previous one.
	pub fn reset() -> Option<&'static I> {
		let previous = Self::instance().exchange(binding_of::<I, D>())?;
		tracing::trace!(interface = type_name::<I>(), "handler.reset");
		Some(previous)
	}

	/// Freezes the current handler for the rest of the process. Idempotent.
	pub fn finalize() {
		if !Self::instance().finalized.swap(true, Ordering::AcqRel) {
			tracing::trace!(interface = type_name::<I>(), "handler.finalize");
		}
	}

	/// Whether [`finalize`](Self::finalize) has been called.
	pub fn is_finalized() -> bool {
		Self::instance().finalized.load(Ordering::Acquire)
	}

	/// The default handler, whether or not it is current.
	pub fn default_handler() -> &'static I {
		binding_of::<I, D>().handler
	}

	/// The singleton, constructed on first use and kept for the rest of the process.
	pub fn instance() -> &'static Self {
		StaticLifetimeGuard::<Self>::instance()
	}

	/// A token keeping the singleton alive.
	pub fn guard() -> StaticLifetimeGuard<Self> {
		StaticLifetimeGuard::new()
	}

	fn current(&self) -> &'static Binding<I> {
		let current = self.current.load(Ordering::Acquire);
		// SAFETY: `current` only ever holds pointers to pinned `BindingOf` singletons.
		unsafe { &*current }
	}

	fn reject(&self, rejected: &I) {
		H::on_set_after_finalize(self.current().handler, rejected);
	}

	fn exchange(&self, binding: &'static Binding<I>) -> Option<&'static I> {
		if self.finalized.load(Ordering::Acquire) {
			self.reject(binding.handler);
			return None;
		}

		// It may have been replaced before; reactivate it ahead of publication.
		binding.handler.activatable().activate();
		let previous = self.current.swap(ptr::from_ref(binding).cast_mut(), Ordering::AcqRel);
		// SAFETY: see `current`.
		let previous: &'static Binding<I> = unsafe { &*previous };

		if !ptr::eq(previous, binding) {
			// Threads still holding `previous` notice this and move on to `binding`.
			previous.handler.activatable().deactivate();
		}
		Some(previous.handler)
	}
}
