use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr;
use std::sync::atomic::Ordering;

use crate::slot::{Slot, slot_for};

/// Token keeping the process-wide instance of `T` alive.
///
/// The instance is constructed when the first token is acquired and dropped when the last
/// token is released, unless it has been pinned.
pub struct StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	slot: &'static Slot,
	_instance: PhantomData<fn() -> T>,
}

impl<T> StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	/// Acquires a token, constructing the instance if none is alive.
	pub fn new() -> Self {
		let slot = slot_for::<T>();
		if !slot.try_retain() {
			Self::retain_slow(slot);
		}
		Self {
			slot,
			_instance: PhantomData,
		}
	}

	fn retain_slow(slot: &'static Slot) {
		let _transition = slot.transition.lock();
		// A release that hit zero may still be waiting for the lock; its instance is reused.
		if slot.count.load(Ordering::Acquire) == 0 && slot.instance.load(Ordering::Acquire).is_null() {
			let instance = Box::into_raw(Box::new(T::default()));
			slot.instance.store(instance.cast(), Ordering::Release);
			tracing::trace!(type_name = type_name::<T>(), "lifetime.construct");
		}
		slot.count.fetch_add(1, Ordering::AcqRel);
	}

	/// Returns the instance for as long as this token is held.
	pub fn get(&self) -> &T {
		let instance = self.slot.instance.load(Ordering::Acquire);
		// SAFETY: this token keeps `count` non-zero and teardown only happens at zero, so
		// `instance` is the live `Box<T>` published before the count was raised.
		unsafe { &*instance.cast::<T>() }
	}

	/// Converts this token into a permanent pin and returns the instance.
	///
	/// Only the first pin of a type keeps its token; later pins release theirs.
	pub fn pin(self) -> &'static T {
		let instance: *const T = self.get();
		if !self.slot.pinned.swap(true, Ordering::AcqRel) {
			mem::forget(self);
			tracing::trace!(type_name = type_name::<T>(), "lifetime.pin");
		}
		// SAFETY: the leaked pin token keeps `count` above zero forever, so the instance is
		// never torn down.
		unsafe { &*instance }
	}

	/// Returns the instance, pinning it on first use.
	///
	/// Once pinned this is lock-free.
	pub fn instance() -> &'static T {
		let slot = slot_for::<T>();
		if slot.pinned.load(Ordering::Acquire) {
			let instance = slot.instance.load(Ordering::Acquire);
			// SAFETY: the pin flag is set only after the pinned instance was observed, and a
			// pinned instance is never torn down.
			return unsafe { &*instance.cast::<T>() };
		}
		Self::new().pin()
	}

	/// Number of live tokens. A pin counts as one.
	pub fn count() -> usize {
		slot_for::<T>().count.load(Ordering::Acquire)
	}

	/// Whether an instance of `T` currently exists.
	pub fn is_alive() -> bool {
		!slot_for::<T>().instance.load(Ordering::Acquire).is_null()
	}

	/// Whether the instance of `T` has been pinned for the rest of the process.
	pub fn is_pinned() -> bool {
		slot_for::<T>().pinned.load(Ordering::Acquire)
	}
}

impl<T> Default for StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	fn clone(&self) -> Self {
		self.slot.count.fetch_add(1, Ordering::Relaxed);
		Self {
			slot: self.slot,
			_instance: PhantomData,
		}
	}
}

impl<T> Drop for StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	fn drop(&mut self) {
		if self.slot.count.fetch_sub(1, Ordering::Release) != 1 {
			return;
		}

		let _transition = self.slot.transition.lock();
		if self.slot.count.load(Ordering::Acquire) != 0 {
			return;
		}
		let instance = self.slot.instance.swap(ptr::null_mut(), Ordering::AcqRel);
		if instance.is_null() {
			return;
		}

		tracing::trace!(type_name = type_name::<T>(), "lifetime.teardown");
		// SAFETY: the pointer came from `Box::into_raw` in `retain_slow` and was swapped out
		// under the transition lock, so this is its only owner.
		drop(unsafe { Box::from_raw(instance.cast::<T>()) });
	}
}

impl<T> fmt::Debug for StaticLifetimeGuard<T>
where
	T: Default + Send + Sync + 'static,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("StaticLifetimeGuard")
			.field("type", &type_name::<T>())
			.field("count", &self.slot.count.load(Ordering::Relaxed))
			.field("pinned", &self.slot.pinned.load(Ordering::Relaxed))
			.finish()
	}
}
