use std::any::TypeId;
use std::ptr;
use std::sync::atomic::{AtomicBool, AtomicPtr, AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rustc_hash::FxHashMap as HashMap;

/// Bookkeeping for one guarded type.
///
/// Slots are leaked on registration and never removed, so guards can hold `&'static Slot`
/// across any number of construct/teardown cycles of the instance itself.
pub(crate) struct Slot {
	/// Live tokens. A pin contributes one token that is never released.
	pub(crate) count: AtomicUsize,
	/// Type-erased `Box<T>` of the live instance, null while torn down.
	pub(crate) instance: AtomicPtr<()>,
	pub(crate) pinned: AtomicBool,
	/// Serializes construction and teardown.
	pub(crate) transition: Mutex<()>,
}

impl Slot {
	const fn new() -> Self {
		Self {
			count: AtomicUsize::new(0),
			instance: AtomicPtr::new(ptr::null_mut()),
			pinned: AtomicBool::new(false),
			transition: parking_lot::const_mutex(()),
		}
	}

	/// Takes a token without the transition lock, provided one is already held elsewhere.
	pub(crate) fn try_retain(&self) -> bool {
		let mut count = self.count.load(Ordering::Relaxed);
		while count != 0 {
			match self.count.compare_exchange_weak(count, count + 1, Ordering::Acquire, Ordering::Relaxed) {
				Ok(_) => return true,
				Err(actual) => count = actual,
			}
		}
		false
	}
}

static SLOTS: LazyLock<ArcSwap<HashMap<TypeId, &'static Slot>>> =
	LazyLock::new(|| ArcSwap::from_pointee(HashMap::default()));

static SLOTS_WRITE: Mutex<()> = parking_lot::const_mutex(());

/// Returns the slot for `T`, registering it on first use.
pub(crate) fn slot_for<T: 'static>() -> &'static Slot {
	let id = TypeId::of::<T>();
	if let Some(slot) = SLOTS.load().get(&id).copied() {
		return slot;
	}

	let _write = SLOTS_WRITE.lock();
	let current = SLOTS.load_full();
	if let Some(slot) = current.get(&id).copied() {
		return slot;
	}

	let slot: &'static Slot = Box::leak(Box::new(Slot::new()));
	let mut next = HashMap::clone(&current);
	next.insert(id, slot);
	let registered = next.len();
	SLOTS.store(Arc::new(next));
	tracing::trace!(type_name = std::any::type_name::<T>(), registered, "lifetime.slot_registered");
	slot
}
