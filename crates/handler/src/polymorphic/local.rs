//! Per-thread cache of the last resolved handler, one entry per handler instantiation.

use std::any::{Any, TypeId};
use std::cell::RefCell;

use rustc_hash::FxHashMap as HashMap;

#[derive(Clone, Copy)]
struct LocalEntry {
	instance: &'static dyn Any,
	current: &'static dyn Any,
}

thread_local! {
	static LOCAL_HANDLERS: RefCell<HashMap<TypeId, LocalEntry>> = RefCell::new(HashMap::default());
}

/// Returns the cached singleton and binding for `S`, if this thread resolved one before.
///
/// Returns `None` once the thread's storage is being torn down.
pub(super) fn load<S: 'static, B: 'static>() -> Option<(&'static S, &'static B)> {
	let entry = LOCAL_HANDLERS
		.try_with(|local| local.borrow().get(&TypeId::of::<S>()).copied())
		.ok()
		.flatten()?;
	Some((entry.instance.downcast_ref()?, entry.current.downcast_ref()?))
}

pub(super) fn store<S: 'static, B: 'static>(instance: &'static S, current: &'static B) {
	let entry = LocalEntry { instance, current };
	let _ = LOCAL_HANDLERS.try_with(|local| {
		local.borrow_mut().insert(TypeId::of::<S>(), entry);
	});
}
