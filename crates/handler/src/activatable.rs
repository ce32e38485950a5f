use std::sync::atomic::{AtomicBool, Ordering};

/// Weakly ordered "am I still the current handler" flag.
///
/// The flag only steers cache refreshes, so every access is relaxed: it carries no ordering
/// for any other memory, it merely becomes visible to other threads eventually.
#[derive(Debug)]
pub struct Activatable {
	active: AtomicBool,
}

impl Activatable {
	/// Creates a flag in the given state.
	pub const fn new(active: bool) -> Self {
		Self {
			active: AtomicBool::new(active),
		}
	}

	/// Marks the owner as current.
	pub fn activate(&self) {
		self.active.store(true, Ordering::Relaxed);
	}

	/// Marks the owner as superseded.
	pub fn deactivate(&self) {
		self.active.store(false, Ordering::Relaxed);
	}

	/// Returns the last state visible to this thread.
	pub fn is_active(&self) -> bool {
		self.active.load(Ordering::Relaxed)
	}
}

impl Default for Activatable {
	fn default() -> Self {
		Self::new(true)
	}
}

/// Copies are snapshots: they own a fresh flag initialised from the source.
impl Clone for Activatable {
	fn clone(&self) -> Self {
		Self::new(self.is_active())
	}

	fn clone_from(&mut self, source: &Self) {
		// `&mut self` and `&Self` cannot alias, so there is no self-assignment case.
		*self.active.get_mut() = source.is_active();
	}
}

#[cfg(test)]
mod tests {
	use super::Activatable;

	#[test]
	fn starts_active() {
		assert!(Activatable::default().is_active());
		assert!(!Activatable::new(false).is_active());
	}

	#[test]
	fn toggles() {
		let flag = Activatable::default();
		flag.deactivate();
		assert!(!flag.is_active());
		flag.activate();
		flag.activate();
		assert!(flag.is_active());
	}

	#[test]
	fn clone_does_not_alias_source() {
		let original = Activatable::default();
		let copy = original.clone();
		original.deactivate();
		assert!(copy.is_active());
		assert!(!original.is_active());

		let snapshot = original.clone();
		original.activate();
		assert!(!snapshot.is_active());
	}

	#[test]
	fn clone_from_takes_current_value() {
		let source = Activatable::new(false);
		let mut target = Activatable::default();
		target.clone_from(&source);
		assert!(!target.is_active());

		source.activate();
		assert!(!target.is_active());
	}
}
