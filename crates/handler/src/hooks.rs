use std::any::type_name;

/// Policy invoked when a finalized handler rejects a replacement.
pub trait Hooks<I: ?Sized> {
	/// Called exactly once per rejected `set`/`reset`, with the handler that stays current
	/// and the one that was refused.
	fn on_set_after_finalize(current: &I, rejected: &I);
}

/// Treats a replacement after finalization as fatal misuse and aborts the process.
///
/// Higher-level error reporting may itself sit on top of a polymorphic handler, so this
/// policy does not route through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl<I: ?Sized> Hooks<I> for DefaultHooks {
	fn on_set_after_finalize(_current: &I, _rejected: &I) {
		tracing::error!(interface = type_name::<I>(), "handler.set_after_finalize");
		std::process::abort();
	}
}

/// Non-fatal policy: reports the rejected replacement and keeps running.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHooks;

impl<I: ?Sized> Hooks<I> for LogHooks {
	fn on_set_after_finalize(_current: &I, _rejected: &I) {
		tracing::warn!(interface = type_name::<I>(), "handler.set_after_finalize");
	}
}
