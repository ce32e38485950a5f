//! Shared fixtures for handler integration tests.
#![allow(dead_code)]

pub use switchyard_handler::{Activatable, Handler, LogHooks, PolymorphicHandler, StaticLifetimeGuard};

/// Interface whose handlers report a fixed name.
pub trait Named: Handler {
	fn name(&self) -> &'static str;
}
switchyard_handler::handler_interface!(Named);

/// Second, unrelated interface.
pub trait Sink: Handler {
	fn accept(&self, value: u64) -> u64;
}
switchyard_handler::handler_interface!(Sink);

/// Declares default-constructible [`Named`] handlers named after their type.
macro_rules! named {
	($($name:ident),+ $(,)?) => {$(
		#[derive(Default)]
		pub struct $name {
			activatable: $crate::common::Activatable,
		}

		impl $crate::common::Handler for $name {
			fn activatable(&self) -> &$crate::common::Activatable {
				&self.activatable
			}
		}

		impl $crate::common::Named for $name {
			fn name(&self) -> &'static str {
				stringify!($name)
			}
		}
	)+};
}

pub fn is_active<T>() -> bool
where
	T: Handler + Default,
{
	StaticLifetimeGuard::<T>::instance().activatable().is_active()
}

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt::try_init();
}
