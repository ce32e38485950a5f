use crate::Activatable;

/// Capability shared by every pluggable interface.
///
/// Interfaces are traits with `Handler` as a supertrait; handlers are the types
/// implementing them.
pub trait Handler: Send + Sync + 'static {
	fn activatable(&self) -> &Activatable;
}

/// Static proof that handler type `H` can be installed behind the interface `Self`.
///
/// Implemented on the trait object type (`dyn Interface`) for every `H` that implements the
/// interface; [`handler_interface!`](crate::handler_interface) writes that blanket impl.
pub trait Upcast<H: 'static>: Handler {
	fn upcast(handler: &H) -> &Self;
}

/// Declares a trait as a pluggable handler interface.
///
/// ```
/// use switchyard_handler::{Activatable, Handler};
///
/// pub trait Logger: Handler {
/// 	fn log(&self, message: &str);
/// }
/// switchyard_handler::handler_interface!(Logger);
///
/// #[derive(Default)]
/// struct Silent {
/// 	activatable: Activatable,
/// }
///
/// impl Handler for Silent {
/// 	fn activatable(&self) -> &Activatable {
/// 		&self.activatable
/// 	}
/// }
///
/// impl Logger for Silent {
/// 	fn log(&self, _message: &str) {}
/// }
///
/// type Logging = switchyard_handler::PolymorphicHandler<dyn Logger, Silent>;
///
/// Logging::get().log("hello");
/// ```
#[macro_export]
macro_rules! handler_interface {
	($($interface:tt)+) => {
		impl<H: $($interface)+> $crate::Upcast<H> for dyn $($interface)+ {
			fn upcast(handler: &H) -> &Self {
				handler
			}
		}
	};
}
