//! Runtime-swappable, process-wide handlers for cross-cutting concerns.
//!
//! A concern (logging, error handling, diagnostics) is declared as a trait with
//! [`Handler`] as a supertrait and registered with [`handler_interface!`]. Each
//! [`PolymorphicHandler<dyn Trait, Default, Hooks>`](PolymorphicHandler) instantiation is an
//! independent singleton whose current handler can be read on the hot path without locks
//! and replaced at runtime until it is finalized.
//!
//! Handlers are never owned here. Installing one requires a
//! [`StaticLifetimeGuard`] for its type, which keeps the handler alive for as long as any
//! thread might still use it.

mod activatable;
mod hooks;
mod interface;
mod polymorphic;

pub use activatable::Activatable;
pub use hooks::{DefaultHooks, Hooks, LogHooks};
pub use interface::{Handler, Upcast};
pub use polymorphic::PolymorphicHandler;
pub use switchyard_lifetime::StaticLifetimeGuard;
