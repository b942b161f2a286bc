//! Core types for the Ariadne routing engine.
//!
//! This crate sits on top of `ariadne-router` and provides the pieces that
//! talk to the application: the [`DispatchError`] taxonomy, the injected
//! [`HandlerRegistry`] collaborator, convention-based handler resolution
//! ([`HandlerResolver`]), and the thin [`Dispatcher`] orchestration layer.
//!
//! The dispatcher is the boundary of this core: it produces a resolved
//! handler identifier, an optional action name, and per-request parameters.
//! Instantiating the handler, running its lifecycle, and translating errors
//! into transport responses are the caller's responsibility.

mod dispatch;
mod error;
mod registry;
mod resolver;

pub use dispatch::{Dispatch, Dispatcher};
pub use error::{DispatchError, DispatchResult, ErrorDetail, ErrorEnvelope};
pub use registry::{HandlerRegistry, StaticRegistry, TypedRegistry};
pub use resolver::{HandlerResolver, NamespaceRoot, ResolveError, ResolvedHandler};
