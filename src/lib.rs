//! # Service Registry
//!
//! A thread-safe, type-keyed service registry for dependency injection.
//!
//! Callers register a factory for a contract, optionally qualified by a label, and later
//! resolve it. A resolution returns either the shared instance cached for that
//! (contract, label) pair or, on request, a freshly built one. Factories receive the
//! container, so they can resolve their own dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_registry::Container;
//! use std::sync::Arc;
//!
//! struct Config {
//!     url: String,
//! }
//!
//! struct Client {
//!     config: Arc<Config>,
//! }
//!
//! let container = Container::new();
//!
//! // Register factories
//! container
//!     .register(|_| Arc::new(Config { url: "postgres://localhost".into() }))
//!     .unwrap();
//! container
//!     .register(|c| Arc::new(Client { config: c.resolve::<Config>().expect("config") }))
//!     .unwrap();
//!
//! // Resolve the shared instance
//! let client: Arc<Client> = container.resolve().unwrap();
//! assert_eq!(client.config.url, "postgres://localhost");
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: All operations are safe to use across multiple threads
//! - **Type-safe**: Contracts are plain types or trait objects (`dyn Trait`)
//! - **Labels**: Several independent registrations per contract
//! - **Re-entrant**: No lock is held while a factory runs
//! - **Tracing support**: Optional callback system for monitoring container operations
//!
//! ## Main Operations
//!
//! - [`Container::register`] - Register a factory (see also [`Container::registration`])
//! - [`Container::resolve`] - Resolve the shared instance
//! - [`Container::resolve_new`] - Build a fresh, uncached instance
//! - [`Container::try_resolve`] - Resolve without an error for missing contracts
//! - [`Container::can_resolve`] - Check if a contract is registered
//! - [`Container::destroy`] - Drop the shared instance, keep the factory
//! - [`Container::unregister`] - Remove the registration
//! - [`Container::set_trace_callback`] - Set up tracing for container operations
//! - [`define_container!`] - Declare a named, process-wide container

mod container;
mod macros;
mod registration;
mod registry_error;
mod registry_event;
mod registry_key;
mod registry_table;

// Re-export the main public API
pub use container::{Container, TraceCallback};
pub use registration::Registration;
pub use registry_error::{BoxError, RegistryError};
pub use registry_event::{RegistryEvent, ResolveOutcome};
pub use registry_key::Label;
