//! The service container.
//!
//! A [`Container`] maps a contract type plus a [`Label`] to a factory and, once resolved, to
//! a shared instance of that contract. Factories receive the container itself, so they can
//! resolve their own dependencies, and the container always resolves itself under its own
//! type for every label.
//!
//! # Examples
//!
//! ```rust
//! use service_registry::Container;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! let container = Container::new();
//! container
//!     .register(|_| Arc::new(English) as Arc<dyn Greeter>)
//!     .unwrap();
//!
//! let shared = container.resolve::<dyn Greeter>().unwrap();
//! assert_eq!(shared.greet(), "hello");
//! assert!(Arc::ptr_eq(&shared, &container.resolve::<dyn Greeter>().unwrap()));
//!
//! let fresh = container.resolve_new::<dyn Greeter>().unwrap();
//! assert!(!Arc::ptr_eq(&shared, &fresh));
//! ```

use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::registry_key::RegistryKey;
use crate::registry_table::{ErasedFactory, Instance, RegistryTable};
use crate::{BoxError, Label, Registration, RegistryError, RegistryEvent, ResolveOutcome};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a [`RegistryEvent`] every time the container is
/// interacted with. It must be thread-safe because the container is shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// Thread-safe, type-keyed service container.
///
/// Always handled through an `Arc`: [`Container::new`] returns `Arc<Container>`, and
/// resolving `Container` from it yields that same `Arc`.
pub struct Container {
    this: Weak<Container>,
    table: RegistryTable,
    trace: RwLock<Option<Arc<TraceCallback>>>,
}

impl Container {
    /// Creates an empty container.
    ///
    /// Every container is fully isolated: registrations, cached instances and the trace
    /// callback belong to this instance only.
    pub fn new() -> Arc<Self> {
        Arc::new_cyclic(|this| Container {
            this: this.clone(),
            table: RegistryTable::new(),
            trace: RwLock::new(None),
        })
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Sets a tracing callback that will be invoked on every container interaction.
    ///
    /// The callback runs after the operation has released every internal lock, so it may
    /// call back into the container.
    ///
    /// # Example
    /// ```rust
    /// use service_registry::Container;
    ///
    /// let container = Container::new();
    /// container.set_trace_callback(|event| println!("[registry-trace] {event}"));
    /// ```
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        *self.trace.write() = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables tracing).
    pub fn clear_trace_callback(&self) {
        *self.trace.write() = None;
    }

    fn emit_event(&self, event: &RegistryEvent) {
        #[cfg(feature = "tracing")]
        tracing::trace!(target: "service_registry", event = %event, "registry operation");

        let callback = self.trace.read().clone();
        if let Some(callback) = callback {
            callback(event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Starts a registration of contract `T`.
    pub fn registration<T>(&self) -> Registration<'_, T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Registration::new(self)
    }

    /// Registers an infallible factory for `T` under the default label.
    ///
    /// The factory runs lazily, on the first resolution. Its result is shared by every
    /// following resolution until [`destroy`](Container::destroy) or
    /// [`unregister`](Container::unregister) is called.
    ///
    /// # Errors
    ///
    /// [`RegistryError::AlreadyRegistered`] if `T` already has a default registration.
    /// The existing registration, and any instance it cached, stay untouched.
    pub fn register<T, F>(&self, factory: F) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> Arc<T> + Send + Sync + 'static,
    {
        self.registration::<T>().factory(factory).register()
    }

    /// Registers an infallible factory for `T` under `label`.
    pub fn register_labeled<T, F>(
        &self,
        label: impl Into<Label>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> Arc<T> + Send + Sync + 'static,
    {
        self.registration::<T>()
            .label(label)
            .factory(factory)
            .register()
    }

    /// Registers a fallible factory for `T` under the default label.
    ///
    /// Errors returned by the factory are reported by [`resolve`](Container::resolve) as
    /// [`RegistryError::Construction`]; nothing is cached for a failed construction.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use service_registry::{Container, RegistryError};
    /// use std::sync::Arc;
    ///
    /// struct Port(u16);
    /// struct Endpoint(String);
    ///
    /// let container = Container::new();
    /// container.register(|_| Arc::new(Port(8080))).unwrap();
    /// container
    ///     .register_fallible(|c: &Container| -> Result<Arc<Endpoint>, RegistryError> {
    ///         let port = c.resolve::<Port>()?;
    ///         Ok(Arc::new(Endpoint(format!("localhost:{}", port.0))))
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(container.resolve::<Endpoint>().unwrap().0, "localhost:8080");
    /// ```
    pub fn register_fallible<T, F, E>(&self, factory: F) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> Result<Arc<T>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.registration::<T>().try_factory(factory).register()
    }

    /// Registers a fallible factory for `T` under `label`.
    pub fn register_fallible_labeled<T, F, E>(
        &self,
        label: impl Into<Label>,
        factory: F,
    ) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&Container) -> Result<Arc<T>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.registration::<T>()
            .label(label)
            .try_factory(factory)
            .register()
    }

    pub(crate) fn insert<T>(&self, label: Label, factory: ErasedFactory) -> Result<(), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        // The container occupies its own contract under every label.
        if is_container::<T>() {
            return Err(RegistryError::already_registered::<T>(label));
        }

        self.table
            .try_insert(RegistryKey::of::<T>(label.clone()), factory)
            .map_err(|_| RegistryError::already_registered::<T>(label.clone()))?;

        self.emit_event(&RegistryEvent::Register {
            type_name: std::any::type_name::<T>(),
            label,
        });
        Ok(())
    }

    /// Removes the default registration of `T`, factory and cached instance alike.
    ///
    /// Returns `true` iff a registration was removed. A later `register` starts over with
    /// no memory of the removed entry.
    pub fn unregister<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.unregister_labeled::<T>(Label::Default)
    }

    /// Removes the registration of `T` under `label`.
    pub fn unregister_labeled<T>(&self, label: impl Into<Label>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let label = label.into();
        let found = self.table.remove(&RegistryKey::of::<T>(label.clone()));

        self.emit_event(&RegistryEvent::Unregister {
            type_name: std::any::type_name::<T>(),
            label,
            found,
        });
        found
    }

    /// Drops the cached default instance of `T`, keeping its factory registered.
    ///
    /// Returns `true` iff a cached instance was present. Instances already handed out stay
    /// valid; the next resolution builds a new one.
    pub fn destroy<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.destroy_labeled::<T>(Label::Default)
    }

    /// Drops the cached instance of `T` under `label`.
    pub fn destroy_labeled<T>(&self, label: impl Into<Label>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let label = label.into();
        let found = self.table.clear_cache(&RegistryKey::of::<T>(label.clone()));

        self.emit_event(&RegistryEvent::Destroy {
            type_name: std::any::type_name::<T>(),
            label,
            found,
        });
        found
    }

    /// Drops every registration.
    ///
    /// Intended for tests. Already-resolved `Arc<T>` references remain valid and the trace
    /// callback is kept.
    pub fn clear(&self) {
        self.emit_event(&RegistryEvent::Clear {});
        self.table.clear();
    }

    // -------------------------------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------------------------------

    /// Returns `true` if `T` can be resolved under the default label.
    ///
    /// Cached or not makes no difference. `Container` itself is always resolvable.
    pub fn can_resolve<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.can_resolve_labeled::<T>(Label::Default)
    }

    /// Returns `true` if `T` can be resolved under `label`.
    pub fn can_resolve_labeled<T>(&self, label: impl Into<Label>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let label = label.into();
        let found =
            is_container::<T>() || self.table.contains(&RegistryKey::of::<T>(label.clone()));

        self.emit_event(&RegistryEvent::CanResolve {
            type_name: std::any::type_name::<T>(),
            label,
            found,
        });
        found
    }

    /// Resolves the shared default instance of `T`, building it on first use.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if `T` has no default registration
    /// - [`RegistryError::Construction`] if the factory fails
    pub fn resolve<T>(&self) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with::<T>(Label::Default, false)
    }

    /// Resolves the shared instance of `T` under `label`.
    pub fn resolve_labeled<T>(&self, label: impl Into<Label>) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with::<T>(label, false)
    }

    /// Builds a fresh default instance of `T`, bypassing the cache.
    pub fn resolve_new<T>(&self) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with::<T>(Label::Default, true)
    }

    /// Builds a fresh instance of `T` under `label`, bypassing the cache.
    pub fn resolve_new_labeled<T>(
        &self,
        label: impl Into<Label>,
    ) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with::<T>(label, true)
    }

    /// Resolves `T` under `label`.
    ///
    /// Resolving `Container` returns this container, whatever the label and `create_new`.
    /// Otherwise:
    ///
    /// - with `create_new`, the factory runs and its result is returned without touching
    ///   the cache (an existing shared instance stays in place);
    /// - without it, the cached instance is returned if there is one. If not, the factory
    ///   runs and its result is published as the shared instance. When several threads
    ///   race to build the first instance, the first one published wins and every racer
    ///   returns it.
    ///
    /// No lock is held while the factory runs, so factories may resolve other contracts.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::NotRegistered`] if nothing is registered for (`T`, `label`)
    /// - [`RegistryError::Construction`] wrapping the factory's error
    pub fn resolve_with<T>(
        &self,
        label: impl Into<Label>,
        create_new: bool,
    ) -> Result<Arc<T>, RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let label = label.into();
        let result = self.resolve_inner::<T>(&label, create_new);

        let outcome = match &result {
            Ok((_, outcome)) => *outcome,
            Err(err) if err.is_not_registered() => ResolveOutcome::Missing,
            Err(_) => ResolveOutcome::Failed,
        };
        self.emit_event(&RegistryEvent::Resolve {
            type_name: std::any::type_name::<T>(),
            label,
            outcome,
        });

        result.map(|(instance, _)| instance)
    }

    fn resolve_inner<T>(
        &self,
        label: &Label,
        create_new: bool,
    ) -> Result<(Arc<T>, ResolveOutcome), RegistryError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if is_container::<T>() {
            // Only unreachable while the last strong reference is being dropped.
            let this = self
                .this
                .upgrade()
                .ok_or_else(|| RegistryError::not_registered::<T>(label.clone()))?;
            return Ok((downcast::<T>(Arc::new(this))?, ResolveOutcome::Container));
        }

        let key = RegistryKey::of::<T>(label.clone());
        let snapshot = self
            .table
            .snapshot(&key)
            .ok_or_else(|| RegistryError::not_registered::<T>(label.clone()))?;

        if !create_new {
            if let Some(cached) = snapshot.cached {
                return Ok((downcast::<T>(cached)?, ResolveOutcome::Cached));
            }
        }

        let built = (snapshot.factory)(self)
            .map_err(|source| RegistryError::construction::<T>(label.clone(), source))?;

        if create_new {
            return Ok((downcast::<T>(built)?, ResolveOutcome::Fresh));
        }

        let shared = self
            .table
            .set_cache_if_absent(&key, snapshot.generation, Arc::clone(&built));
        let outcome = if Arc::ptr_eq(&shared, &built) {
            ResolveOutcome::Created
        } else {
            ResolveOutcome::Cached
        };
        Ok((downcast::<T>(shared)?, outcome))
    }

    /// Like [`resolve`](Container::resolve), but reports a missing registration or a failed
    /// construction as `None`.
    pub fn try_resolve<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.try_resolve_with::<T>(Label::Default, false)
    }

    /// Like [`resolve_labeled`](Container::resolve_labeled), returning `None` on failure.
    pub fn try_resolve_labeled<T>(&self, label: impl Into<Label>) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.try_resolve_with::<T>(label, false)
    }

    /// Like [`resolve_new`](Container::resolve_new), returning `None` on failure.
    pub fn try_resolve_new<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.try_resolve_with::<T>(Label::Default, true)
    }

    /// Like [`resolve_with`](Container::resolve_with), returning `None` on failure.
    ///
    /// The factory's error is discarded; nothing is cached for a failed construction, so
    /// the next resolution runs the factory again.
    pub fn try_resolve_with<T>(&self, label: impl Into<Label>, create_new: bool) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with::<T>(label, create_new).ok()
    }

    // -------------------------------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------------------------------

    /// Returns `true` if the default registration of `T` currently holds a shared instance.
    pub fn is_cached<T>(&self) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.is_cached_labeled::<T>(Label::Default)
    }

    /// Returns `true` if the registration of `T` under `label` holds a shared instance.
    pub fn is_cached_labeled<T>(&self, label: impl Into<Label>) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.table
            .is_cached(&RegistryKey::of::<T>(label.into()))
    }

    /// Number of explicit registrations. The container's own entry is not counted.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.len())
            .field("tracing", &self.trace.read().is_some())
            .finish()
    }
}

fn is_container<T: ?Sized + 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<Container>()
}

/// Recovers the `Arc<T>` carried by an erased instance.
fn downcast<T>(instance: Instance) -> Result<Arc<T>, RegistryError>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(RegistryError::type_mismatch::<T>)
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
