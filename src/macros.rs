//! Macros for creating process-wide containers.

/// Creates a named, process-wide container with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily built `Container` static (hidden)
/// - `container()` returning a handle to it
/// - Free functions delegating to the container
///
/// # Examples
///
/// ```rust
/// use service_registry::define_container;
/// use std::sync::Arc;
///
/// // Create a global container
/// define_container!(global);
///
/// // Register factories (ergonomic free functions)
/// global::register(|_| Arc::new(42i32)).unwrap();
/// global::register_labeled("greeting", |_| Arc::new("Hello".to_string())).unwrap();
///
/// // Resolve shared instances
/// let num: Arc<i32> = global::resolve().unwrap();
/// let msg: Arc<String> = global::resolve_labeled("greeting").unwrap();
///
/// assert_eq!(*num, 42);
/// assert_eq!(&**msg, "Hello");
/// ```
///
/// # Multiple Containers
///
/// Every generated module owns its own container:
///
/// ```rust
/// use service_registry::define_container;
/// use std::sync::Arc;
///
/// define_container!(database);
/// define_container!(cache);
///
/// database::register(|_| Arc::new("db_connection".to_string())).unwrap();
///
/// // No interference between containers
/// assert!(database::can_resolve::<String>());
/// assert!(!cache::can_resolve::<String>());
/// ```
///
/// # Direct Access
///
/// Operations without a free-function wrapper are reachable through `container()`:
///
/// ```rust
/// use service_registry::define_container;
/// use std::sync::Arc;
///
/// define_container!(app);
///
/// app::register(|_| Arc::new(100i32)).unwrap();
/// let fresh: Arc<i32> = app::container().resolve_new().unwrap();
/// assert_eq!(*fresh, 100);
/// ```
#[macro_export]
macro_rules! define_container {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // Storage for the container (module-private)
            static CONTAINER: LazyLock<Arc<$crate::Container>> =
                LazyLock::new($crate::Container::new);

            /// Handle to this module's container.
            pub fn container() -> Arc<$crate::Container> {
                Arc::clone(&CONTAINER)
            }

            /// Register a factory under the default label.
            pub fn register<T, F>(factory: F) -> Result<(), $crate::RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
                F: Fn(&$crate::Container) -> Arc<T> + Send + Sync + 'static,
            {
                CONTAINER.register(factory)
            }

            /// Register a factory under `label`.
            pub fn register_labeled<T, F>(
                label: impl Into<$crate::Label>,
                factory: F,
            ) -> Result<(), $crate::RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
                F: Fn(&$crate::Container) -> Arc<T> + Send + Sync + 'static,
            {
                CONTAINER.register_labeled(label, factory)
            }

            /// Resolve the shared default instance.
            pub fn resolve<T>() -> Result<Arc<T>, $crate::RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.resolve::<T>()
            }

            /// Resolve the shared instance under `label`.
            pub fn resolve_labeled<T>(
                label: impl Into<$crate::Label>,
            ) -> Result<Arc<T>, $crate::RegistryError>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.resolve_labeled::<T>(label)
            }

            /// Resolve the shared default instance, `None` on failure.
            pub fn try_resolve<T>() -> Option<Arc<T>>
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.try_resolve::<T>()
            }

            /// Check if a default registration exists.
            pub fn can_resolve<T>() -> bool
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.can_resolve::<T>()
            }

            /// Drop the cached default instance.
            pub fn destroy<T>() -> bool
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.destroy::<T>()
            }

            /// Remove the default registration.
            pub fn unregister<T>() -> bool
            where
                T: ?Sized + Send + Sync + 'static,
            {
                CONTAINER.unregister::<T>()
            }

            /// Set a tracing callback for container operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                CONTAINER.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                CONTAINER.clear_trace_callback()
            }
        }
    };
}
