//! Registration builder.
//!
//! [`Registration`] collects a label and a factory before committing them to the container.
//! It is the general form behind [`Container::register`] and friends, and the only way to
//! submit a registration whose factory may be missing.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::registry_table::{ErasedFactory, Instance};
use crate::{BoxError, Container, Label, RegistryError};

/// Pending registration of contract `T`.
///
/// Obtained from [`Container::registration`]. Nothing touches the container until
/// [`register`](Registration::register) is called.
///
/// # Examples
///
/// ```rust
/// use service_registry::{Container, RegistryError};
/// use std::sync::Arc;
///
/// let container = Container::new();
///
/// container
///     .registration::<String>()
///     .label("greeting")
///     .factory(|_| Arc::new("hello".to_string()))
///     .register()
///     .unwrap();
///
/// // Without a factory the registration is refused and nothing is stored.
/// let refused = container.registration::<u32>().register();
/// assert!(matches!(refused, Err(RegistryError::MissingFactory { .. })));
/// assert!(!container.can_resolve::<u32>());
/// ```
#[must_use = "a registration does nothing until `register` is called"]
pub struct Registration<'c, T: ?Sized> {
    container: &'c Container,
    label: Label,
    factory: Option<ErasedFactory>,
    contract: PhantomData<fn() -> Arc<T>>,
}

impl<'c, T> Registration<'c, T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub(crate) fn new(container: &'c Container) -> Self {
        Self {
            container,
            label: Label::Default,
            factory: None,
            contract: PhantomData,
        }
    }

    /// Registers under `label` instead of the default label.
    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets an infallible factory.
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn(&Container) -> Arc<T> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(
            move |container: &Container| -> Result<Instance, BoxError> {
                Ok(Arc::new(factory(container)) as Instance)
            },
        ));
        self
    }

    /// Sets a factory whose errors surface as [`RegistryError::Construction`].
    pub fn try_factory<F, E>(mut self, factory: F) -> Self
    where
        F: Fn(&Container) -> Result<Arc<T>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.factory = Some(Arc::new(
            move |container: &Container| -> Result<Instance, BoxError> {
                match factory(container) {
                    Ok(instance) => Ok(Arc::new(instance) as Instance),
                    Err(err) => Err(err.into()),
                }
            },
        ));
        self
    }

    /// Commits the registration.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::MissingFactory`] if no factory was set
    /// - [`RegistryError::AlreadyRegistered`] if the (contract, label) pair is taken
    pub fn register(self) -> Result<(), RegistryError> {
        let Some(factory) = self.factory else {
            return Err(RegistryError::missing_factory::<T>(self.label));
        };
        self.container.insert::<T>(self.label, factory)
    }
}
