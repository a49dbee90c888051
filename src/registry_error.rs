use crate::Label;

/// Boxed error produced by a fallible factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`Container`](crate::Container) operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A registration was submitted without a factory.
    #[error("no factory supplied for {type_name} under label {label}")]
    MissingFactory {
        type_name: &'static str,
        label: Label,
    },

    /// The (contract, label) pair already has a registration.
    #[error("{type_name} is already registered under label {label}")]
    AlreadyRegistered {
        type_name: &'static str,
        label: Label,
    },

    /// Nothing is registered for the requested (contract, label) pair.
    #[error("{type_name} is not registered under label {label}")]
    NotRegistered {
        type_name: &'static str,
        label: Label,
    },

    /// The factory failed while building an instance.
    #[error("failed to construct {type_name} under label {label}: {source}")]
    Construction {
        type_name: &'static str,
        label: Label,
        #[source]
        source: BoxError,
    },

    /// A stored instance did not downcast to the requested contract.
    #[error("type mismatch in registry for {type_name}")]
    TypeMismatch { type_name: &'static str },
}

impl RegistryError {
    pub(crate) fn missing_factory<T: ?Sized>(label: Label) -> Self {
        RegistryError::MissingFactory {
            type_name: std::any::type_name::<T>(),
            label,
        }
    }

    pub(crate) fn already_registered<T: ?Sized>(label: Label) -> Self {
        RegistryError::AlreadyRegistered {
            type_name: std::any::type_name::<T>(),
            label,
        }
    }

    pub(crate) fn not_registered<T: ?Sized>(label: Label) -> Self {
        RegistryError::NotRegistered {
            type_name: std::any::type_name::<T>(),
            label,
        }
    }

    pub(crate) fn construction<T: ?Sized>(label: Label, source: BoxError) -> Self {
        RegistryError::Construction {
            type_name: std::any::type_name::<T>(),
            label,
            source,
        }
    }

    pub(crate) fn type_mismatch<T: ?Sized>() -> Self {
        RegistryError::TypeMismatch {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the error reports a missing registration.
    pub fn is_not_registered(&self) -> bool {
        matches!(self, RegistryError::NotRegistered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_missing_factory_display() {
        let err = RegistryError::missing_factory::<u32>(Label::Default);
        assert_eq!(
            err.to_string(),
            "no factory supplied for u32 under label <default>"
        );
    }

    #[test]
    fn test_already_registered_display() {
        let err = RegistryError::already_registered::<u32>(Label::from("TestLabel"));
        assert_eq!(
            err.to_string(),
            "u32 is already registered under label \"TestLabel\""
        );
    }

    #[test]
    fn test_not_registered_display() {
        let err = RegistryError::not_registered::<String>(Label::Default);
        assert_eq!(
            err.to_string(),
            "alloc::string::String is not registered under label <default>"
        );
        assert!(err.is_not_registered());
    }

    #[test]
    fn test_construction_keeps_source() {
        let err = RegistryError::construction::<u8>(Label::Default, "boom".into());
        assert_eq!(
            err.to_string(),
            "failed to construct u8 under label <default>: boom"
        );
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".into()));
        assert!(!err.is_not_registered());
    }

    #[test]
    fn test_debug_format() {
        let err = RegistryError::type_mismatch::<u8>();
        assert_eq!(format!("{:?}", err), "TypeMismatch { type_name: \"u8\" }");
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn Error = &RegistryError::not_registered::<u8>(Label::Default);
        assert_eq!(err.to_string(), "u8 is not registered under label <default>");
    }
}
