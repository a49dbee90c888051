//! Registration keys.
//!
//! Every registration is addressed by the pair of the contract's [`TypeId`] and a [`Label`].
//! A contract may be registered once under the default label and once under each distinct
//! named label; those registrations never see each other.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Qualifier partitioning the registrations of a single contract.
///
/// The empty string is treated as [`Label::Default`], so `Label::from("")` and
/// `Label::default()` address the same registration.
///
/// # Examples
///
/// ```rust
/// use service_registry::Label;
///
/// assert_eq!(Label::from(""), Label::Default);
/// assert_eq!(Label::from(None::<&str>), Label::Default);
/// assert_ne!(Label::from("primary"), Label::Default);
/// assert_eq!(Label::from("primary").as_str(), Some("primary"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Label {
    /// The label used when the caller does not name one.
    #[default]
    Default,
    /// A caller-supplied, non-empty label.
    Named(Arc<str>),
}

impl Label {
    /// Returns the label text, or `None` for the default label.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Label::Default => None,
            Label::Named(name) => Some(name),
        }
    }

    /// Returns `true` for [`Label::Default`].
    pub fn is_default(&self) -> bool {
        matches!(self, Label::Default)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Label::Default
        } else {
            Label::Named(Arc::from(value))
        }
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::from(value.as_str())
    }
}

impl From<&String> for Label {
    fn from(value: &String) -> Self {
        Label::from(value.as_str())
    }
}

impl From<Option<&str>> for Label {
    fn from(value: Option<&str>) -> Self {
        value.map(Label::from).unwrap_or_default()
    }
}

impl From<&Label> for Label {
    fn from(value: &Label) -> Self {
        value.clone()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Default => write!(f, "<default>"),
            Label::Named(name) => write!(f, "{name:?}"),
        }
    }
}

/// Composite table key: contract identity plus label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct RegistryKey {
    type_id: TypeId,
    label: Label,
}

impl RegistryKey {
    pub(crate) fn of<T: ?Sized + 'static>(label: Label) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_default_label() {
        assert_eq!(Label::from(""), Label::Default);
        assert_eq!(Label::from(String::new()), Label::Default);
        assert!(Label::from("").is_default());
    }

    #[test]
    fn test_named_labels_compare_by_content() {
        let a = Label::from("TestLabel");
        let b = Label::from("TestLabel".to_string());
        assert_eq!(a, b);
        assert_ne!(a, Label::from("Other"));
        assert_ne!(a, Label::Default);
    }

    #[test]
    fn test_display() {
        assert_eq!(Label::Default.to_string(), "<default>");
        assert_eq!(Label::from("TestLabel").to_string(), "\"TestLabel\"");
    }

    #[test]
    fn test_keys_partition_by_type_and_label() {
        let default_u8 = RegistryKey::of::<u8>(Label::Default);
        assert_eq!(default_u8, RegistryKey::of::<u8>(Label::from("")));
        assert_ne!(default_u8, RegistryKey::of::<u8>(Label::from("x")));
        assert_ne!(default_u8, RegistryKey::of::<u16>(Label::Default));
    }

    #[test]
    fn test_keys_accept_unsized_contracts() {
        trait Contract {}
        let key = RegistryKey::of::<dyn Contract>(Label::Default);
        assert_eq!(key, RegistryKey::of::<dyn Contract>(Label::Default));
        assert_ne!(key, RegistryKey::of::<str>(Label::Default));
    }
}
