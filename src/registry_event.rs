use std::fmt;

use crate::Label;

/// How a resolution request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The container resolved itself.
    Container,
    /// A previously cached shared instance was returned.
    Cached,
    /// The factory ran and its result became the shared instance.
    Created,
    /// The factory ran for a fresh, uncached instance.
    Fresh,
    /// Nothing was registered for the key.
    Missing,
    /// The factory returned an error.
    Failed,
}

impl ResolveOutcome {
    /// Whether the request produced an instance.
    pub fn is_success(self) -> bool {
        !matches!(self, ResolveOutcome::Missing | ResolveOutcome::Failed)
    }
}

impl fmt::Display for ResolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolveOutcome::Container => "container",
            ResolveOutcome::Cached => "cached",
            ResolveOutcome::Created => "created",
            ResolveOutcome::Fresh => "fresh",
            ResolveOutcome::Missing => "missing",
            ResolveOutcome::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Events emitted by a container during operations.
///
/// These events are passed to the tracing callback set via
/// [`Container::set_trace_callback`](crate::Container::set_trace_callback).
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use service_registry::{Label, RegistryEvent};
///
/// let event = RegistryEvent::Register { type_name: "i32", label: Label::Default };
/// assert_eq!(event.to_string(), "register { type_name: i32, label: <default> }");
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A factory was registered.
    Register {
        /// The contract's type name (e.g., "i32", "alloc::string::String")
        type_name: &'static str,
        label: Label,
    },

    /// A registration removal was attempted.
    Unregister {
        type_name: &'static str,
        label: Label,
        /// Whether an entry was removed
        found: bool,
    },

    /// A cached instance release was attempted.
    Destroy {
        type_name: &'static str,
        label: Label,
        /// Whether a cached instance was dropped
        found: bool,
    },

    /// An instance was requested.
    Resolve {
        type_name: &'static str,
        label: Label,
        outcome: ResolveOutcome,
    },

    /// A registration existence check was performed.
    CanResolve {
        type_name: &'static str,
        label: Label,
        found: bool,
    },

    /// Every registration was dropped.
    Clear {},
}

impl RegistryEvent {
    /// Type name the event refers to, if any.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            RegistryEvent::Register { type_name, .. }
            | RegistryEvent::Unregister { type_name, .. }
            | RegistryEvent::Destroy { type_name, .. }
            | RegistryEvent::Resolve { type_name, .. }
            | RegistryEvent::CanResolve { type_name, .. } => Some(*type_name),
            RegistryEvent::Clear {} => None,
        }
    }
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Register { type_name, label } => {
                write!(f, "register {{ type_name: {type_name}, label: {label} }}")
            }
            RegistryEvent::Unregister {
                type_name,
                label,
                found,
            } => write!(
                f,
                "unregister {{ type_name: {type_name}, label: {label}, found: {found} }}"
            ),
            RegistryEvent::Destroy {
                type_name,
                label,
                found,
            } => write!(
                f,
                "destroy {{ type_name: {type_name}, label: {label}, found: {found} }}"
            ),
            RegistryEvent::Resolve {
                type_name,
                label,
                outcome,
            } => write!(
                f,
                "resolve {{ type_name: {type_name}, label: {label}, outcome: {outcome} }}"
            ),
            RegistryEvent::CanResolve {
                type_name,
                label,
                found,
            } => write!(
                f,
                "can_resolve {{ type_name: {type_name}, label: {label}, found: {found} }}"
            ),
            RegistryEvent::Clear {} => write!(f, "Clearing the Registry"),
        }
    }
}
