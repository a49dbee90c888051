//! Example services shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};
use uuid::Uuid;

pub const TEST_LABEL: &str = "TestLabel";

/// Contract for a leaf service.
pub trait Bar: Send + Sync {
    fn unique_identifier(&self) -> Uuid;
}

/// Contract for a service depending on [`Bar`].
pub trait Foo: Send + Sync {
    fn bar(&self) -> Option<Arc<dyn Bar>>;
    fn unique_identifier(&self) -> Uuid;
}

#[derive(Debug, thiserror::Error)]
#[error("bar construction refused")]
pub struct BarRefused;

pub struct SimpleBar {
    unique_identifier: Uuid,
}

impl SimpleBar {
    pub fn new() -> Self {
        Self {
            unique_identifier: Uuid::new_v4(),
        }
    }

    pub fn shared() -> Arc<dyn Bar> {
        Arc::new(Self::new())
    }

    /// Construction that always fails.
    pub fn refused() -> Result<Arc<dyn Bar>, BarRefused> {
        Err(BarRefused)
    }
}

impl Bar for SimpleBar {
    fn unique_identifier(&self) -> Uuid {
        self.unique_identifier
    }
}

pub struct SimpleFoo {
    unique_identifier: Uuid,
    bar: OnceLock<Arc<dyn Bar>>,
}

impl SimpleFoo {
    pub fn new() -> Self {
        Self {
            unique_identifier: Uuid::new_v4(),
            bar: OnceLock::new(),
        }
    }

    /// Constructor injection.
    pub fn with_bar(bar: Arc<dyn Bar>) -> Self {
        let foo = Self::new();
        foo.set_bar(bar);
        foo
    }

    /// Property injection; the first value set sticks.
    pub fn set_bar(&self, bar: Arc<dyn Bar>) {
        let _ = self.bar.set(bar);
    }
}

impl Foo for SimpleFoo {
    fn bar(&self) -> Option<Arc<dyn Bar>> {
        self.bar.get().cloned()
    }

    fn unique_identifier(&self) -> Uuid {
        self.unique_identifier
    }
}
