//! Integration tests for composing services from other registrations.
//!
//! Factories receive the container and resolve their own dependencies, either as
//! constructor arguments or by setting them on the freshly built value.

mod common;

use common::{Bar, Foo, SimpleBar, SimpleFoo};
use service_registry::{Container, RegistryError};
use std::sync::Arc;

#[test]
fn test_constructor_injection() {
    let container = Container::new();
    container.register(|_| SimpleBar::shared()).unwrap();
    container
        .register_fallible(|c: &Container| -> Result<Arc<dyn Foo>, RegistryError> {
            Ok(Arc::new(SimpleFoo::with_bar(c.resolve::<dyn Bar>()?)))
        })
        .unwrap();

    let actual = container.resolve::<dyn Foo>().unwrap();
    let bar = actual.bar().expect("bar should be injected");

    // The injected dependency is the shared Bar of the container.
    let shared = container.resolve::<dyn Bar>().unwrap();
    assert!(Arc::ptr_eq(&bar, &shared));
}

#[test]
fn test_property_injection() {
    let container = Container::new();
    container.register(|_| SimpleBar::shared()).unwrap();
    container
        .register_fallible(|c: &Container| -> Result<Arc<dyn Foo>, RegistryError> {
            let foo = SimpleFoo::new();
            foo.set_bar(c.resolve::<dyn Bar>()?);
            Ok(Arc::new(foo))
        })
        .unwrap();

    let actual = container.resolve::<dyn Foo>().unwrap();
    assert!(actual.bar().is_some());
    assert!(!actual.unique_identifier().is_nil());
}

#[test]
fn test_missing_dependency_surfaces_as_construction_error() {
    let container = Container::new();
    container
        .register_fallible(|c: &Container| -> Result<Arc<dyn Foo>, RegistryError> {
            Ok(Arc::new(SimpleFoo::with_bar(c.resolve::<dyn Bar>()?)))
        })
        .unwrap();

    match container.resolve::<dyn Foo>() {
        Err(RegistryError::Construction { source, .. }) => {
            let inner = source
                .downcast_ref::<RegistryError>()
                .expect("source should be the inner registry error");
            assert!(inner.is_not_registered());
        }
        other => panic!("expected Construction, got {:?}", other.map(|_| ())),
    }

    // Registering the dependency later lets the same factory succeed.
    container.register(|_| SimpleBar::shared()).unwrap();
    assert!(container.resolve::<dyn Foo>().is_ok());
}

#[test]
fn test_fresh_composite_shares_cached_dependency() {
    let container = Container::new();
    container.register(|_| SimpleBar::shared()).unwrap();
    container
        .register_fallible(|c: &Container| -> Result<Arc<dyn Foo>, RegistryError> {
            Ok(Arc::new(SimpleFoo::with_bar(c.resolve::<dyn Bar>()?)))
        })
        .unwrap();

    let first = container.resolve_new::<dyn Foo>().unwrap();
    let second = container.resolve_new::<dyn Foo>().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first.bar().unwrap(), &second.bar().unwrap()));
}

#[test]
fn test_labeled_dependencies() {
    let container = Container::new();
    container
        .register_labeled("primary", |_| SimpleBar::shared())
        .unwrap();
    container
        .register_labeled("replica", |_| SimpleBar::shared())
        .unwrap();
    container
        .registration::<dyn Foo>()
        .label("replica")
        .try_factory(|c: &Container| -> Result<Arc<dyn Foo>, RegistryError> {
            Ok(Arc::new(SimpleFoo::with_bar(
                c.resolve_labeled::<dyn Bar>("replica")?,
            )))
        })
        .register()
        .unwrap();

    let foo = container.resolve_labeled::<dyn Foo>("replica").unwrap();
    let replica = container.resolve_labeled::<dyn Bar>("replica").unwrap();
    let primary = container.resolve_labeled::<dyn Bar>("primary").unwrap();

    assert!(Arc::ptr_eq(&foo.bar().unwrap(), &replica));
    assert!(!Arc::ptr_eq(&foo.bar().unwrap(), &primary));
}

#[test]
fn test_factory_can_capture_the_container_itself() {
    struct Locator {
        container: Arc<Container>,
    }

    let container = Container::new();
    container.register(|_| SimpleBar::shared()).unwrap();
    container
        .register_fallible(|c: &Container| -> Result<Arc<Locator>, RegistryError> {
            Ok(Arc::new(Locator {
                container: c.resolve::<Container>()?,
            }))
        })
        .unwrap();

    // Fresh instances keep the strong self-reference out of the cache.
    let locator = container.resolve_new::<Locator>().unwrap();
    assert!(Arc::ptr_eq(&locator.container, &container));
    assert!(locator.container.can_resolve::<dyn Bar>());
}

#[test]
fn test_concrete_and_trait_contracts_are_distinct() {
    let container = Container::new();
    container.register(|_| Arc::new(SimpleBar::new())).unwrap();

    assert!(container.can_resolve::<SimpleBar>());
    assert!(!container.can_resolve::<dyn Bar>());

    let concrete: Arc<SimpleBar> = container.resolve().unwrap();
    assert!(!concrete.unique_identifier().is_nil());
}
