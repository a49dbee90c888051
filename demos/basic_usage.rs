//! Basic usage example for service-registry.
//!
//! Demonstrates:
//! - Registering factories for plain types
//! - Resolving shared instances with `resolve()` (returns `Arc<T>`)
//! - Building fresh instances with `resolve_new()`
//! - Labels, `destroy()` and `unregister()`
//!
//! Run with: `cargo run --example basic_usage`

use service_registry::{Container, RegistryError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// Custom struct to demonstrate complex types
#[derive(Debug)]
struct AppConfig {
    name: String,
    instance: u32,
}

fn main() -> Result<(), RegistryError> {
    println!("=== service-registry: Basic Usage ===\n");

    let container = Container::new();
    let built = Arc::new(AtomicU32::new(0));

    // -------------------------------------------------------------------------
    // 1. Register factories
    // -------------------------------------------------------------------------
    println!("1. Registering factories...");

    let counter = Arc::clone(&built);
    container.register(move |_| {
        Arc::new(AppConfig {
            name: "MyApp".to_string(),
            instance: counter.fetch_add(1, Ordering::SeqCst) + 1,
        })
    })?;
    container.register_labeled("staging", |_| {
        Arc::new(AppConfig {
            name: "MyApp (staging)".to_string(),
            instance: 0,
        })
    })?;

    println!("   Registered: AppConfig (default), AppConfig (\"staging\")");
    println!("   Factories run so far: {}", built.load(Ordering::SeqCst));

    // -------------------------------------------------------------------------
    // 2. Shared instances
    // -------------------------------------------------------------------------
    println!("\n2. Resolving shared instances...");

    let first: Arc<AppConfig> = container.resolve()?;
    let second: Arc<AppConfig> = container.resolve()?;
    println!("   first:  {:?}", first);
    println!("   same instance: {}", Arc::ptr_eq(&first, &second));

    let staging: Arc<AppConfig> = container.resolve_labeled("staging")?;
    println!("   staging: {}", staging.name);

    // -------------------------------------------------------------------------
    // 3. Fresh instances
    // -------------------------------------------------------------------------
    println!("\n3. Building a fresh instance...");

    let fresh: Arc<AppConfig> = container.resolve_new()?;
    println!("   fresh: {:?} (shared is still #{})", fresh, first.instance);

    // -------------------------------------------------------------------------
    // 4. Destroy and unregister
    // -------------------------------------------------------------------------
    println!("\n4. Destroying and unregistering...");

    println!("   destroy::<AppConfig>()    = {}", container.destroy::<AppConfig>());
    let rebuilt: Arc<AppConfig> = container.resolve()?;
    println!("   rebuilt: #{}", rebuilt.instance);

    println!("   unregister::<AppConfig>() = {}", container.unregister::<AppConfig>());
    println!("   can_resolve::<AppConfig>() = {}", container.can_resolve::<AppConfig>());

    // -------------------------------------------------------------------------
    // 5. Handle missing registrations gracefully
    // -------------------------------------------------------------------------
    println!("\n5. Handling missing registrations...");

    match container.resolve::<AppConfig>() {
        Ok(value) => println!("   Found AppConfig: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }
    println!("   try_resolve: {:?}", container.try_resolve::<AppConfig>());

    println!("\n=== Example Complete ===");
    println!("Factories ran {} times.", built.load(Ordering::SeqCst));
    Ok(())
}
