//! Trait contracts example for service-registry.
//!
//! Demonstrates the **contract-based dependency injection** pattern:
//! - Define traits (contracts) that specify behavior
//! - Register factories producing `Arc<dyn Trait>`
//! - Compose services whose factories resolve other contracts
//! - Swap implementations by unregistering and registering again
//!
//! Run with: `cargo run --example trait_contracts`

use service_registry::{Container, RegistryError};
use std::sync::Arc;

// =============================================================================
// Contract Definitions (Traits)
// =============================================================================

/// Contract for a logging service.
trait Logger: Send + Sync {
    fn log(&self, message: &str);
    fn name(&self) -> &str;
}

/// Contract for an order service built on top of a logger.
trait Orders: Send + Sync {
    fn process(&self, order_id: u32);
}

// =============================================================================
// Concrete Implementations
// =============================================================================

struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("[CONSOLE] {}", message);
    }

    fn name(&self) -> &str {
        "ConsoleLogger"
    }
}

/// File-based logger implementation (simulated).
struct FileLogger {
    path: String,
}

impl Logger for FileLogger {
    fn log(&self, message: &str) {
        println!("[FILE:{}] {}", self.path, message);
    }

    fn name(&self) -> &str {
        "FileLogger"
    }
}

struct OrderService {
    logger: Arc<dyn Logger>,
}

impl Orders for OrderService {
    fn process(&self, order_id: u32) {
        self.logger.log(&format!("Processing order #{}", order_id));
        self.logger.log("Order confirmed!");
    }
}

fn register_orders(container: &Container) -> Result<(), RegistryError> {
    container.register_fallible(|c: &Container| -> Result<Arc<dyn Orders>, RegistryError> {
        Ok(Arc::new(OrderService {
            logger: c.resolve::<dyn Logger>()?,
        }))
    })
}

fn main() -> Result<(), RegistryError> {
    println!("=== service-registry: Trait Contracts ===\n");

    let container = Container::new();

    println!("1. Registering initial implementations...");
    container.register(|_| Arc::new(ConsoleLogger) as Arc<dyn Logger>)?;
    register_orders(&container)?;

    println!("\n2. Processing an order...\n");
    container.resolve::<dyn Orders>()?.process(1001);

    println!("\n3. Swapping the logger...");
    container.unregister::<dyn Logger>();
    container.register(|_| {
        Arc::new(FileLogger {
            path: "/var/log/app.log".to_string(),
        }) as Arc<dyn Logger>
    })?;

    // The cached OrderService still holds the old logger until it is destroyed.
    container.destroy::<dyn Orders>();

    println!("\n4. Processing another order...\n");
    container.resolve::<dyn Orders>()?.process(1002);

    println!("\n   Current Logger: {}", container.resolve::<dyn Logger>()?.name());

    println!("\n=== Example Complete ===");
    Ok(())
}
