//! Process-wide container example for service-registry.
//!
//! Demonstrates `define_container!`, tracing callbacks, and wiring `tracing` output.
//!
//! Run with: `cargo run --example global_container`

use service_registry::{define_container, RegistryEvent};
use std::sync::Arc;

define_container!(services);

struct Database {
    url: String,
}

struct Repository {
    database: Arc<Database>,
}

fn main() {
    println!("=== service-registry: Global Container ===\n");

    services::set_trace_callback(|event: &RegistryEvent| println!("   [trace] {event}"));

    services::register(|_| {
        Arc::new(Database {
            url: "postgres://localhost/app".to_string(),
        })
    })
    .expect("database registers once");
    services::register(|c| {
        Arc::new(Repository {
            database: c.resolve().expect("database is registered"),
        })
    })
    .expect("repository registers once");

    let repository: Arc<Repository> = services::resolve().expect("repository resolves");
    println!("\nRepository uses {}", repository.database.url);

    services::clear_trace_callback();
    println!("\n=== Example Complete ===");
}
