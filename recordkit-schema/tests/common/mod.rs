//! Shared test helpers for schema tests.

#![allow(dead_code)]

use recordkit_schema::{ComposeOptions, Property, RecordFactory, Type, compose};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `Address { city: String = "Nowhere", zip: String }`
pub fn address() -> RecordFactory {
    compose(
        ComposeOptions::new("Address")
            .property("city", Property::new(Type::string()).with_default("Nowhere"))
            .property("zip", Property::new(Type::string())),
    )
    .unwrap()
    .into_factory()
}

/// `Person { name: String = "anon", age: Number = 18, address: Address }`
pub fn person() -> RecordFactory {
    compose(
        ComposeOptions::new("Person")
            .property("name", Property::new(Type::string()).with_default("anon"))
            .property("age", Property::new(Type::number()).with_default(18))
            .property("address", Property::new(address())),
    )
    .unwrap()
    .into_factory()
}
