//! Application layer orchestrating the bulk order create.
//!
//! `OrderBulkCreator` is the entry point: it checks uniqueness across the
//! request, builds every row through `OrderBuilder` with one shared
//! `InstanceResolver`, applies the error policy and saves what survives.

pub mod engine;
pub mod order_builder;
pub mod payment_events;
pub mod resolver;
pub mod response;
