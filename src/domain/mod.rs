//! Domain layer: orders, payments, the catalog they reference and the ports
//! through which the application reaches storage.

pub mod catalog;
pub mod errors;
pub mod global_id;
pub mod input;
pub mod money;
pub mod order;
pub mod payment;
pub mod ports;
