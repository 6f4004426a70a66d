//! Freight brokerage core: the load catalog, carrier verification, and call
//! outcome classification served by `freight-desk-api`.

pub mod brokerage;
pub mod config;
pub mod error;
pub mod telemetry;
