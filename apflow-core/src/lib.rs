// apflow-core/src/lib.rs

#![allow(missing_docs)]
// 1. Memory safety
#![deny(unsafe_code)]
// 2. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 3. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The contract with the SQL engine (Connector).
pub mod ports;

// 2. Domain
// SAP codes, raw extract records, the SQL of both transformation stages,
// project configuration and report types. Depends on nothing else.
pub mod domain;

// 3. Infrastructure (Adapters)
// DuckDB, config files, Jinja, CSV, filesystem.
pub mod infrastructure;

// 4. Application (Use Cases)
// Pipeline, materialization, checks, reports, sample data, clean.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::ApflowError;
