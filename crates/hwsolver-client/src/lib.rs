#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultSolverClient is used through the core ports, not its generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod parsing;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultSolverClient;

// Configuration
pub use config::SolverClientConfig;

// Errors
pub use error::ClientError;

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
