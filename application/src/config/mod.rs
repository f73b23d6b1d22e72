//! Application-level configuration.
//!
//! - [`EstimationParams`]: AI toggle and timeout for reconciliation

pub mod estimation_params;

pub use estimation_params::EstimationParams;
