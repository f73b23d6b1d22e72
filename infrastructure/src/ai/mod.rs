//! AI estimator adapters implementing the
//! [`AiEstimator`](gurubu_application::AiEstimator) port.
//!
//! - [`HttpAiEstimator`] talks to the estimation workflow service (feature `ai-service`)
//! - [`StaticAiEstimator`] replays an estimate supplied by the operator

mod fixed;
#[cfg(feature = "ai-service")]
mod http;
pub mod wire;

pub use fixed::StaticAiEstimator;
#[cfg(feature = "ai-service")]
pub use http::HttpAiEstimator;
pub use wire::parse_estimate_response;
