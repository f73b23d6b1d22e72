//! Logging infrastructure for structured round logs
//!
//! Provides [`JsonlSummaryLogger`], a JSONL file writer that implements
//! the [`SummaryLogger`](gurubu_application::SummaryLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlSummaryLogger;
