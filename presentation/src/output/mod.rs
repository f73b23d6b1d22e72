//! Output formatting for reconciliation results

pub mod console;
