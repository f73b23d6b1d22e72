//! Progress display while a round is reconciled

pub mod reporter;
