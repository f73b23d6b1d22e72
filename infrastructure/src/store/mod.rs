//! Vote store adapters implementing the
//! [`VoteStore`](gurubu_application::VoteStore) port.

mod json_file;
mod memory;

pub use json_file::{JsonFileVoteStore, parse_votes};
pub use memory::InMemoryVoteStore;
