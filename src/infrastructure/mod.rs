//! Adapters implementing the domain ports: HTTP clients for the real services
//! and in-memory versions for tests and offline runs.

pub mod http;
pub mod in_memory;
