//! Memory module - an in-process backend for local runs and tests.

mod memory_backend;
mod memory_repositories;

pub use memory_backend::MemoryBackend;
