//! Functional units.

/// Set-associative cache: address decoder, line storage, replacement policies.
pub mod cache;
