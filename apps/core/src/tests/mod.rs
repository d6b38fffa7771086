//! Test Module
//!
//! Full-cascade test suite for the concierge engine.
//!
//! ## Test Categories
//! - `engine_tests`: end-to-end classification, cascade ordering, context
//!   resolution, failure semantics, determinism
