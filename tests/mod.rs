//! Integration tests for cinetui
//!
//! Tests are organized by component:
//! - metadata_test: metadata API client (search fan-out, details, errors)
//! - stream_test: streaming API client (media info, stream resolution)
//! - favorites_test: favorites store and enrichment
//! - ui_test: rendering against a TestBackend
//! - e2e_test: controller flows from key press to player

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
