//! Common test utilities for oiplot.
//!
//! This module provides shared utilities for testing the figure pipeline.

// Re-export all common test utilities
pub mod test_data;
