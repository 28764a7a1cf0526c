//! Integration tests for the scraper
//!
//! These tests use wiremock to serve index and detail pages and run the
//! pipeline and scheduler end-to-end against a temporary results directory.

mod pipeline_tests;
mod scheduler_tests;
