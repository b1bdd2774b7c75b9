//! Integration Tests Module
//!
//! End-to-end tests for the memory bridge against on-disk SQLite files.
//! Tests cover the save → load hook flow, rolling-window retention across
//! reopened handles, and project isolation.

// Hook flow tests (save, load, recent)
mod hook_flow_test;

// Store retention tests across separate open/close cycles
mod retention_test;
