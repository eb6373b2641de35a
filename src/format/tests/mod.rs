//! Unit tests for the marker file format.
//!
//! These tests verify document validation, encoding and decoding, and that
//! stores survive a save/load cycle unchanged.
