// crates/large-code-gen-cli/src/lib.rs
// ============================================================================
// Module: Generator CLI Support Library
// Description: Shared helpers for the large-code-gen command-line entry point.
// Purpose: Expose localization and logging setup to the binary and its tests.
// Dependencies: thiserror, tracing-subscriber
// ============================================================================

//! ## Overview
//! Support library for the `large-code-gen` binary: the message catalog used
//! for every user-facing diagnostic, and the stderr log subscriber.

pub mod i18n;
pub mod logging;
