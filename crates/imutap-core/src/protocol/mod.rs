//! Protocol decoding modules.
//!
//! The frame decoder follows a layered structure:
//! - `layout`: byte offsets, type codes, and scale factors (source of truth)
//! - `reader`: safe byte access
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and the stateful
//! decoder handle file access and cross-frame state.

pub mod frame;
