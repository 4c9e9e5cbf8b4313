//! Capture-log source implementation.
//!
//! A `.imulog` file records one raw BLE notification per record, with
//! the host receive timestamp, behind a small magic/version header.
//! The source replays records for the analysis pipeline exactly as the
//! transport would deliver them live; the writer is the recording side
//! of the same format.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod writer;

pub use parser::FrameLogSource;
pub use writer::FrameLogWriter;
