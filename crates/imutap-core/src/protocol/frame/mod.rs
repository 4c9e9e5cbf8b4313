//! BLE notification frame decoding.
//!
//! The parser validates the fixed 14-byte header, then walks the
//! remaining bytes as Type-Length-Value records, scaling raw int16
//! samples into physical units. Malformed records never abort the
//! frame; they surface as advisories on the decode result.
//!
//! Wire-format offsets, type codes, and scale factors are defined in
//! `layout`; safe byte access lives in `reader`.
//!
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FrameError;
pub use parser::{
    Advisory, ChannelId, ChannelValues, FrameHeader, ParsedFrame, SensorReading, Vector3,
    parse_frame, parse_header,
};
