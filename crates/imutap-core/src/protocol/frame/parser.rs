use std::fmt;

use super::error::FrameError;
use super::layout;
use super::reader::FrameReader;

/// Fixed 14-byte frame header, little-endian, no padding.
///
/// The wire `sequence` field is declared signed by the device firmware
/// but is a plain wrapping 32-bit counter; it is stored unsigned so
/// wraparound arithmetic stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_len: u16,
    pub version: u8,
    pub flags: u8,
    pub sensor_mask: u16,
    pub timestamp_us: u32,
    pub sequence: u32,
}

impl FrameHeader {
    /// Whether the sensor mask announces `channel` for this frame.
    ///
    /// The mask is a hint for presentation; the authoritative presence
    /// signal is the corresponding `Option` on [`SensorReading`].
    pub fn expects_channel(&self, channel: ChannelId) -> bool {
        self.sensor_mask & channel.mask_bit() != 0
    }
}

/// Scaled triaxial sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The nine sensor channels a frame can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    AccelWide,
    AccelImu,
    Gyro,
    Mag,
    Angle,
    AccelIncl,
    TempImu,
    TempMag,
    TempIncl,
}

impl ChannelId {
    pub const ALL: [ChannelId; 9] = [
        ChannelId::AccelWide,
        ChannelId::AccelImu,
        ChannelId::Gyro,
        ChannelId::Mag,
        ChannelId::Angle,
        ChannelId::AccelIncl,
        ChannelId::TempImu,
        ChannelId::TempMag,
        ChannelId::TempIncl,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChannelId::AccelWide => "accel_wide",
            ChannelId::AccelImu => "accel_imu",
            ChannelId::Gyro => "gyro",
            ChannelId::Mag => "mag",
            ChannelId::Angle => "angle",
            ChannelId::AccelIncl => "accel_incl",
            ChannelId::TempImu => "temp_imu",
            ChannelId::TempMag => "temp_mag",
            ChannelId::TempIncl => "temp_incl",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ChannelId::AccelWide | ChannelId::AccelImu | ChannelId::AccelIncl => "g",
            ChannelId::Gyro => "dps",
            ChannelId::Mag => "mG",
            ChannelId::Angle => "deg",
            ChannelId::TempImu | ChannelId::TempMag | ChannelId::TempIncl => "degC",
        }
    }

    pub fn mask_bit(self) -> u16 {
        match self {
            ChannelId::AccelWide => layout::MASK_ACCEL_WIDE,
            ChannelId::AccelImu => layout::MASK_ACCEL_IMU,
            ChannelId::Gyro => layout::MASK_GYRO,
            ChannelId::Mag => layout::MASK_MAG,
            ChannelId::Angle => layout::MASK_ANGLE,
            ChannelId::AccelIncl => layout::MASK_ACCEL_INCL,
            ChannelId::TempImu => layout::MASK_TEMP_IMU,
            ChannelId::TempMag => layout::MASK_TEMP_MAG,
            ChannelId::TempIncl => layout::MASK_TEMP_INCL,
        }
    }
}

/// One channel's value, triaxial or scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValues {
    Vector(Vector3),
    Scalar(f64),
}

/// Decoded readings for one frame.
///
/// A channel is `Some` only when its TLV record was present and well
/// formed in this frame's payload, so a physically-zero reading is
/// distinguishable from an absent one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    pub accel_wide: Option<Vector3>,
    pub accel_imu: Option<Vector3>,
    pub gyro: Option<Vector3>,
    pub mag: Option<Vector3>,
    pub angle: Option<Vector3>,
    pub accel_incl: Option<Vector3>,
    pub temp_imu: Option<f64>,
    pub temp_mag: Option<f64>,
    pub temp_incl: Option<f64>,
}

impl SensorReading {
    pub fn is_empty(&self) -> bool {
        ChannelId::ALL
            .iter()
            .all(|channel| self.channel_values(*channel).is_none())
    }

    pub fn channel_values(&self, channel: ChannelId) -> Option<ChannelValues> {
        match channel {
            ChannelId::AccelWide => self.accel_wide.map(ChannelValues::Vector),
            ChannelId::AccelImu => self.accel_imu.map(ChannelValues::Vector),
            ChannelId::Gyro => self.gyro.map(ChannelValues::Vector),
            ChannelId::Mag => self.mag.map(ChannelValues::Vector),
            ChannelId::Angle => self.angle.map(ChannelValues::Vector),
            ChannelId::AccelIncl => self.accel_incl.map(ChannelValues::Vector),
            ChannelId::TempImu => self.temp_imu.map(ChannelValues::Scalar),
            ChannelId::TempMag => self.temp_mag.map(ChannelValues::Scalar),
            ChannelId::TempIncl => self.temp_incl.map(ChannelValues::Scalar),
        }
    }
}

/// Non-fatal decode anomaly, reported on the result instead of logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    LengthMismatch { declared: u16, actual: usize },
    TlvOverflow { tlv_type: u8, length: u8, remaining: usize },
    UnknownTlvType { tlv_type: u8 },
    TlvLengthMismatch { tlv_type: u8, length: u8, expected: u8 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::LengthMismatch { declared, actual } => {
                write!(f, "declared frame length {declared} disagrees with {actual} received bytes")
            }
            Advisory::TlvOverflow {
                tlv_type,
                length,
                remaining,
            } => write!(
                f,
                "TLV 0x{tlv_type:02X} claims {length} bytes with {remaining} remaining"
            ),
            Advisory::UnknownTlvType { tlv_type } => {
                write!(f, "unknown TLV type 0x{tlv_type:02X}")
            }
            Advisory::TlvLengthMismatch {
                tlv_type,
                length,
                expected,
            } => write!(
                f,
                "TLV 0x{tlv_type:02X} has length {length}, expected {expected}"
            ),
        }
    }
}

/// Pure decode result, before any stream state is applied.
#[derive(Debug, Clone)]
pub struct ParsedFrame {
    pub header: FrameHeader,
    pub reading: SensorReading,
    pub advisories: Vec<Advisory>,
}

pub fn parse_header(data: &[u8]) -> Result<FrameHeader, FrameError> {
    let reader = FrameReader::new(data);
    reader.require_len(layout::HEADER_LEN)?;

    let version = reader.read_u8(layout::VERSION_OFFSET)?;
    if version != layout::PROTOCOL_VERSION {
        return Err(FrameError::UnsupportedVersion { version });
    }

    Ok(FrameHeader {
        frame_len: reader.read_u16_le(layout::FRAME_LEN_RANGE.clone())?,
        version,
        flags: reader.read_u8(layout::FLAGS_OFFSET)?,
        sensor_mask: reader.read_u16_le(layout::SENSOR_MASK_RANGE.clone())?,
        timestamp_us: reader.read_u32_le(layout::TIMESTAMP_RANGE.clone())?,
        sequence: reader.read_u32_le(layout::SEQUENCE_RANGE.clone())?,
    })
}

/// Decode one notification buffer into header, readings, and advisories.
///
/// The declared `frame_len` is informational only; the received byte
/// count is authoritative and a disagreement is an advisory.
pub fn parse_frame(data: &[u8]) -> Result<ParsedFrame, FrameError> {
    let header = parse_header(data)?;

    let mut advisories = Vec::new();
    if header.frame_len as usize != data.len() {
        advisories.push(Advisory::LengthMismatch {
            declared: header.frame_len,
            actual: data.len(),
        });
    }

    let mut reading = SensorReading::default();
    decode_payload(&data[layout::HEADER_LEN..], &mut reading, &mut advisories);

    Ok(ParsedFrame {
        header,
        reading,
        advisories,
    })
}

/// Walk the TLV payload in encounter order, never fatally.
///
/// Fewer than two trailing bytes is a clean end of payload. A record
/// claiming more bytes than remain aborts the walk for this frame;
/// fields already decoded are kept.
pub fn decode_payload(payload: &[u8], reading: &mut SensorReading, advisories: &mut Vec<Advisory>) {
    let mut rest = payload;
    while let [tlv_type, length, tail @ ..] = rest {
        let length = *length as usize;
        if length > tail.len() {
            advisories.push(Advisory::TlvOverflow {
                tlv_type: *tlv_type,
                length: length as u8,
                remaining: tail.len(),
            });
            return;
        }
        let (value, tail) = tail.split_at(length);
        decode_record(*tlv_type, value, reading, advisories);
        rest = tail;
    }
}

fn decode_record(
    tlv_type: u8,
    value: &[u8],
    reading: &mut SensorReading,
    advisories: &mut Vec<Advisory>,
) {
    match tlv_type {
        layout::TLV_ACCEL_WIDE => {
            set_vector(&mut reading.accel_wide, tlv_type, value, layout::SCALE_ACCEL, advisories)
        }
        layout::TLV_ACCEL_IMU => {
            set_vector(&mut reading.accel_imu, tlv_type, value, layout::SCALE_ACCEL, advisories)
        }
        layout::TLV_GYRO => {
            set_vector(&mut reading.gyro, tlv_type, value, layout::SCALE_GYRO, advisories)
        }
        layout::TLV_TEMP_IMU => {
            set_scalar(&mut reading.temp_imu, tlv_type, value, advisories)
        }
        layout::TLV_MAG => {
            set_vector(&mut reading.mag, tlv_type, value, layout::SCALE_MAG, advisories)
        }
        layout::TLV_TEMP_MAG => {
            set_scalar(&mut reading.temp_mag, tlv_type, value, advisories)
        }
        layout::TLV_ANGLE => {
            set_vector(&mut reading.angle, tlv_type, value, layout::SCALE_ANGLE, advisories)
        }
        layout::TLV_ACCEL_INCL => {
            set_vector(&mut reading.accel_incl, tlv_type, value, layout::SCALE_ACCEL, advisories)
        }
        layout::TLV_TEMP_INCL => {
            set_scalar(&mut reading.temp_incl, tlv_type, value, advisories)
        }
        _ => advisories.push(Advisory::UnknownTlvType { tlv_type }),
    }
}

fn set_vector(
    slot: &mut Option<Vector3>,
    tlv_type: u8,
    value: &[u8],
    scale: f64,
    advisories: &mut Vec<Advisory>,
) {
    match value {
        [x0, x1, y0, y1, z0, z1] => {
            *slot = Some(Vector3 {
                x: i16::from_le_bytes([*x0, *x1]) as f64 / scale,
                y: i16::from_le_bytes([*y0, *y1]) as f64 / scale,
                z: i16::from_le_bytes([*z0, *z1]) as f64 / scale,
            });
        }
        _ => advisories.push(Advisory::TlvLengthMismatch {
            tlv_type,
            length: value.len() as u8,
            expected: layout::VEC3_LEN,
        }),
    }
}

fn set_scalar(
    slot: &mut Option<f64>,
    tlv_type: u8,
    value: &[u8],
    advisories: &mut Vec<Advisory>,
) {
    match value {
        [lo, hi] => {
            *slot = Some(i16::from_le_bytes([*lo, *hi]) as f64 / layout::SCALE_TEMP);
        }
        _ => advisories.push(Advisory::TlvLengthMismatch {
            tlv_type,
            length: value.len() as u8,
            expected: layout::SCALAR_LEN,
        }),
    }
}
