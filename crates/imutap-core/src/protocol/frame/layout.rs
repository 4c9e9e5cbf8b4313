pub const FRAME_LEN_RANGE: std::ops::Range<usize> = 0..2;
pub const VERSION_OFFSET: usize = 2;
pub const FLAGS_OFFSET: usize = 3;
pub const SENSOR_MASK_RANGE: std::ops::Range<usize> = 4..6;
pub const TIMESTAMP_RANGE: std::ops::Range<usize> = 6..10;
pub const SEQUENCE_RANGE: std::ops::Range<usize> = 10..14;
pub const HEADER_LEN: usize = 14;

pub const PROTOCOL_VERSION: u8 = 1;

pub const TLV_ACCEL_WIDE: u8 = 0x01;
pub const TLV_ACCEL_IMU: u8 = 0x10;
pub const TLV_GYRO: u8 = 0x11;
pub const TLV_TEMP_IMU: u8 = 0x12;
pub const TLV_MAG: u8 = 0x20;
pub const TLV_TEMP_MAG: u8 = 0x21;
pub const TLV_ANGLE: u8 = 0x30;
pub const TLV_ACCEL_INCL: u8 = 0x31;
pub const TLV_TEMP_INCL: u8 = 0x32;

pub const VEC3_LEN: u8 = 6;
pub const SCALAR_LEN: u8 = 2;

pub const SCALE_ACCEL: f64 = 16384.0;
pub const SCALE_GYRO: f64 = 131.072;
pub const SCALE_MAG: f64 = 1.0;
pub const SCALE_ANGLE: f64 = 100.0;
pub const SCALE_TEMP: f64 = 100.0;

pub const MASK_ACCEL_WIDE: u16 = 1 << 0;
pub const MASK_ACCEL_INCL: u16 = 1 << 1;
pub const MASK_GYRO: u16 = 1 << 2;
pub const MASK_TEMP_IMU: u16 = 1 << 3;
pub const MASK_MAG: u16 = 1 << 4;
pub const MASK_TEMP_MAG: u16 = 1 << 5;
pub const MASK_ANGLE: u16 = 1 << 6;
pub const MASK_ACCEL_IMU: u16 = 1 << 7;
pub const MASK_TEMP_INCL: u16 = 1 << 8;
