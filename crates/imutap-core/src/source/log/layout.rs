pub const MAGIC: [u8; 4] = *b"IMUL";
pub const MAGIC_RANGE: std::ops::Range<usize> = 0..4;
pub const FORMAT_VERSION_RANGE: std::ops::Range<usize> = 4..6;
pub const FILE_HEADER_LEN: usize = 6;

pub const FORMAT_VERSION: u16 = 1;

pub const RECORD_TS_RANGE: std::ops::Range<usize> = 0..8;
pub const RECORD_LEN_RANGE: std::ops::Range<usize> = 8..10;
pub const RECORD_HEADER_LEN: usize = 10;
