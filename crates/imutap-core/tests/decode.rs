use imutap_core::{Advisory, FrameDecoder, FrameError, Vector3};

const TLV_ACCEL_WIDE: u8 = 0x01;
const TLV_GYRO: u8 = 0x11;

fn header(version: u8, mask: u16, ts: u32, seq: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(14);
    data.extend_from_slice(&0u16.to_le_bytes());
    data.push(version);
    data.push(0);
    data.extend_from_slice(&mask.to_le_bytes());
    data.extend_from_slice(&ts.to_le_bytes());
    data.extend_from_slice(&seq.to_le_bytes());
    data
}

fn tlv(tlv_type: u8, value: &[u8]) -> Vec<u8> {
    let mut record = vec![tlv_type, value.len() as u8];
    record.extend_from_slice(value);
    record
}

fn vec3_raw(x: i16, y: i16, z: i16) -> Vec<u8> {
    let mut raw = Vec::with_capacity(6);
    raw.extend_from_slice(&x.to_le_bytes());
    raw.extend_from_slice(&y.to_le_bytes());
    raw.extend_from_slice(&z.to_le_bytes());
    raw
}

/// Valid frame with a correct declared length.
fn frame(mask: u16, ts: u32, seq: u32, payload: &[u8]) -> Vec<u8> {
    let mut data = header(1, mask, ts, seq);
    data.extend_from_slice(payload);
    let len = data.len() as u16;
    data[0..2].copy_from_slice(&len.to_le_bytes());
    data
}

#[test]
fn short_buffer_counts_error_and_leaves_tracking_untouched() {
    let mut decoder = FrameDecoder::new();
    for len in 0..14 {
        let err = decoder.decode(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, FrameError::TooShort { .. }));
    }
    let stats = decoder.stats();
    assert_eq!(stats.error_count, 14);
    assert_eq!(stats.frame_count, 0);
    assert_eq!(stats.last_sequence, None);
}

#[test]
fn every_valid_header_counts_one_frame() {
    let mut decoder = FrameDecoder::new();
    // Empty payload, garbage payload, advisory-laden payload: all count.
    decoder.decode(&frame(0, 0, 1, &[])).unwrap();
    decoder.decode(&frame(0, 0, 2, &tlv(0xEE, &[0, 0]))).unwrap();
    decoder.decode(&frame(0, 0, 3, &[TLV_GYRO, 6, 1])).unwrap();
    let stats = decoder.stats();
    assert_eq!(stats.frame_count, 3);
    assert_eq!(stats.error_count, 0);
}

#[test]
fn round_trip_accel_frame() {
    let timestamp_us = 123_456;
    let sequence = 77;
    let data = frame(
        0x0001,
        timestamp_us,
        sequence,
        &tlv(TLV_ACCEL_WIDE, &vec3_raw(16384, -16384, 0)),
    );

    let mut decoder = FrameDecoder::new();
    let decoded = decoder.decode(&data).unwrap();

    assert_eq!(decoded.header.timestamp_us, timestamp_us);
    assert_eq!(decoded.header.sequence, sequence);
    assert!(decoded.advisories.is_empty());
    assert_eq!(
        decoded.reading.accel_wide,
        Some(Vector3 {
            x: 1.0,
            y: -1.0,
            z: 0.0
        })
    );
}

#[test]
fn unsupported_version_does_not_advance_sequence() {
    let mut decoder = FrameDecoder::new();
    decoder.decode(&frame(0, 0, 5, &[])).unwrap();

    let mut bad = header(2, 0, 0, 999);
    bad[0..2].copy_from_slice(&14u16.to_le_bytes());
    let err = decoder.decode(&bad).unwrap_err();
    assert!(matches!(err, FrameError::UnsupportedVersion { version: 2 }));

    // The untrusted sequence field was ignored: 6 follows 5 cleanly.
    let decoded = decoder.decode(&frame(0, 0, 6, &[])).unwrap();
    assert!(decoded.loss.is_none());
    let stats = decoder.stats();
    assert_eq!(stats.frame_count, 2);
    assert_eq!(stats.error_count, 1);
    assert_eq!(stats.last_sequence, Some(6));
}

#[test]
fn length_mismatch_still_decodes_and_advances_sequence() {
    let mut decoder = FrameDecoder::new();
    let mut data = header(1, 0, 0, 10);
    data.extend_from_slice(&tlv(TLV_GYRO, &vec3_raw(13107, 0, -13107)));
    // Declared length left at zero on purpose.

    let decoded = decoder.decode(&data).unwrap();
    assert_eq!(
        decoded.advisories,
        vec![Advisory::LengthMismatch {
            declared: 0,
            actual: 22
        }]
    );
    let gyro = decoded.reading.gyro.unwrap();
    assert!((gyro.x - 99.99847412109375).abs() < 1e-9);
    assert_eq!(decoder.stats().last_sequence, Some(10));
}

#[test]
fn sequence_gap_reports_lost_frames() {
    let mut decoder = FrameDecoder::new();
    decoder.decode(&frame(0, 0, 100, &[])).unwrap();
    let decoded = decoder.decode(&frame(0, 0, 103, &[])).unwrap();

    let loss = decoded.loss.unwrap();
    assert_eq!(loss.expected, 101);
    assert_eq!(loss.actual, 103);
    assert_eq!(loss.lost, 2);
    // Loss is not an error.
    assert_eq!(decoder.stats().frame_count, 2);
    assert_eq!(decoder.stats().error_count, 0);
    assert_eq!(decoder.stats().last_sequence, Some(103));
}

#[test]
fn sequence_wraparound_is_lossless() {
    let mut decoder = FrameDecoder::new();
    decoder.decode(&frame(0, 0, u32::MAX, &[])).unwrap();
    let decoded = decoder.decode(&frame(0, 0, 0, &[])).unwrap();
    assert!(decoded.loss.is_none());
}

#[test]
fn tlv_overflow_keeps_earlier_fields() {
    let mut payload = tlv(TLV_ACCEL_WIDE, &vec3_raw(16384, 0, 0));
    payload.extend_from_slice(&[TLV_GYRO, 6, 1, 2, 3]);

    let mut decoder = FrameDecoder::new();
    let decoded = decoder.decode(&frame(0, 0, 1, &payload)).unwrap();

    assert!(decoded.reading.accel_wide.is_some());
    assert!(decoded.reading.gyro.is_none());
    assert_eq!(
        decoded.advisories,
        vec![Advisory::TlvOverflow {
            tlv_type: TLV_GYRO,
            length: 6,
            remaining: 3
        }]
    );
}

#[test]
fn unknown_type_does_not_disturb_later_records() {
    let mut payload = tlv(0xEE, &[9, 9]);
    payload.extend_from_slice(&tlv(TLV_GYRO, &vec3_raw(0, 0, 0)));

    let mut decoder = FrameDecoder::new();
    let decoded = decoder.decode(&frame(0, 0, 1, &payload)).unwrap();

    assert_eq!(
        decoded.reading.gyro,
        Some(Vector3 {
            x: 0.0,
            y: 0.0,
            z: 0.0
        })
    );
    assert_eq!(
        decoded.advisories,
        vec![Advisory::UnknownTlvType { tlv_type: 0xEE }]
    );
}

#[test]
fn reset_is_idempotent_regardless_of_history() {
    let mut decoder = FrameDecoder::new();
    decoder.decode(&frame(0, 0, 1, &[])).unwrap();
    decoder.decode(&[0u8; 3]).unwrap_err();
    decoder.reset();

    let stats = decoder.stats();
    assert_eq!(stats.frame_count, 0);
    assert_eq!(stats.error_count, 0);
    assert_eq!(stats.last_sequence, None);

    decoder.reset();
    assert_eq!(decoder.stats(), stats);

    // First frame after reset is treated as a fresh stream.
    let decoded = decoder.decode(&frame(0, 0, 500, &[])).unwrap();
    assert!(decoded.loss.is_none());
}

#[test]
fn sensor_mask_hints_are_exposed() {
    use imutap_core::ChannelId;

    let mut decoder = FrameDecoder::new();
    let decoded = decoder
        .decode(&frame(0x0001 | 0x0004, 0, 1, &[]))
        .unwrap();
    assert!(decoded.header.expects_channel(ChannelId::AccelWide));
    assert!(decoded.header.expects_channel(ChannelId::Gyro));
    assert!(!decoded.header.expects_channel(ChannelId::Mag));
}
