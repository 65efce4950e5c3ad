// Subread construction: slicing a parent read into a child while keeping
// identifiers, timestamps and signal/sequence coordinates coherent.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::read::Read;
use crate::split::ranges::PosRange;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f+00:00";

/// Derive a stable child UUID from a parent id and a description string.
///
/// SHA-256 of `input_uuid ∥ desc`, truncated to 16 bytes and re-tagged as an
/// RFC 4122 version-4 UUID.
pub fn derive_uuid(input_uuid: &str, desc: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input_uuid.as_bytes());
    hasher.update(desc.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    // Version nibble 4, variant bits 10.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let mut uuid = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        uuid.push_str(&format!("{byte:02x}"));
        if matches!(i, 3 | 5 | 7 | 9) {
            uuid.push('-');
        }
    }
    uuid
}

/// Parse a `%Y-%m-%dT%H:%M:%S.mmm+00:00` timestamp to milliseconds since
/// the UNIX epoch. The millisecond field may carry one to three digits.
pub fn parse_timestamp(time_stamp: &str) -> Result<i64, Error> {
    DateTime::parse_from_rfc3339(time_stamp)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| Error::Timestamp(time_stamp.to_string()))
}

/// Format milliseconds since the UNIX epoch as
/// `%Y-%m-%dT%H:%M:%S.mmm+00:00` (UTC, zero-padded milliseconds).
pub fn format_timestamp(time_stamp_ms: i64) -> Result<String, Error> {
    let dt = DateTime::<Utc>::from_timestamp_millis(time_stamp_ms)
        .ok_or_else(|| Error::Timestamp(time_stamp_ms.to_string()))?;
    Ok(dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Shift a timestamp forward by `offset_ms` milliseconds.
pub fn adjust_time_ms(time_stamp: &str, offset_ms: u64) -> Result<String, Error> {
    format_timestamp(parse_timestamp(time_stamp)? + offset_ms as i64)
}

/// Cut one child out of `read`.
///
/// `signal_range` must already be stride-aligned (derived from the
/// sequence-to-signal map); only the very end of the parent signal may be
/// ragged. The child's acquisition start time is moved forward to its first
/// sample; its read number becomes unknown.
pub fn subread(read: &Read, seq_range: PosRange, signal_range: PosRange) -> Result<Read, Error> {
    let stride = read.model_stride;
    assert_eq!(signal_range.start % stride, 0);
    assert!(
        signal_range.end % stride == 0
            || (signal_range.end == read.raw_signal.len() && seq_range.end == read.seq.len())
    );

    let mut child = read.clone();
    child.read_id = derive_uuid(
        &read.read_id,
        &format!("{}-{}", seq_range.start, seq_range.end),
    );
    child.raw_signal = read.raw_signal[signal_range.start..signal_range.end].to_vec();
    child.seq = read.seq[seq_range.start..seq_range.end].to_string();
    child.qstring = read.qstring[seq_range.start..seq_range.end].to_string();
    // A ragged tail (signal shorter than stride * moves) still owns every
    // remaining move entry.
    let moves_end = if signal_range.end == read.raw_signal.len() {
        read.moves.len()
    } else {
        signal_range.end / stride
    };
    child.moves = read.moves[signal_range.start / stride..moves_end].to_vec();
    child.attributes.read_number = u32::MAX;
    child.attributes.start_time = adjust_time_ms(
        &read.attributes.start_time,
        (read.num_trimmed_samples + signal_range.start as u64) * 1000 / read.sample_rate,
    )?;
    // The new start time accounts for what was trimmed upstream.
    child.num_trimmed_samples = 0;

    debug_assert!(
        signal_range.end == read.raw_signal.len()
            || child.moves.len() * stride == child.raw_signal.len()
    );
    Ok(child)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
