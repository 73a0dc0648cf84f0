#![doc = r#"
Container framing of a project file.

# Overview

A project file is organised into chunks, each identified by a 4-character
ASCII tag followed by a 32-bit little-endian length and then the chunk body.

## The header chunk

The `FLhd` chunk must come first. Its body is always 6 bytes: the project
type (only `0`, a regular project, is supported), the number of channels in
the channel rack, and the base time resolution in pulses per quarter note.

## The data chunk

The `FLdt` chunk holds the event stream. Anything between the header and
the data chunk is skipped using its declared length, each length checked
against a sanity bound so corrupt input cannot send the cursor far away.

```text
[FLhd][6][type][channels][ppq]
[????][len][len bytes]          optional, skipped
[FLdt][len][events ...........]
```

The event stream runs to the end of the buffer.
"#]

mod header;
pub use header::*;

use crate::reader::{DecodeError, DecodeResult, RangeError, Reader};

/// Tag of the header chunk
pub const HEADER_MAGIC: [u8; 4] = *b"FLhd";
/// Tag of the event stream chunk
pub const DATA_MAGIC: [u8; 4] = *b"FLdt";
/// The only valid header body length
pub const HEADER_LENGTH: i32 = 6;
/// Largest channel count the producer writes
pub const MAX_CHANNELS: i16 = 1000;
/// Largest chunk length accepted while scanning for `FLdt`
pub const MAX_CHUNK_LENGTH: i32 = 0x1000_0000;

/// Validate the header and advance the reader to the first event.
pub fn read_container(reader: &mut Reader<'_>) -> DecodeResult<ProjectHeader> {
    let header = ProjectHeader::read(reader)?;

    let mut skip = 0usize;
    loop {
        reader.skip(skip)?;
        let tag = reader.read_exact_size::<4>()?;
        let at = reader.buffer_position();
        let length = reader.read_i32()?;
        if !(0..=MAX_CHUNK_LENGTH).contains(&length) {
            return Err(DecodeError::range(at, RangeError::ChunkLength(length)));
        }
        if tag == DATA_MAGIC {
            return Ok(header);
        }
        skip = length.unsigned_abs() as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{ContainerError, DecodeErrorKind};
    use pretty_assertions::assert_eq;

    fn header_bytes(channels: i16) -> Vec<u8> {
        let mut bytes = b"FLhd".to_vec();
        bytes.extend_from_slice(&6i32.to_le_bytes());
        bytes.extend_from_slice(&0i16.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&96u16.to_le_bytes());
        bytes
    }

    #[test]
    fn skips_unknown_chunks_before_data() {
        let mut bytes = header_bytes(4);
        bytes.extend_from_slice(b"FLxx");
        bytes.extend_from_slice(&3i32.to_le_bytes());
        bytes.extend_from_slice(&[9, 9, 9]);
        bytes.extend_from_slice(b"FLdt");
        bytes.extend_from_slice(&0i32.to_le_bytes());
        bytes.push(0x00);

        let mut reader = Reader::from_byte_slice(&bytes);
        let header = read_container(&mut reader).unwrap();
        assert_eq!(header.channel_count(), 4);
        assert_eq!(header.ppq(), 96);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn negative_chunk_length_is_rejected() {
        let mut bytes = header_bytes(1);
        bytes.extend_from_slice(b"FLxx");
        bytes.extend_from_slice(&(-1i32).to_le_bytes());

        let err = read_container(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &DecodeErrorKind::OutOfRange(RangeError::ChunkLength(-1))
        );
        assert_eq!(err.position(), 18);
    }

    #[test]
    fn skipping_past_the_end_is_truncated() {
        let mut bytes = header_bytes(1);
        bytes.extend_from_slice(b"FLxx");
        bytes.extend_from_slice(&100i32.to_le_bytes());
        bytes.extend_from_slice(&[0; 10]);

        let err = read_container(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn wrong_project_type_is_malformed() {
        let mut bytes = header_bytes(1);
        bytes[8] = 0x10;
        let err = read_container(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
        assert_eq!(
            err.error_kind(),
            &DecodeErrorKind::MalformedContainer(ContainerError::ProjectType(0x10))
        );
    }

    #[test]
    fn header_constructor_checks_channel_count() {
        assert!(ProjectHeader::new(0, 96).is_err());
        assert!(ProjectHeader::new(1001, 96).is_err());
        assert_eq!(ProjectHeader::new(1000, 96).unwrap().channel_count(), 1000);
    }
}
