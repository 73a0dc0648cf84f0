#![doc = r#"
The length-prefix integer codec.

Text and data events carry their payload length as a little-endian base-128
integer: every byte contributes its low 7 bits, and a set high bit means
another byte follows.

```text
0x7F            => 127
0x80 0x01       => 128
0xFF 0x7F       => 16383
0x80 0x80 0x01  => 16384
```

The codec itself does not cap the number of bytes; callers bound the decoded
length by what is left in the buffer.
"#]

use crate::reader::{DecodeResult, Reader};

/// Decode one varint from the reader.
///
/// Bits shifted beyond 64 are dropped; running out of bytes mid-varint is
/// reported as [`DecodeErrorKind::Truncated`](crate::reader::DecodeErrorKind::Truncated).
pub fn decode(reader: &mut Reader<'_>) -> DecodeResult<u64> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = reader.read_u8()?;
        value |= u64::from(byte & 0x7F).checked_shl(shift).unwrap_or(0);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift = shift.saturating_add(7);
    }
}

/// Append the varint encoding of `value` to `out`.
pub fn encode(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Number of bytes [`encode`] writes for `value`.
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}
