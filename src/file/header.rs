use super::{HEADER_LENGTH, HEADER_MAGIC, MAX_CHANNELS};
use crate::reader::{ContainerError, DecodeError, DecodeResult, RangeError, Reader};

#[doc = r#"
The body of the `FLhd` chunk.

```text
"FLhd"  i32 length (6)  i16 type (0)  i16 channels  u16 ppq
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectHeader {
    channel_count: u16,
    ppq: u16,
}

impl ProjectHeader {
    /// Create a new header.
    ///
    /// Fails if the channel count is outside `1..=1000`.
    pub fn new(channel_count: u16, ppq: u16) -> Result<Self, RangeError> {
        match i16::try_from(channel_count) {
            Ok(count) if (1..=MAX_CHANNELS).contains(&count) => Ok(Self { channel_count, ppq }),
            _ => Err(RangeError::ChannelCount(
                i16::try_from(channel_count).unwrap_or(i16::MAX),
            )),
        }
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> DecodeResult<Self> {
        let at = reader.buffer_position();
        let magic = reader.read_exact_size::<4>()?;
        if magic != HEADER_MAGIC {
            return Err(DecodeError::container(at, ContainerError::Magic(magic)));
        }

        let at = reader.buffer_position();
        let length = reader.read_i32()?;
        if length != HEADER_LENGTH {
            return Err(DecodeError::container(at, ContainerError::HeaderLength(length)));
        }

        let at = reader.buffer_position();
        let project_type = reader.read_i16()?;
        if project_type != 0 {
            return Err(DecodeError::container(
                at,
                ContainerError::ProjectType(project_type),
            ));
        }

        let at = reader.buffer_position();
        let channels = reader.read_i16()?;
        if !(1..=MAX_CHANNELS).contains(&channels) {
            return Err(DecodeError::range(at, RangeError::ChannelCount(channels)));
        }

        let ppq = reader.read_u16()?;

        Ok(Self {
            channel_count: channels.unsigned_abs(),
            ppq,
        })
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&HEADER_MAGIC);
        out.extend_from_slice(&HEADER_LENGTH.to_le_bytes());
        out.extend_from_slice(&0i16.to_le_bytes());
        out.extend_from_slice(&self.channel_count.to_le_bytes());
        out.extend_from_slice(&self.ppq.to_le_bytes());
    }

    /// Number of channels declared by the header
    pub const fn channel_count(&self) -> u16 {
        self.channel_count
    }

    /// Pulses per quarter note
    pub const fn ppq(&self) -> u16 {
        self.ppq
    }
}
