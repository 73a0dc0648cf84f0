#![doc = r#"
Plugin descriptor blobs.

The payload of a plugin-parameters event is its own little format: an `i32`
plugin kind, then a run of records, each an `i32` tag, an `i64` length and
that many bytes. Only the VST wrapper kind is understood. Any other kind
decodes to `None`, since nothing is known about those layouts.

```text
[kind = 8] ([tag][length: i64][bytes]) ... until the blob ends
```
"#]

use crate::{
    reader::{DecodeError, Reader},
    text::narrow,
};
use num_enum::TryFromPrimitive;
use thiserror::Error;

/// Plugin kind written by the VST wrapper
pub const VST_WRAPPER_KIND: i32 = 8;

/// Record tags found inside a VST wrapper blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum PluginChunkId {
    Midi = 1,
    Flags = 2,
    Io = 30,
    InputInfo = 31,
    OutputInfo = 32,
    PluginInfo = 50,
    VstPlugin = 51,
    Guid = 52,
    State = 53,
    Name = 54,
    /// Location of the plugin binary on the author's machine
    FileName = 55,
    VendorName = 56,
}

/// Descriptor of a hosted third-party plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plugin {
    /// Vendor as reported by the plugin
    pub vendor_name: String,
    /// Plugin binary path
    pub file_name: String,
    /// Display name
    pub name: String,
    /// Opaque plugin state
    pub state: Vec<u8>,
}

/// Errors raised while reading a plugin blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PluginError {
    /// The blob ended inside a record
    #[error("plugin blob truncated at {0}")]
    Truncated(usize),
    /// A record declared a negative length or one past the blob end
    #[error("plugin record length {length} at {position} is out of bounds")]
    Length {
        /// Declared length
        length: i64,
        /// Offset of the length field
        position: usize,
    },
}

impl From<DecodeError> for PluginError {
    fn from(value: DecodeError) -> Self {
        Self::Truncated(value.position())
    }
}

impl Plugin {
    /// Decode a plugin blob.
    ///
    /// Returns `Ok(None)` when the blob is for a plugin kind other than the
    /// VST wrapper.
    pub fn parse(blob: &[u8]) -> Result<Option<Self>, PluginError> {
        Self::parse_at(blob, 0)
    }

    /// Decode a plugin blob that starts at `base` in the file.
    pub(crate) fn parse_at(blob: &[u8], base: usize) -> Result<Option<Self>, PluginError> {
        let mut reader = Reader::with_base(blob, base);
        if reader.read_i32()? != VST_WRAPPER_KIND {
            return Ok(None);
        }

        let mut plugin = Plugin::default();
        while !reader.is_empty() {
            let tag = reader.read_i32()?;
            let position = reader.buffer_position();
            let length = reader.read_i64()?;
            let bytes = match usize::try_from(length) {
                Ok(len) if len <= reader.remaining() => reader.read_slice(len)?,
                _ => return Err(PluginError::Length { length, position }),
            };

            match PluginChunkId::try_from(tag) {
                Ok(PluginChunkId::VendorName) => plugin.vendor_name = narrow(bytes),
                Ok(PluginChunkId::FileName) => plugin.file_name = narrow(bytes),
                Ok(PluginChunkId::Name) => plugin.name = narrow(bytes),
                Ok(PluginChunkId::State) => plugin.state = bytes.to_vec(),
                _ => tracing::trace!(tag, length, "skipping plugin record"),
            }
        }
        Ok(Some(plugin))
    }

    /// Encode as a VST wrapper blob. Only the four modelled records are written.
    pub fn to_blob(&self) -> Vec<u8> {
        let mut out = VST_WRAPPER_KIND.to_le_bytes().to_vec();
        let records: [(PluginChunkId, &[u8]); 4] = [
            (PluginChunkId::VendorName, self.vendor_name.as_bytes()),
            (PluginChunkId::FileName, self.file_name.as_bytes()),
            (PluginChunkId::Name, self.name.as_bytes()),
            (PluginChunkId::State, &self.state),
        ];
        for (tag, bytes) in records {
            out.extend_from_slice(&(tag as i32).to_le_bytes());
            out.extend_from_slice(&(bytes.len() as i64).to_le_bytes());
            out.extend_from_slice(bytes);
        }
        out
    }
}
