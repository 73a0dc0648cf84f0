/// Character width of text events.
///
/// Projects saved by 11.5 and later store UTF-16LE text; older ones store
/// single-byte text. The switch happens when the version event is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextEncoding {
    /// One byte per character
    #[default]
    Narrow,
    /// UTF-16LE code units
    Wide,
}

impl TextEncoding {
    /// Decode a text payload, dropping trailing NULs.
    pub fn decode(self, bytes: &[u8]) -> String {
        let mut text = match self {
            Self::Narrow => narrow(bytes),
            Self::Wide => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        };
        while text.ends_with('\0') {
            text.pop();
        }
        text
    }

    /// Encode text with a trailing NUL, the way the producer writes it.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Narrow => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .chain(core::iter::once(0))
                .collect(),
            Self::Wide => text
                .encode_utf16()
                .chain(core::iter::once(0))
                .flat_map(u16::to_le_bytes)
                .collect(),
        }
    }
}

/// Single-byte text, mapped through Latin-1 so every byte is representable.
pub(crate) fn narrow(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_terminator() {
        assert_eq!(TextEncoding::Narrow.decode(b"Kick\0"), "Kick");
        assert_eq!(TextEncoding::Wide.decode(&[b'H', 0, b'i', 0, 0, 0]), "Hi");
    }

    #[test]
    fn wide_ignores_dangling_byte() {
        assert_eq!(TextEncoding::Wide.decode(&[b'A', 0, b'B']), "A");
    }

    #[test]
    fn encode_appends_terminator() {
        assert_eq!(TextEncoding::Narrow.encode("ab"), b"ab\0");
        assert_eq!(TextEncoding::Wide.encode("é"), vec![0xE9, 0, 0, 0]);
        assert_eq!(TextEncoding::Wide.decode(&TextEncoding::Wide.encode("Beat ♫")), "Beat ♫");
    }
}
