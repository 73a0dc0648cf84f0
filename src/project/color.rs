use core::fmt;

/// A color as stored by the producer: `0x00BBGGRR`, red in the low byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// Build a color from components
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(red as u32 | (green as u32) << 8 | (blue as u32) << 16)
    }

    /// Red component
    pub const fn red(&self) -> u8 {
        self.0 as u8
    }

    /// Green component
    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component
    pub const fn blue(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The raw value
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }
}

#[test]
fn components_are_little_endian() {
    let color = Color(0x0056_5148);
    assert_eq!(color, Color::rgb(0x48, 0x51, 0x56));
    assert_eq!(format!("{color:?}"), "#485156");
}
