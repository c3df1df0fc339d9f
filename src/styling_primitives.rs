/*
 * Platform-agnostic color primitive used by the theme config and the Win32
 * painting code. Free of any Win32 types so config parsing can be compiled and
 * tested on any target.
 */

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /*
     * Packs the color into the BGR layout Win32 expects for a COLORREF
     * (`0x00BBGGRR`).
     */
    pub const fn to_colorref_value(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected r,g,b", self.0)
    }
}

impl std::error::Error for ParseColorError {}

/*
 * Parses `r,g,b` with optional whitespace around each component. Every
 * component must fit in a byte; anything else rejects the whole value.
 */
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let mut parts = s.split(',').map(|part| part.trim().parse::<u8>());
        let r = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let g = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        let b = parts.next().ok_or_else(err)?.map_err(|_| err())?;
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Color { r, g, b })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}
