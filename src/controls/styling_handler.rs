/*
 * Conversions from the portable palette into the values Win32 wants. GDI takes
 * a COLORREF (0x00BBGGRR); the common-control color messages take the same
 * value packed into a WPARAM or LPARAM.
 */

use windows::Win32::Foundation::{COLORREF, LPARAM, WPARAM};

use crate::styling_primitives::Color;

pub(crate) fn color_to_colorref(color: Color) -> COLORREF {
    COLORREF(color.to_colorref_value())
}

pub(crate) fn colorref_as_wparam(color: COLORREF) -> WPARAM {
    WPARAM(color.0 as usize)
}

pub(crate) fn colorref_as_lparam(color: COLORREF) -> LPARAM {
    LPARAM(color.0 as isize)
}
