/*
 * Background and text colors for dialogs and classic controls: the
 * WM_CTLCOLOR* family and WM_ERASEBKGND. Each answer hands back one of the
 * long-lived palette brushes.
 */

use windows::Win32::{
    Foundation::{HWND, LRESULT, RECT},
    Graphics::Gdi::{FillRect, HBRUSH, HDC, OPAQUE, SetBkColor, SetBkMode, SetTextColor},
    UI::WindowsAndMessaging::{COMBOBOXINFO, GWL_STYLE, GetClientRect, GetComboBoxInfo, GetWindowLongPtrW},
};

use crate::draw_policy::{ErasePolicy, erase_policy};
use crate::theme_config::ThemeKey;
use crate::theme_resources::ThemeResources;
use crate::window_class::WindowClassTag;

fn brush_result(brush: HBRUSH) -> LRESULT {
    LRESULT(brush.0 as isize)
}

/// WM_CTLCOLORDLG: the dialog background brush.
pub(crate) fn handle_ctlcolor_dialog(theme: &ThemeResources) -> LRESULT {
    brush_result(theme.menubar_bg_brush)
}

/// WM_CTLCOLOREDIT / WM_CTLCOLORSCROLLBAR / WM_CTLCOLORSTATIC.
pub(crate) fn handle_ctlcolor_text(hdc: HDC, theme: &ThemeResources) -> LRESULT {
    unsafe {
        SetTextColor(hdc, theme.colorref(ThemeKey::MenuBarText));
        SetBkColor(hdc, theme.colorref(ThemeKey::MenuBarBackground));
    }
    brush_result(theme.menubar_bg_brush)
}

/*
 * WM_CTLCOLORLISTBOX on a combo box. Only the combo's own drop-down list is
 * recolored; any other list box child is left to the default procedure.
 */
pub(crate) fn handle_ctlcolor_combo_list(
    hwnd_combo: HWND,
    hdc: HDC,
    hwnd_list: HWND,
    theme: &ThemeResources,
) -> Option<LRESULT> {
    let mut info = COMBOBOXINFO {
        cbSize: std::mem::size_of::<COMBOBOXINFO>() as u32,
        ..Default::default()
    };
    if let Err(err) = unsafe { GetComboBoxInfo(hwnd_combo, &mut info) } {
        log::trace!("BackgroundHandler: GetComboBoxInfo failed for {hwnd_combo:?}: {err:?}");
        return None;
    }
    if info.hwndList != hwnd_list {
        return None;
    }
    unsafe {
        SetBkMode(hdc, OPAQUE);
        SetTextColor(hdc, theme.colorref(ThemeKey::MenuBarText));
        SetBkColor(hdc, theme.colorref(ThemeKey::MenuBarBackground));
    }
    Some(brush_result(theme.menubar_bg_brush))
}

/// WM_ERASEBKGND: pre-fill the client area unless the control paints its own.
pub(crate) fn handle_erase_background(
    hwnd: HWND,
    tag: WindowClassTag,
    hdc: HDC,
    theme: &ThemeResources,
) -> Option<LRESULT> {
    let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
    if erase_policy(tag, style) == ErasePolicy::Forward {
        return None;
    }
    let mut rc = RECT::default();
    if unsafe { GetClientRect(hwnd, &mut rc) }.is_err() {
        return None;
    }
    unsafe {
        FillRect(hdc, &rc, theme.menubar_bg_brush);
    }
    Some(LRESULT(1))
}
