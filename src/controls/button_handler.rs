/*
 * Owner-draw rendering for push buttons. Plain push buttons get BS_OWNERDRAW
 * added when they are created (see `creation_handler`), so their parent
 * receives WM_DRAWITEM and we paint them with the palette: a filled, framed
 * rectangle with the window text centered on one line.
 */

use std::ffi::c_void;

use windows::Win32::{
    Foundation::{HWND, LRESULT, RECT},
    Graphics::Gdi::{
        CreatePen, DT_CENTER, DT_EDITCONTROL, DT_SINGLELINE, DT_VCENTER, DeleteObject,
        DrawFocusRect, DrawTextW, HDC, HGDIOBJ, InflateRect, PS_SOLID, Rectangle, SelectObject,
        SetBkColor, SetTextColor,
    },
    UI::Controls::DRAWITEMSTRUCT,
    UI::Input::KeyboardAndMouse::GetFocus,
    UI::WindowsAndMessaging::{
        GetClientRect, GetWindowTextLengthW, GetWindowTextW, SendMessageW, WM_GETFONT,
    },
};

use crate::draw_policy::ODS_FOCUS;
use crate::theme_config::ThemeKey;
use crate::theme_resources::ThemeResources;

const ODT_BUTTON: u32 = 4;

/*
 * Handles WM_DRAWITEM. Items that are not buttons are left to the default
 * procedure (None). Every button item reports TRUE, even when there was
 * nothing to paint for the requested action.
 */
pub(crate) unsafe fn handle_wm_drawitem(
    draw_item_struct: *const DRAWITEMSTRUCT,
    theme: &ThemeResources,
) -> Option<LRESULT> {
    unsafe {
        if draw_item_struct.is_null() {
            return None;
        }
        let dis = &*draw_item_struct;
        if dis.CtlType.0 != ODT_BUTTON {
            return None;
        }

        if dis.itemAction.0 != 0 {
            paint_owner_drawn_button(dis.hwndItem, dis.hDC, theme);
            if dis.itemState.0 & ODS_FOCUS != 0 {
                let _ = DrawFocusRect(dis.hDC, &dis.rcItem);
            }
        }
        Some(LRESULT(1))
    }
}

unsafe fn paint_owner_drawn_button(hwnd: HWND, hdc: HDC, theme: &ThemeResources) {
    unsafe {
        let mut rc = RECT::default();
        if GetClientRect(hwnd, &mut rc).is_err() {
            log::trace!("ButtonHandler: GetClientRect failed for {hwnd:?}");
            return;
        }

        let text_color = theme.colorref(ThemeKey::MenuBarText);
        let bg_color = theme.colorref(ThemeKey::MenuBarBackground);

        let pen = CreatePen(PS_SOLID, 1, text_color);
        let old_brush = SelectObject(hdc, theme.menubar_bg_brush.into());
        let old_pen = SelectObject(hdc, pen.into());

        let font = SendMessageW(hwnd, WM_GETFONT, None, None);
        let old_font =
            (font.0 != 0).then(|| SelectObject(hdc, HGDIOBJ(font.0 as *mut c_void)));

        SetBkColor(hdc, bg_color);
        SetTextColor(hdc, text_color);
        let _ = Rectangle(hdc, 0, 0, rc.right, rc.bottom);

        if GetFocus() == hwnd {
            let mut focus_rect = rc;
            let _ = InflateRect(&mut focus_rect, -2, -2);
            let _ = DrawFocusRect(hdc, &focus_rect);
        }

        let text_len = GetWindowTextLengthW(hwnd).max(0) as usize;
        let mut text_buf = vec![0u16; text_len + 1];
        let copied = (GetWindowTextW(hwnd, &mut text_buf).max(0) as usize).min(text_len);
        if copied > 0 {
            DrawTextW(
                hdc,
                &mut text_buf[..copied],
                &mut rc,
                DT_EDITCONTROL | DT_CENTER | DT_VCENTER | DT_SINGLELINE,
            );
        }

        // Restore original selections to avoid leaking GDI state into the control.
        if let Some(prev_font) = old_font {
            SelectObject(hdc, prev_font);
        }
        SelectObject(hdc, old_pen);
        SelectObject(hdc, old_brush);
        let _ = DeleteObject(pen.into());
    }
}
