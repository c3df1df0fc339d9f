/*
 * The subclass procedure installed on every themed window. Message ids we do
 * not care about go straight to `DefSubclassProc`; the rest are decoded,
 * routed by the window's class, and handed to a handler in `controls`.
 */

use std::panic::{AssertUnwindSafe, catch_unwind};

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::HDC,
    UI::Controls::DRAWITEMSTRUCT,
    UI::Shell::DefSubclassProc,
};

use crate::controls::{
    background_handler, button_handler, creation_handler, menu_bar_handler, native_color_handler,
};
use crate::message_router::{MessageKind, MessageRoute, route};
use crate::theme_resources::theme;
use crate::window_common::{SHIM, Win32Platform, classify_hwnd, handle_of};

pub(crate) const THEME_SUBCLASS_ID: usize = 0;

pub(crate) unsafe extern "system" fn theme_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id: usize,
    _ref_data: usize,
) -> LRESULT {
    let Some(kind) = MessageKind::from_id(msg) else {
        return unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) };
    };

    let handled = catch_unwind(AssertUnwindSafe(|| unsafe {
        dispatch(hwnd, kind, msg, wparam, lparam)
    }))
    .unwrap_or_else(|_| {
        log::error!("[Route] panic while handling {kind:?} for {hwnd:?}");
        None
    });

    handled.unwrap_or_else(|| unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) })
}

/*
 * Returns the final result when the message was answered here, or None to let
 * `DefSubclassProc` run. Routes that must forward first call it themselves.
 */
unsafe fn dispatch(
    hwnd: HWND,
    kind: MessageKind,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> Option<LRESULT> {
    let tag = classify_hwnd(hwnd);
    let hdc = HDC(wparam.0 as _);

    unsafe {
        match route(kind, tag) {
            MessageRoute::DialogBackground => {
                Some(background_handler::handle_ctlcolor_dialog(theme()))
            }
            MessageRoute::TextColors => Some(background_handler::handle_ctlcolor_text(hdc, theme())),
            MessageRoute::ComboListColors => background_handler::handle_ctlcolor_combo_list(
                hwnd,
                hdc,
                HWND(lparam.0 as _),
                theme(),
            ),
            MessageRoute::OwnerDrawButton => {
                button_handler::handle_wm_drawitem(lparam.0 as *const DRAWITEMSTRUCT, theme())
            }
            MessageRoute::EraseBackground => {
                background_handler::handle_erase_background(hwnd, tag, hdc, theme())
            }
            MessageRoute::MenuBarBottomLine => {
                let result = DefSubclassProc(hwnd, msg, wparam, lparam);
                menu_bar_handler::draw_menu_nc_bottom_line(hwnd, theme());
                Some(result)
            }
            MessageRoute::CreationFixup => {
                creation_handler::handle_wm_nccreate(hwnd, tag);
                None
            }
            MessageRoute::ReleaseSubclass => {
                // Last message the window receives; children destroyed with their
                // parent never reach the CBT hook's destroy notification.
                SHIM.on_window_destroyed(&Win32Platform, handle_of(hwnd));
                None
            }
            MessageRoute::SwallowStyleChange => Some(LRESULT(1)),
            MessageRoute::InvalidateMenuTheme => {
                menu_bar_handler::invalidate_menu_theme();
                None
            }
            MessageRoute::NativeColors(target) => {
                native_color_handler::apply_native_colors(hwnd, target, theme());
                None
            }
            MessageRoute::DrawMenuBar => menu_bar_handler::handle_wm_uahdrawmenu(hwnd, lparam, theme()),
            MessageRoute::DrawMenuBarItem => {
                menu_bar_handler::handle_wm_uahdrawmenuitem(hwnd, lparam, theme())
            }
            MessageRoute::MeasureMenuBarItem => Some(
                menu_bar_handler::handle_wm_uahmeasuremenuitem(hwnd, msg, wparam, lparam),
            ),
            MessageRoute::Forward => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::message_router::*;
    use windows::Win32::UI::WindowsAndMessaging as wm;

    #[test]
    fn message_ids_match_the_system_headers() {
        assert_eq!(WM_PAINT, wm::WM_PAINT);
        assert_eq!(WM_ERASEBKGND, wm::WM_ERASEBKGND);
        assert_eq!(WM_DRAWITEM, wm::WM_DRAWITEM);
        assert_eq!(WM_STYLECHANGING, wm::WM_STYLECHANGING);
        assert_eq!(WM_STYLECHANGED, wm::WM_STYLECHANGED);
        assert_eq!(WM_NCCREATE, wm::WM_NCCREATE);
        assert_eq!(WM_NCDESTROY, wm::WM_NCDESTROY);
        assert_eq!(WM_NCPAINT, wm::WM_NCPAINT);
        assert_eq!(WM_NCACTIVATE, wm::WM_NCACTIVATE);
        assert_eq!(WM_CTLCOLOREDIT, wm::WM_CTLCOLOREDIT);
        assert_eq!(WM_CTLCOLORLISTBOX, wm::WM_CTLCOLORLISTBOX);
        assert_eq!(WM_CTLCOLORDLG, wm::WM_CTLCOLORDLG);
        assert_eq!(WM_CTLCOLORSCROLLBAR, wm::WM_CTLCOLORSCROLLBAR);
        assert_eq!(WM_CTLCOLORSTATIC, wm::WM_CTLCOLORSTATIC);
        assert_eq!(WM_THEMECHANGED, wm::WM_THEMECHANGED);
    }
}
