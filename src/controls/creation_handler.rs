/*
 * One-time fix-ups applied on WM_NCCREATE, before the control paints for the
 * first time.
 */

use windows::Win32::{
    Foundation::HWND,
    UI::WindowsAndMessaging::{GWL_STYLE, GetWindowLongPtrW, SetWindowLongPtrW},
};

use crate::dark_mode::{apply_dark_mode, neutralize_visual_style};
use crate::draw_policy::{CreationFixup, creation_fixup};
use crate::window_class::WindowClassTag;

pub(crate) fn handle_wm_nccreate(hwnd: HWND, tag: WindowClassTag) {
    apply_dark_mode(hwnd);

    let style = unsafe { GetWindowLongPtrW(hwnd, GWL_STYLE) } as u32;
    match creation_fixup(tag, style) {
        CreationFixup::None => {}
        CreationFixup::NeutralizeVisualStyle => {
            log::trace!("CreationHandler: classic rendering for {tag:?} {hwnd:?}");
            neutralize_visual_style(hwnd);
        }
        CreationFixup::AddOwnerDraw { new_style } => {
            log::trace!("CreationHandler: owner-draw push button {hwnd:?}");
            unsafe {
                SetWindowLongPtrW(hwnd, GWL_STYLE, new_style as _);
            }
        }
    }
}
