/*
 * Tooltips, tree views and list views are recolored through their own
 * color-setting messages right before they paint. Each color is read back
 * first and only sent when it differs, since setting a color invalidates the
 * control and would otherwise queue another WM_PAINT.
 */

use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::WindowsAndMessaging::SendMessageW,
};

use crate::controls::styling_handler::{colorref_as_lparam, colorref_as_wparam};
use crate::message_router::NativeColorTarget;
use crate::theme_config::ThemeKey;
use crate::theme_resources::ThemeResources;

const TTM_SETTIPBKCOLOR: u32 = 0x0413;
const TTM_SETTIPTEXTCOLOR: u32 = 0x0414;
const TTM_GETTIPBKCOLOR: u32 = 0x0416;
const TTM_GETTIPTEXTCOLOR: u32 = 0x0417;

const TVM_SETBKCOLOR: u32 = 0x111D;
const TVM_SETTEXTCOLOR: u32 = 0x111E;
const TVM_GETBKCOLOR: u32 = 0x111F;
const TVM_GETTEXTCOLOR: u32 = 0x1120;

const LVM_GETBKCOLOR: u32 = 0x1000;
const LVM_SETBKCOLOR: u32 = 0x1001;
const LVM_GETTEXTCOLOR: u32 = 0x1023;
const LVM_SETTEXTCOLOR: u32 = 0x1024;
const LVM_GETTEXTBKCOLOR: u32 = 0x1025;
const LVM_SETTEXTBKCOLOR: u32 = 0x1026;

#[derive(Debug, Clone, Copy)]
enum ColorArg {
    WParam,
    LParam,
}

#[derive(Debug, Clone, Copy)]
struct ColorSlot {
    get: u32,
    set: u32,
    arg: ColorArg,
    key: ThemeKey,
}

const TOOLTIP_SLOTS: &[ColorSlot] = &[
    ColorSlot {
        get: TTM_GETTIPBKCOLOR,
        set: TTM_SETTIPBKCOLOR,
        arg: ColorArg::WParam,
        key: ThemeKey::MenuBarBackground,
    },
    ColorSlot {
        get: TTM_GETTIPTEXTCOLOR,
        set: TTM_SETTIPTEXTCOLOR,
        arg: ColorArg::WParam,
        key: ThemeKey::MenuBarText,
    },
];

const TREEVIEW_SLOTS: &[ColorSlot] = &[
    ColorSlot {
        get: TVM_GETBKCOLOR,
        set: TVM_SETBKCOLOR,
        arg: ColorArg::LParam,
        key: ThemeKey::MenuBarBackground,
    },
    ColorSlot {
        get: TVM_GETTEXTCOLOR,
        set: TVM_SETTEXTCOLOR,
        arg: ColorArg::LParam,
        key: ThemeKey::MenuBarText,
    },
];

const LISTVIEW_SLOTS: &[ColorSlot] = &[
    ColorSlot {
        get: LVM_GETBKCOLOR,
        set: LVM_SETBKCOLOR,
        arg: ColorArg::LParam,
        key: ThemeKey::MenuBarBackground,
    },
    ColorSlot {
        get: LVM_GETTEXTBKCOLOR,
        set: LVM_SETTEXTBKCOLOR,
        arg: ColorArg::LParam,
        key: ThemeKey::MenuBarBackground,
    },
    ColorSlot {
        get: LVM_GETTEXTCOLOR,
        set: LVM_SETTEXTCOLOR,
        arg: ColorArg::LParam,
        key: ThemeKey::MenuBarText,
    },
];

fn slots_for(target: NativeColorTarget) -> &'static [ColorSlot] {
    match target {
        NativeColorTarget::Tooltip => TOOLTIP_SLOTS,
        NativeColorTarget::TreeView => TREEVIEW_SLOTS,
        NativeColorTarget::ListView => LISTVIEW_SLOTS,
    }
}

pub(crate) fn apply_native_colors(hwnd: HWND, target: NativeColorTarget, theme: &ThemeResources) {
    for slot in slots_for(target) {
        let wanted = theme.colorref(slot.key);
        let current = unsafe { SendMessageW(hwnd, slot.get, None, None) };
        if current.0 as u32 == wanted.0 {
            continue;
        }
        let (wparam, lparam) = match slot.arg {
            ColorArg::WParam => (colorref_as_wparam(wanted), LPARAM(0)),
            ColorArg::LParam => (WPARAM(0), colorref_as_lparam(wanted)),
        };
        log::trace!("NativeColorHandler: {target:?} {hwnd:?} message {:#x}", slot.set);
        unsafe {
            SendMessageW(hwnd, slot.set, Some(wparam), Some(lparam));
        }
    }
}
