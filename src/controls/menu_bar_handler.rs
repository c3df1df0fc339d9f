/*
 * Dark painting of the classic Win32 menu bar.
 *
 * Windows draws the menu bar through three undocumented "UAH" messages sent to
 * the owning window. Handling them lets us replace the bright strip with the
 * palette colors. A fourth spot Windows paints itself, the 1px line between
 * menu bar and client area, is covered after WM_NCPAINT / WM_NCACTIVATE.
 */

use windows::Win32::{
    Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM},
    Graphics::Gdi::{
        DRAW_TEXT_FORMAT, DT_CENTER, DT_HIDEPREFIX, DT_SINGLELINE, DT_VCENTER, DrawTextW, FillRect,
        GetWindowDC, HDC, MapWindowPoints, OffsetRect, ReleaseDC, SetBkMode, SetTextColor,
        TRANSPARENT,
    },
    UI::Controls::{
        CloseThemeData, DRAWITEMSTRUCT, DTT_TEXTCOLOR, DTTOPTS, DrawThemeTextEx, HTHEME,
        MEASUREITEMSTRUCT, OpenThemeData,
    },
    UI::Shell::DefSubclassProc,
    UI::WindowsAndMessaging::{
        GetClientRect, GetMenuBarInfo, GetMenuItemInfoW, GetWindowRect, HMENU, MENUBARINFO,
        MENUITEMINFOW, MIIM_STRING, OBJECT_IDENTIFIER,
    },
};
use windows::core::{PWSTR, w};

use crate::draw_policy::MenuItemVisual;
use crate::menu_theme_cache::MenuThemeCache;
use crate::theme_resources::ThemeResources;

/// Win32 `OBJID_MENU` (avoids pulling in `Win32_UI_Accessibility`).
const OBJID_MENU_BAR: i32 = -3;

// Theme part/state for a top-level menu bar item (vssym32.h).
const MENU_BARITEM: i32 = 8;
const MBI_NORMAL: i32 = 1;

const MENU_TEXT_CAPACITY: usize = 256;

static MENU_THEME: MenuThemeCache = MenuThemeCache::new();

/// Mirrors the undocumented `UAHMENU` structure Windows passes via `lParam`.
#[repr(C)]
struct UahMenu {
    hmenu: HMENU,
    hdc: HDC,
    _dw_flags: u32,
}

/// `UAHMENUITEMMETRICS`: a union of bar and popup sizes, eight DWORDs wide.
#[repr(C)]
struct UahMenuItemMetrics {
    rgsize: [u32; 8],
}

#[repr(C)]
struct UahMenuPopupMetrics {
    _rgcx: [u32; 4],
    _f_update_max_widths: u32,
}

#[repr(C)]
struct UahMenuItem {
    i_position: i32,
    umim: UahMenuItemMetrics,
    _umpm: UahMenuPopupMetrics,
}

/// Full `lParam` payload for `WM_UAHDRAWMENUITEM`.
#[repr(C)]
struct UahDrawMenuItem {
    dis: DRAWITEMSTRUCT,
    um: UahMenu,
    umi: UahMenuItem,
}

/// Full `lParam` payload for `WM_UAHMEASUREMENUITEM`.
#[repr(C)]
struct UahMeasureMenuItem {
    mis: MEASUREITEMSTRUCT,
    _um: UahMenu,
    umi: UahMenuItem,
}

fn menu_bar_info(hwnd: HWND) -> Option<MENUBARINFO> {
    let mut mbi = MENUBARINFO {
        cbSize: std::mem::size_of::<MENUBARINFO>() as u32,
        ..Default::default()
    };
    unsafe { GetMenuBarInfo(hwnd, OBJECT_IDENTIFIER(OBJID_MENU_BAR), 0, &mut mbi) }
        .ok()
        .map(|_| mbi)
}

/// Fill the entire menu bar background (`WM_UAHDRAWMENU`).
pub(crate) unsafe fn handle_wm_uahdrawmenu(
    hwnd: HWND,
    lparam: LPARAM,
    theme: &ThemeResources,
) -> Option<LRESULT> {
    unsafe {
        if lparam.0 == 0 {
            return None;
        }
        let udm = &*(lparam.0 as *const UahMenu);
        let Some(mbi) = menu_bar_info(hwnd) else {
            log::trace!("MenuBarHandler: GetMenuBarInfo failed for {hwnd:?}");
            return None;
        };
        let mut rc_window = RECT::default();
        if GetWindowRect(hwnd, &mut rc_window).is_err() {
            return None;
        }
        let mut rc_bar = mbi.rcBar;
        let _ = OffsetRect(&mut rc_bar, -rc_window.left, -rc_window.top);
        FillRect(udm.hdc, &rc_bar, theme.menubar_bg_brush);
        Some(LRESULT(1))
    }
}

/// Draw a single menu bar item (`WM_UAHDRAWMENUITEM`).
pub(crate) unsafe fn handle_wm_uahdrawmenuitem(
    hwnd: HWND,
    lparam: LPARAM,
    theme: &ThemeResources,
) -> Option<LRESULT> {
    unsafe {
        if lparam.0 == 0 {
            return None;
        }
        let udmi = &*(lparam.0 as *const UahDrawMenuItem);
        let hdc = udmi.um.hdc;
        let visual = MenuItemVisual::from_item_state(udmi.dis.itemState.0);

        let mut buf = [0u16; MENU_TEXT_CAPACITY];
        let mut mii = MENUITEMINFOW {
            cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
            fMask: MIIM_STRING,
            dwTypeData: PWSTR(buf.as_mut_ptr()),
            cch: (buf.len() - 1) as u32,
            ..std::mem::zeroed()
        };
        let text_len =
            match GetMenuItemInfoW(udmi.um.hmenu, udmi.umi.i_position as u32, true, &mut mii) {
                Ok(()) => (mii.cch as usize).min(buf.len() - 1),
                Err(err) => {
                    log::trace!(
                        "MenuBarHandler: no text for item {} of {:?}: {err:?}",
                        udmi.umi.i_position,
                        udmi.um.hmenu
                    );
                    0
                }
            };

        FillRect(hdc, &udmi.dis.rcItem, theme.item_brush(visual.background));

        if text_len > 0 {
            let mut flags = DT_CENTER | DT_SINGLELINE | DT_VCENTER;
            if visual.hide_prefix {
                flags |= DT_HIDEPREFIX;
            }
            let text_color = theme.item_text_color(visual.text);
            let mut rc = udmi.dis.rcItem;
            let text = &mut buf[..text_len];
            if !draw_themed_item_text(hwnd, hdc, text, flags, text_color, &mut rc) {
                SetBkMode(hdc, TRANSPARENT);
                SetTextColor(hdc, text_color);
                DrawTextW(hdc, text, &mut rc, flags);
            }
        }
        Some(LRESULT(1))
    }
}

unsafe fn draw_themed_item_text(
    hwnd: HWND,
    hdc: HDC,
    text: &[u16],
    flags: DRAW_TEXT_FORMAT,
    text_color: COLORREF,
    rc: &mut RECT,
) -> bool {
    unsafe {
        let Some(raw_theme) = MENU_THEME.get_or_open(|| {
            let htheme = OpenThemeData(Some(hwnd), w!("Menu"));
            let raw = htheme.0 as isize;
            (raw != 0).then_some(raw)
        }) else {
            return false;
        };

        let options = DTTOPTS {
            dwSize: std::mem::size_of::<DTTOPTS>() as u32,
            dwFlags: DTT_TEXTCOLOR,
            crText: text_color,
            ..Default::default()
        };
        DrawThemeTextEx(
            HTHEME(raw_theme as _),
            hdc,
            MENU_BARITEM,
            MBI_NORMAL,
            text,
            flags,
            rc,
            Some(&options as *const DTTOPTS),
        )
        .is_ok()
    }
}

/*
 * WM_UAHMEASUREMENUITEM: the default measurement is kept. The payload is
 * decoded so item widths can be adjusted here later.
 */
pub(crate) unsafe fn handle_wm_uahmeasuremenuitem(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    unsafe {
        let result = DefSubclassProc(hwnd, msg, wparam, lparam);
        if lparam.0 != 0 {
            let ummi = &*(lparam.0 as *const UahMeasureMenuItem);
            log::trace!(
                "MenuBarHandler: measured item {} as {}x{} (metrics {:?})",
                ummi.umi.i_position,
                ummi.mis.itemWidth,
                ummi.mis.itemHeight,
                ummi.umi.umim.rgsize
            );
        }
        result
    }
}

/// Paint over the 1-px bright line Windows leaves between menu bar and client.
pub(crate) unsafe fn draw_menu_nc_bottom_line(hwnd: HWND, theme: &ThemeResources) {
    unsafe {
        if menu_bar_info(hwnd).is_none() {
            return;
        }
        let mut rc_client = RECT::default();
        let mut rc_window = RECT::default();
        if GetClientRect(hwnd, &mut rc_client).is_err()
            || GetWindowRect(hwnd, &mut rc_window).is_err()
        {
            return;
        }
        let points = std::slice::from_raw_parts_mut(&mut rc_client as *mut RECT as *mut POINT, 2);
        MapWindowPoints(Some(hwnd), None, points);
        let _ = OffsetRect(&mut rc_client, -rc_window.left, -rc_window.top);
        let rc_line = RECT {
            left: rc_client.left,
            top: rc_client.top - 1,
            right: rc_client.right,
            bottom: rc_client.top,
        };

        let hdc = GetWindowDC(Some(hwnd));
        if hdc.is_invalid() {
            return;
        }
        FillRect(hdc, &rc_line, theme.menubar_bg_brush);
        ReleaseDC(Some(hwnd), hdc);
    }
}

/// WM_THEMECHANGED: drop the cached menu theme so the next item draw reopens it.
pub(crate) fn invalidate_menu_theme() {
    MENU_THEME.invalidate(|raw| unsafe {
        if let Err(err) = CloseThemeData(HTHEME(raw as _)) {
            log::trace!("MenuBarHandler: CloseThemeData failed: {err:?}");
        }
    });
}
