/*
 * Dark-mode plumbing shared by the hook and the subclass procedure.
 *
 * Two separate switches are involved. The DWM immersive-dark-mode attribute
 * darkens a window's title bar and is set per window. The private uxtheme
 * `SetPreferredAppMode` (exported by ordinal only) makes common controls and
 * context menus created afterwards pick their dark variants; it is resolved
 * and called once per process and silently skipped on builds that lack it.
 */

use std::ffi::c_void;
use std::sync::OnceLock;

use windows::Win32::{
    Foundation::{HMODULE, HWND},
    Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute},
    System::LibraryLoader::{GetProcAddress, LOAD_LIBRARY_SEARCH_SYSTEM32, LoadLibraryExW},
    UI::Controls::SetWindowTheme,
};
use windows::core::{BOOL, PCSTR, w};

const DWMWA_USE_IMMERSIVE_DARK_MODE: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(20);
// Windows 10 builds before 20H1 used 19 for the same attribute.
const DWMWA_USE_IMMERSIVE_DARK_MODE_BEFORE_20H1: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(19);

pub(crate) const UXTHEME_ORD_SET_PREFERRED_APP_MODE: usize = 135;

#[repr(i32)]
#[derive(Debug, Clone, Copy)]
enum PreferredAppMode {
    ForceDark = 2,
}

// The previous mode is returned; it is an arbitrary int from our side.
type SetPreferredAppModeFn = unsafe extern "system" fn(i32) -> i32;

/// Requests dark chrome for `hwnd` and makes sure the process prefers dark
/// common controls. A null `hwnd` only performs the process-wide part.
pub(crate) fn apply_dark_mode(hwnd: HWND) {
    if !hwnd.is_invalid() {
        if let Err(err) = set_immersive_dark_mode(hwnd) {
            log::trace!("DarkMode: DwmSetWindowAttribute failed for {hwnd:?}: {err:?}");
        }
    }
    force_dark_app_mode_once();
}

fn set_immersive_dark_mode(hwnd: HWND) -> windows::core::Result<()> {
    let enable: BOOL = true.into();
    let value = &enable as *const BOOL as *const c_void;
    let size = std::mem::size_of::<BOOL>() as u32;
    unsafe {
        DwmSetWindowAttribute(hwnd, DWMWA_USE_IMMERSIVE_DARK_MODE, value, size).or_else(|_| {
            DwmSetWindowAttribute(hwnd, DWMWA_USE_IMMERSIVE_DARK_MODE_BEFORE_20H1, value, size)
        })
    }
}

fn force_dark_app_mode_once() {
    static SET_PREFERRED_APP_MODE: OnceLock<Option<SetPreferredAppModeFn>> = OnceLock::new();

    SET_PREFERRED_APP_MODE.get_or_init(|| unsafe {
        let module = match LoadLibraryExW(w!("uxtheme.dll"), None, LOAD_LIBRARY_SEARCH_SYSTEM32) {
            Ok(module) => module,
            Err(err) => {
                log::debug!("DarkMode: failed to load uxtheme.dll: {err:?}");
                return None;
            }
        };
        let Some(ptr) = get_uxtheme_proc_address(module, UXTHEME_ORD_SET_PREFERRED_APP_MODE)
        else {
            log::debug!("DarkMode: SetPreferredAppMode is unavailable on this OS build.");
            return None;
        };
        let set_preferred = std::mem::transmute::<*const c_void, SetPreferredAppModeFn>(ptr);
        let previous = set_preferred(PreferredAppMode::ForceDark as i32);
        log::debug!("DarkMode: SetPreferredAppMode(ForceDark) succeeded (previous mode {previous}).");
        Some(set_preferred)
    });
}

fn get_uxtheme_proc_address(module: HMODULE, ordinal: usize) -> Option<*const c_void> {
    unsafe { GetProcAddress(module, PCSTR(ordinal as *const u8)) }.map(|func| func as *const c_void)
}

/*
 * Replaces the control's visual style with a nonexistent one. The control then
 * falls back to classic rendering, which honors the WM_CTLCOLOR* answers and
 * does not paint a light themed frame over our colors.
 */
pub(crate) fn neutralize_visual_style(hwnd: HWND) {
    if let Err(err) = unsafe { SetWindowTheme(hwnd, w!("wstr"), w!("wstr")) } {
        log::trace!("DarkMode: SetWindowTheme failed for {hwnd:?}: {err:?}");
    }
}
