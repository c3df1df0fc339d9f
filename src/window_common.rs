/*
 * Win32 side of the shim: handle conversions, window classification from the
 * live class name, the `WindowPlatform` implementation used by the
 * `ThemeShim`, and the thread-scoped WH_CBT hook that feeds it window
 * creations and destructions.
 */

use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};

use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    System::Threading::{GetCurrentProcessId, GetCurrentThreadId},
    UI::Shell::{RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{
        CallNextHookEx, FindWindowExW, GetClassNameW, GetWindowThreadProcessId, HHOOK,
        SetWindowsHookExW, UnhookWindowsHookEx, WH_CBT,
    },
};
use windows::core::PCWSTR;

use crate::dark_mode::apply_dark_mode;
use crate::error::Result;
use crate::hook_engine::{ThemeShim, WindowPlatform};
use crate::subclass_proc::{THEME_SUBCLASS_ID, theme_subclass_proc};
use crate::types::{HookHandle, WindowHandle};
use crate::window_class::{WindowClassTag, classify_class_name};
use crate::window_enum::collect_process_windows;

const HCBT_CREATEWND: i32 = 3;
const HCBT_DESTROYWND: i32 = 4;

// Window class names are limited to 256 characters.
const CLASS_NAME_CAPACITY: usize = 257;

/// The one shim instance living in the host process.
pub(crate) static SHIM: ThemeShim = ThemeShim::new();

pub(crate) fn hwnd_from(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut c_void)
}

pub(crate) fn handle_of(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

pub(crate) fn window_class_name(hwnd: HWND) -> Option<String> {
    let mut buffer = [0u16; CLASS_NAME_CAPACITY];
    let len = unsafe { GetClassNameW(hwnd, &mut buffer) };
    (len > 0).then(|| String::from_utf16_lossy(&buffer[..len as usize]))
}

/// Classifies a live window; unknown or vanished windows are `Other`.
pub(crate) fn classify_hwnd(hwnd: HWND) -> WindowClassTag {
    window_class_name(hwnd)
        .map(|name| classify_class_name(&name))
        .unwrap_or(WindowClassTag::Other)
}

/// Top-level windows currently owned by `process_id`, in z-order.
pub(crate) fn enumerate_process_windows(process_id: u32) -> Vec<WindowHandle> {
    collect_process_windows(
        process_id,
        |after| {
            unsafe { FindWindowExW(None, after.map(hwnd_from), PCWSTR::null(), PCWSTR::null()) }
                .ok()
                .filter(|hwnd| !hwnd.is_invalid())
                .map(handle_of)
        },
        |hwnd| {
            let mut owner = 0u32;
            unsafe { GetWindowThreadProcessId(hwnd_from(hwnd), Some(&mut owner as *mut u32)) };
            owner
        },
    )
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Win32Platform;

impl WindowPlatform for Win32Platform {
    fn class_name(&self, hwnd: WindowHandle) -> Option<String> {
        window_class_name(hwnd_from(hwnd))
    }

    fn apply_dark_mode(&self, hwnd: WindowHandle) {
        apply_dark_mode(hwnd_from(hwnd));
    }

    fn install_subclass(&self, hwnd: WindowHandle) -> bool {
        unsafe {
            SetWindowSubclass(hwnd_from(hwnd), Some(theme_subclass_proc), THEME_SUBCLASS_ID, 0)
        }
        .as_bool()
    }

    fn remove_subclass(&self, hwnd: WindowHandle) -> bool {
        unsafe {
            RemoveWindowSubclass(hwnd_from(hwnd), Some(theme_subclass_proc), THEME_SUBCLASS_ID)
        }
        .as_bool()
    }

    fn is_owned_by_current_thread(&self, hwnd: WindowHandle) -> bool {
        unsafe { GetWindowThreadProcessId(hwnd_from(hwnd), None) == GetCurrentThreadId() }
    }

    fn process_windows(&self) -> Vec<WindowHandle> {
        enumerate_process_windows(unsafe { GetCurrentProcessId() })
    }

    fn install_creation_hook(&self) -> Result<HookHandle> {
        let hook =
            unsafe { SetWindowsHookExW(WH_CBT, Some(cbt_hook_proc), None, GetCurrentThreadId())? };
        Ok(HookHandle(hook.0 as isize))
    }

    fn remove_creation_hook(&self, hook: HookHandle) -> Result<()> {
        unsafe { UnhookWindowsHookEx(HHOOK(hook.raw() as _))? };
        Ok(())
    }
}

/*
 * WH_CBT callback. Creation and destruction are forwarded to the shim; every
 * other code (including negative ones) goes straight down the chain. A panic
 * in our part is logged and swallowed so it never unwinds into user32.
 */
unsafe extern "system" fn cbt_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hwnd = WindowHandle(wparam.0 as isize);
    let outcome = catch_unwind(AssertUnwindSafe(|| match code {
        HCBT_CREATEWND => SHIM.on_window_created(&Win32Platform, hwnd),
        HCBT_DESTROYWND => {
            SHIM.on_window_destroyed(&Win32Platform, hwnd);
        }
        _ => {}
    }));
    if outcome.is_err() {
        log::error!("ThemeShim: panic in the window-creation hook for {hwnd:?} (code {code})");
    }
    unsafe { CallNextHookEx(None, code, wparam, lparam) }
}
