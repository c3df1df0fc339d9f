/*
 * Dark theming shim for the Unity editor on Windows.
 *
 * The cdylib is injected into the editor process. On attach it switches the
 * process to dark common controls, subclasses the editor's existing windows and
 * installs a window-creation hook so later windows are subclassed too. The
 * subclass procedure repaints the classic menu bar, dialogs, buttons and a few
 * common controls with a palette read from `<module-filename>.ini`.
 *
 * Everything that does not touch Win32 (palette parsing, classification,
 * message routing, drawing decisions, subclass bookkeeping) is portable so it
 * can be built and tested on any platform.
 */
#![cfg_attr(not(target_os = "windows"), allow(dead_code))]

pub(crate) mod draw_policy;
pub mod error;
pub(crate) mod hook_engine;
pub mod logging;
pub(crate) mod menu_theme_cache;
pub(crate) mod message_router;
pub mod styling_primitives;
pub mod theme_config;
pub mod types;
pub mod window_class;
pub(crate) mod window_enum;

#[cfg(target_os = "windows")]
pub(crate) mod controls;
#[cfg(target_os = "windows")]
pub(crate) mod dark_mode;
#[cfg(target_os = "windows")]
pub(crate) mod lifecycle;
#[cfg(target_os = "windows")]
pub(crate) mod subclass_proc;
#[cfg(target_os = "windows")]
pub(crate) mod theme_resources;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

pub use error::{Result, ShimError};
pub use styling_primitives::{Color, ParseColorError};
pub use theme_config::{ThemeConfig, ThemeKey};
pub use window_class::{WindowClassTag, classify_class_name};

#[cfg(target_os = "windows")]
use windows::Win32::{
    Foundation::{HINSTANCE, HMODULE},
    System::SystemServices::{DLL_PROCESS_ATTACH, DLL_PROCESS_DETACH},
};
#[cfg(target_os = "windows")]
use windows::core::BOOL;

/// Loader entry point. Always reports success so a theming problem can never
/// keep the editor from starting.
#[cfg(target_os = "windows")]
#[unsafe(no_mangle)]
pub extern "system" fn DllMain(
    hinst: HINSTANCE,
    reason: u32,
    reserved: *mut std::ffi::c_void,
) -> BOOL {
    match reason {
        DLL_PROCESS_ATTACH => lifecycle::on_process_attach(HMODULE(hinst.0)),
        // A non-null reserved pointer means the whole process is exiting.
        DLL_PROCESS_DETACH => lifecycle::on_process_detach(!reserved.is_null()),
        _ => {}
    }
    true.into()
}
