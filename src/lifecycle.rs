/*
 * What the module does when the loader attaches or detaches it. Failures are
 * logged and swallowed: the host keeps running with whatever theming could be
 * applied.
 */

use windows::Win32::{Foundation::HMODULE, System::LibraryLoader::DisableThreadLibraryCalls};

use crate::logging::init_file_logger;
use crate::theme_resources::{module_path, remember_module};
use crate::window_common::{SHIM, Win32Platform};

pub(crate) fn on_process_attach(module: HMODULE) {
    remember_module(module);
    if let Ok(path) = module_path() {
        init_file_logger(&path);
    }
    log::debug!("ThemeShim: attaching (module {module:?})");

    // Thread attach/detach notifications are never needed.
    if let Err(err) = unsafe { DisableThreadLibraryCalls(module) } {
        log::trace!("ThemeShim: DisableThreadLibraryCalls failed: {err:?}");
    }

    if let Err(err) = SHIM.attach(&Win32Platform) {
        log::warn!("ThemeShim: attach incomplete: {err}");
    }
}

pub(crate) fn on_process_detach(process_terminating: bool) {
    log::debug!(
        "ThemeShim: detaching ({} subclasses live, hooked: {}, process terminating: {process_terminating})",
        SHIM.registry().len(),
        SHIM.is_hooked()
    );
    if let Err(err) = SHIM.detach(&Win32Platform, process_terminating) {
        log::warn!("ThemeShim: detach incomplete: {err}");
    }
}
