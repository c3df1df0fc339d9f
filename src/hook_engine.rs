/*
 * Bookkeeping behind the window-creation hook and the attach/detach lifecycle.
 *
 * `ThemeShim` decides which windows get themed and keeps installs and removals
 * of the message subclass paired: a handle is registered exactly once when it
 * is subclassed and released exactly once when the subclass is removed, and a
 * destroy notification for a handle that was never registered does nothing.
 * The Win32 specifics (class names, SetWindowSubclass, SetWindowsHookExW, ...)
 * sit behind `WindowPlatform`, so the whole lifecycle can be driven by a fake
 * platform in tests.
 *
 * The CBT hook can re-enter itself when creating one window creates another,
 * so no lock in here is held while calling into the platform.
 */

use crate::error::{Result, ShimError};
use crate::types::{HookHandle, WindowHandle};
use crate::window_class::{WindowClassTag, classify_class_name};

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) trait WindowPlatform {
    fn class_name(&self, hwnd: WindowHandle) -> Option<String>;
    /// Requests dark chrome for `hwnd`; must accept `WindowHandle::NULL`.
    fn apply_dark_mode(&self, hwnd: WindowHandle);
    fn install_subclass(&self, hwnd: WindowHandle) -> bool;
    fn remove_subclass(&self, hwnd: WindowHandle) -> bool;
    fn is_owned_by_current_thread(&self, hwnd: WindowHandle) -> bool;
    fn process_windows(&self) -> Vec<WindowHandle>;
    fn install_creation_hook(&self) -> Result<HookHandle>;
    fn remove_creation_hook(&self, hook: HookHandle) -> Result<()>;
}

pub(crate) fn classify_window(platform: &impl WindowPlatform, hwnd: WindowHandle) -> WindowClassTag {
    platform
        .class_name(hwnd)
        .map_or(WindowClassTag::Other, |name| classify_class_name(&name))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handles that currently carry our message subclass.
#[derive(Debug)]
pub(crate) struct SubclassRegistry {
    handles: Mutex<BTreeSet<WindowHandle>>,
}

impl SubclassRegistry {
    pub(crate) const fn new() -> Self {
        Self {
            handles: Mutex::new(BTreeSet::new()),
        }
    }

    /// Returns false when the handle is already registered.
    fn claim(&self, hwnd: WindowHandle) -> bool {
        lock(&self.handles).insert(hwnd)
    }

    /// Returns false when the handle was never registered.
    fn release(&self, hwnd: WindowHandle) -> bool {
        lock(&self.handles).remove(&hwnd)
    }

    fn drain_where(&self, mut keep: impl FnMut(WindowHandle) -> bool) -> Vec<WindowHandle> {
        let mut handles = lock(&self.handles);
        let drained: Vec<_> = handles.iter().copied().filter(|h| keep(*h)).collect();
        for hwnd in &drained {
            handles.remove(hwnd);
        }
        drained
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, hwnd: WindowHandle) -> bool {
        lock(&self.handles).contains(&hwnd)
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.handles).len()
    }
}

/// The single thread-scoped window-creation hook.
#[derive(Debug)]
pub(crate) struct HookSlot {
    hook: Mutex<Option<HookHandle>>,
}

impl HookSlot {
    pub(crate) const fn new() -> Self {
        Self {
            hook: Mutex::new(None),
        }
    }

    pub(crate) fn install(&self, install: impl FnOnce() -> Result<HookHandle>) -> Result<HookHandle> {
        let mut slot = lock(&self.hook);
        if slot.is_some() {
            return Err(ShimError::HookAlreadyInstalled);
        }
        let hook = install()?;
        *slot = Some(hook);
        Ok(hook)
    }

    pub(crate) fn remove(&self, remove: impl FnOnce(HookHandle) -> Result<()>) -> Result<()> {
        let hook = lock(&self.hook).take().ok_or(ShimError::HookNotInstalled)?;
        remove(hook)
    }

    pub(crate) fn is_installed(&self) -> bool {
        lock(&self.hook).is_some()
    }
}

#[derive(Debug)]
pub(crate) struct ThemeShim {
    registry: SubclassRegistry,
    hook: HookSlot,
}

impl ThemeShim {
    pub(crate) const fn new() -> Self {
        Self {
            registry: SubclassRegistry::new(),
            hook: HookSlot::new(),
        }
    }

    pub(crate) fn registry(&self) -> &SubclassRegistry {
        &self.registry
    }

    /*
     * Applies dark mode and installs the subclass on `hwnd` when its class is
     * one we theme and it is not subclassed yet. Returns whether a new
     * subclass was installed.
     */
    pub(crate) fn theme_window(&self, platform: &impl WindowPlatform, hwnd: WindowHandle) -> bool {
        let tag = classify_window(platform, hwnd);
        if !tag.is_themed() {
            return false;
        }
        if !self.registry.claim(hwnd) {
            log::trace!("ThemeShim: {hwnd:?} ({tag:?}) already subclassed");
            return false;
        }
        platform.apply_dark_mode(hwnd);
        if platform.install_subclass(hwnd) {
            log::debug!("ThemeShim: subclassed {hwnd:?} ({tag:?})");
            true
        } else {
            self.registry.release(hwnd);
            log::warn!("ThemeShim: SetWindowSubclass failed for {hwnd:?} ({tag:?})");
            false
        }
    }

    pub(crate) fn on_window_created(&self, platform: &impl WindowPlatform, hwnd: WindowHandle) {
        self.theme_window(platform, hwnd);
    }

    /// Removes our subclass before the window goes away. Unknown handles are
    /// ignored. Returns whether a subclass was removed.
    pub(crate) fn on_window_destroyed(
        &self,
        platform: &impl WindowPlatform,
        hwnd: WindowHandle,
    ) -> bool {
        if !self.registry.release(hwnd) {
            return false;
        }
        if !platform.remove_subclass(hwnd) {
            log::warn!("ThemeShim: RemoveWindowSubclass failed for {hwnd:?}");
        }
        log::debug!("ThemeShim: unsubclassed {hwnd:?}");
        true
    }

    /*
     * Attach-time bring-up: dark mode for the process pseudo-window, retrofit
     * the windows that already exist, then hook future window creation.
     */
    pub(crate) fn attach(&self, platform: &impl WindowPlatform) -> Result<()> {
        platform.apply_dark_mode(WindowHandle::NULL);

        let existing = platform.process_windows();
        let themed = existing
            .iter()
            .filter(|hwnd| self.theme_window(platform, **hwnd))
            .count();
        log::debug!(
            "ThemeShim: retrofitted {themed} of {} existing windows",
            existing.len()
        );

        let hook = self.hook.install(|| platform.install_creation_hook())?;
        log::debug!("ThemeShim: window-creation hook installed ({:#x})", hook.raw());
        Ok(())
    }

    /*
     * Removes the hook. On a dynamic unload (the process keeps running) the
     * remaining subclasses on this thread's windows are removed too, since
     * their procedure is about to be unmapped.
     */
    pub(crate) fn detach(&self, platform: &impl WindowPlatform, process_terminating: bool) -> Result<()> {
        let hook_result = self.hook.remove(|hook| platform.remove_creation_hook(hook));

        if !process_terminating {
            let handles = self
                .registry
                .drain_where(|hwnd| platform.is_owned_by_current_thread(hwnd));
            for hwnd in &handles {
                if !platform.remove_subclass(*hwnd) {
                    log::warn!("ThemeShim: RemoveWindowSubclass failed for {hwnd:?} on unload");
                }
            }
            log::debug!("ThemeShim: removed {} subclasses on unload", handles.len());
        }

        hook_result
    }

    pub(crate) fn is_hooked(&self) -> bool {
        self.hook.is_installed()
    }
}
