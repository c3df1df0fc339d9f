/*
 * Platform-neutral handle types. The bookkeeping layers (subclass registry,
 * hook slot, attach/detach orchestration) only ever compare and store handles,
 * so they work on these raw values and stay testable off Windows. The Win32
 * glue converts to and from `HWND` / `HHOOK` at the boundary.
 */

/// Raw value of a native window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn raw(self) -> isize {
        self.0
    }
}

/// Raw value of the installed window-creation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookHandle(pub isize);

impl HookHandle {
    pub fn raw(self) -> isize {
        self.0
    }
}
