/*
 * One-shot walk over the desktop's top-level windows, keeping the ones owned by
 * a given process. The walk is expressed over two callbacks ("window after this
 * one" and "owning process of this window") so the Win32 layer supplies
 * FindWindowExW / GetWindowThreadProcessId and the filter itself stays testable.
 */

use crate::types::WindowHandle;

pub(crate) fn collect_process_windows(
    process_id: u32,
    mut next_window: impl FnMut(Option<WindowHandle>) -> Option<WindowHandle>,
    owner_process: impl Fn(WindowHandle) -> u32,
) -> Vec<WindowHandle> {
    let mut windows = Vec::new();
    let mut current = None;
    while let Some(hwnd) = next_window(current) {
        if owner_process(hwnd) == process_id {
            windows.push(hwnd);
        }
        current = Some(hwnd);
    }
    log::debug!(
        "WindowEnum: found {} top-level windows for process {process_id}",
        windows.len()
    );
    windows
}
