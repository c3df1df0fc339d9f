/*
 * Process-wide cache for the themed-drawing handle used to render menu bar
 * text. It is opened the first time a menu bar item is drawn and closed when a
 * WM_THEMECHANGED arrives, so the next draw reopens it against the new system
 * theme. All menus share one handle.
 *
 * The lock is held across the open/close callbacks; neither OpenThemeData nor
 * CloseThemeData dispatches window messages, so this cannot re-enter.
 */

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub(crate) struct MenuThemeCache {
    handle: Mutex<Option<isize>>,
}

impl MenuThemeCache {
    pub(crate) const fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<isize>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached handle, opening it on first use. A failed open is
    /// not cached; the next draw retries.
    pub(crate) fn get_or_open(&self, open: impl FnOnce() -> Option<isize>) -> Option<isize> {
        let mut slot = self.slot();
        if slot.is_none() {
            *slot = open();
            if slot.is_some() {
                log::debug!("MenuThemeCache: opened menu theme {:?}", *slot);
            }
        }
        *slot
    }

    /// Closes and forgets the cached handle. Returns whether one was open.
    pub(crate) fn invalidate(&self, close: impl FnOnce(isize)) -> bool {
        match self.slot().take() {
            Some(handle) => {
                close(handle);
                log::debug!("MenuThemeCache: closed menu theme {handle:#x}");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn opens_once_and_reuses_the_handle() {
        let cache = MenuThemeCache::new();
        let opens = Cell::new(0);
        let open = || {
            opens.set(opens.get() + 1);
            Some(0x42)
        };

        assert_eq!(cache.get_or_open(open), Some(0x42));
        assert_eq!(cache.get_or_open(open), Some(0x42));
        assert_eq!(opens.get(), 1);
    }

    #[test]
    fn invalidate_closes_and_next_draw_reopens() {
        let cache = MenuThemeCache::new();
        cache.get_or_open(|| Some(7));

        let closed = Cell::new(None);
        assert!(cache.invalidate(|h| closed.set(Some(h))));
        assert_eq!(closed.get(), Some(7));
        assert!(!cache.invalidate(|_| panic!("nothing to close")));

        assert_eq!(cache.get_or_open(|| Some(8)), Some(8));
    }

    #[test]
    fn failed_open_is_retried() {
        let cache = MenuThemeCache::new();
        assert_eq!(cache.get_or_open(|| None), None);
        assert_eq!(cache.get_or_open(|| Some(3)), Some(3));
    }
}
