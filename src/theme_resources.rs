/*
 * The process-wide palette plus the GDI brushes derived from it.
 *
 * The palette is read (or first written) from `<module path>.ini` the first
 * time any handler asks for it and is then immutable. Brushes are created at
 * the same moment and intentionally live until process exit: they are handed
 * back to the system from WM_CTLCOLOR* answers and may still be referenced by
 * controls after we would otherwise free them.
 */

use std::ffi::c_void;
use std::path::PathBuf;
use std::sync::OnceLock;

use windows::Win32::{
    Foundation::{COLORREF, HMODULE},
    Graphics::Gdi::{CreateSolidBrush, HBRUSH},
    System::LibraryLoader::GetModuleFileNameW,
};

use crate::controls::styling_handler::color_to_colorref;
use crate::draw_policy::{MenuItemBackground, MenuItemText};
use crate::error::{Result, ShimError};
use crate::theme_config::{ThemeConfig, ThemeKey, config_path_for_module, load_or_create};

static MODULE_HANDLE: OnceLock<usize> = OnceLock::new();
static THEME: OnceLock<ThemeResources> = OnceLock::new();

/// Remembers the shim's own module so its file path can be resolved later.
pub(crate) fn remember_module(module: HMODULE) {
    let _ = MODULE_HANDLE.set(module.0 as usize);
}

pub(crate) fn module_path() -> Result<PathBuf> {
    let module = MODULE_HANDLE
        .get()
        .map(|raw| HMODULE(*raw as *mut c_void))
        .ok_or(ShimError::ModulePathUnavailable)?;

    let mut buffer = vec![0u16; 1024];
    let len = unsafe { GetModuleFileNameW(Some(module), &mut buffer) } as usize;
    // A full buffer means the path was truncated.
    if len == 0 || len >= buffer.len() {
        return Err(ShimError::ModulePathUnavailable);
    }
    Ok(PathBuf::from(String::from_utf16_lossy(&buffer[..len])))
}

#[derive(Debug)]
pub(crate) struct ThemeResources {
    pub(crate) config: ThemeConfig,
    pub(crate) menubar_bg_brush: HBRUSH,
    menuitem_bg_brush: HBRUSH,
    menuitem_bg_hot_brush: HBRUSH,
    menuitem_bg_selected_brush: HBRUSH,
}

// SAFETY: GDI brush handles are process-wide and may be used from any thread.
// The brushes are created once and never mutated or deleted afterwards.
unsafe impl Send for ThemeResources {}
unsafe impl Sync for ThemeResources {}

impl ThemeResources {
    fn new(config: ThemeConfig) -> Self {
        let brush = |key| unsafe { CreateSolidBrush(color_to_colorref(config.color(key))) };
        ThemeResources {
            menubar_bg_brush: brush(ThemeKey::MenuBarBackground),
            menuitem_bg_brush: brush(ThemeKey::MenuItemBackground),
            menuitem_bg_hot_brush: brush(ThemeKey::MenuItemBackgroundHot),
            menuitem_bg_selected_brush: brush(ThemeKey::MenuItemBackgroundSelected),
            config,
        }
    }

    pub(crate) fn colorref(&self, key: ThemeKey) -> COLORREF {
        color_to_colorref(self.config.color(key))
    }

    pub(crate) fn item_brush(&self, background: MenuItemBackground) -> HBRUSH {
        match background {
            MenuItemBackground::Normal => self.menuitem_bg_brush,
            MenuItemBackground::Hot => self.menuitem_bg_hot_brush,
            MenuItemBackground::Selected => self.menuitem_bg_selected_brush,
        }
    }

    pub(crate) fn item_text_color(&self, text: MenuItemText) -> COLORREF {
        match text {
            MenuItemText::Normal => self.colorref(ThemeKey::MenuBarText),
            MenuItemText::Disabled => self.colorref(ThemeKey::MenuBarTextDisabled),
        }
    }
}

fn load_config() -> ThemeConfig {
    let loaded = module_path().and_then(|path| load_or_create(&config_path_for_module(&path)));
    match loaded {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ThemeResources: using the built-in palette: {err}");
            ThemeConfig::default()
        }
    }
}

/// The palette and brushes, loaded on first use.
pub(crate) fn theme() -> &'static ThemeResources {
    THEME.get_or_init(|| {
        let resources = ThemeResources::new(load_config());
        log::debug!("ThemeResources: palette ready: {:?}", resources.config);
        resources
    })
}
