/*
 * Pure drawing decisions taken by the control handlers: which brush and text
 * color a menu bar item gets for a given owner-draw state, whether a window's
 * background is pre-filled on WM_ERASEBKGND, and which one-time fix-up a
 * freshly created control receives. Keeping these free of Win32 calls lets the
 * precedence rules be tested directly.
 */

use crate::window_class::WindowClassTag;

// Owner-draw item state bits (`ODS_*`).
pub(crate) const ODS_SELECTED: u32 = 0x0001;
pub(crate) const ODS_GRAYED: u32 = 0x0002;
pub(crate) const ODS_DISABLED: u32 = 0x0004;
pub(crate) const ODS_FOCUS: u32 = 0x0010;
pub(crate) const ODS_HOTLIGHT: u32 = 0x0040;
pub(crate) const ODS_NOACCEL: u32 = 0x0100;

// Button styles (`BS_*`).
pub(crate) const BS_PUSHBUTTON: u32 = 0x0000;
pub(crate) const BS_CHECKBOX: u32 = 0x0002;
pub(crate) const BS_AUTOCHECKBOX: u32 = 0x0003;
pub(crate) const BS_GROUPBOX: u32 = 0x0007;
pub(crate) const BS_AUTORADIOBUTTON: u32 = 0x0009;
pub(crate) const BS_OWNERDRAW: u32 = 0x000B;
pub(crate) const BS_TYPEMASK: u32 = 0x000F;
pub(crate) const BS_LEFT: u32 = 0x0100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuItemBackground {
    Normal,
    Hot,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuItemText {
    Normal,
    Disabled,
}

/// How one top-level menu bar item is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MenuItemVisual {
    pub(crate) background: MenuItemBackground,
    pub(crate) text: MenuItemText,
    pub(crate) hide_prefix: bool,
}

impl MenuItemVisual {
    /*
     * Precedence: selected beats hot for the background; grayed/disabled wins
     * the text color whatever else is set, but leaves the background alone.
     * Inactive/default items render like plain ones.
     */
    pub(crate) fn from_item_state(item_state: u32) -> Self {
        let background = if item_state & ODS_SELECTED != 0 {
            MenuItemBackground::Selected
        } else if item_state & ODS_HOTLIGHT != 0 {
            MenuItemBackground::Hot
        } else {
            // ODS_INACTIVE / ODS_DEFAULT / nothing
            MenuItemBackground::Normal
        };
        let text = if item_state & (ODS_GRAYED | ODS_DISABLED) != 0 {
            MenuItemText::Disabled
        } else {
            MenuItemText::Normal
        };
        MenuItemVisual {
            background,
            text,
            hide_prefix: item_state & ODS_NOACCEL != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErasePolicy {
    FillClientRect,
    Forward,
}

/// Group boxes paint their own frame and must not be pre-filled.
pub(crate) fn erase_policy(tag: WindowClassTag, style: u32) -> ErasePolicy {
    if tag == WindowClassTag::Button && style & BS_TYPEMASK == BS_GROUPBOX {
        ErasePolicy::Forward
    } else {
        ErasePolicy::FillClientRect
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CreationFixup {
    None,
    /// Replace the visual style with a bogus one so the classic renderer runs
    /// and our color messages are honored.
    NeutralizeVisualStyle,
    /// OR `BS_OWNERDRAW` into the style; WM_DRAWITEM paints the button.
    AddOwnerDraw { new_style: u32 },
}

pub(crate) fn creation_fixup(tag: WindowClassTag, style: u32) -> CreationFixup {
    match tag {
        WindowClassTag::Tooltip | WindowClassTag::ComboBox => CreationFixup::NeutralizeVisualStyle,
        WindowClassTag::Button => match style & 0xFFFF {
            BS_CHECKBOX | BS_AUTOCHECKBOX | BS_GROUPBOX | BS_AUTORADIOBUTTON => {
                CreationFixup::NeutralizeVisualStyle
            }
            BS_PUSHBUTTON | BS_LEFT => CreationFixup::AddOwnerDraw {
                new_style: style | BS_OWNERDRAW,
            },
            _ => CreationFixup::None,
        },
        _ => CreationFixup::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ODS_DEFAULT: u32 = 0x0020;
    const ODS_INACTIVE: u32 = 0x0080;

    #[test]
    fn disabled_text_wins_over_hot_and_selected() {
        let visual =
            MenuItemVisual::from_item_state(ODS_GRAYED | ODS_HOTLIGHT | ODS_SELECTED);
        assert_eq!(visual.text, MenuItemText::Disabled);
        assert_eq!(visual.background, MenuItemBackground::Selected);

        let visual = MenuItemVisual::from_item_state(ODS_DISABLED | ODS_HOTLIGHT);
        assert_eq!(visual.text, MenuItemText::Disabled);
        assert_eq!(visual.background, MenuItemBackground::Hot);
    }

    #[test]
    fn selected_beats_hot_beats_normal() {
        assert_eq!(
            MenuItemVisual::from_item_state(ODS_HOTLIGHT | ODS_SELECTED).background,
            MenuItemBackground::Selected
        );
        assert_eq!(
            MenuItemVisual::from_item_state(ODS_HOTLIGHT).background,
            MenuItemBackground::Hot
        );
        let plain = MenuItemVisual::from_item_state(ODS_INACTIVE | ODS_DEFAULT);
        assert_eq!(plain.background, MenuItemBackground::Normal);
        assert_eq!(plain.text, MenuItemText::Normal);
        assert!(!plain.hide_prefix);
    }

    #[test]
    fn noaccel_hides_the_prefix() {
        assert!(MenuItemVisual::from_item_state(ODS_NOACCEL | ODS_FOCUS).hide_prefix);
    }

    #[test]
    fn group_box_is_not_prefilled() {
        assert_eq!(
            erase_policy(WindowClassTag::Button, 0x5000_0000 | BS_GROUPBOX),
            ErasePolicy::Forward
        );
    }

    #[test]
    fn other_button_styles_are_prefilled() {
        for style in [BS_PUSHBUTTON, BS_CHECKBOX, BS_AUTORADIOBUTTON, BS_OWNERDRAW, BS_LEFT] {
            assert_eq!(
                erase_policy(WindowClassTag::Button, 0x5000_0000 | style),
                ErasePolicy::FillClientRect
            );
        }
        assert_eq!(
            erase_policy(WindowClassTag::GenericDialog, BS_GROUPBOX),
            ErasePolicy::FillClientRect
        );
    }

    #[test]
    fn push_buttons_become_owner_drawn() {
        let style = 0x5001_0000 | BS_PUSHBUTTON;
        assert_eq!(
            creation_fixup(WindowClassTag::Button, style),
            CreationFixup::AddOwnerDraw {
                new_style: style | BS_OWNERDRAW
            }
        );
        assert!(matches!(
            creation_fixup(WindowClassTag::Button, BS_LEFT),
            CreationFixup::AddOwnerDraw { .. }
        ));
    }

    #[test]
    fn check_radio_and_group_buttons_lose_their_visual_style() {
        for style in [BS_CHECKBOX, BS_AUTOCHECKBOX, BS_GROUPBOX, BS_AUTORADIOBUTTON] {
            assert_eq!(
                creation_fixup(WindowClassTag::Button, style),
                CreationFixup::NeutralizeVisualStyle
            );
        }
        assert_eq!(
            creation_fixup(WindowClassTag::Tooltip, 0),
            CreationFixup::NeutralizeVisualStyle
        );
        assert_eq!(
            creation_fixup(WindowClassTag::ComboBox, 0),
            CreationFixup::NeutralizeVisualStyle
        );
    }

    #[test]
    fn other_windows_get_no_fixup() {
        assert_eq!(creation_fixup(WindowClassTag::Button, BS_OWNERDRAW), CreationFixup::None);
        assert_eq!(creation_fixup(WindowClassTag::Container, 0), CreationFixup::None);
        assert_eq!(creation_fixup(WindowClassTag::ListView, 0), CreationFixup::None);
    }
}
