/*
 * Decides what the subclass procedure does with a message. Decoding happens in
 * two steps: the raw id becomes a `MessageKind` (unknown ids stop here and are
 * forwarded without even classifying the window), then the kind plus the
 * window's class tag select a `MessageRoute`. Every route other than `Forward`
 * is implemented by a handler in `controls`; `Forward` hands the message to the
 * next procedure in the subclass chain.
 */

use crate::window_class::WindowClassTag;
use log::trace;

pub(crate) const WM_PAINT: u32 = 0x000F;
pub(crate) const WM_ERASEBKGND: u32 = 0x0014;
pub(crate) const WM_DRAWITEM: u32 = 0x002B;
pub(crate) const WM_STYLECHANGING: u32 = 0x007C;
pub(crate) const WM_STYLECHANGED: u32 = 0x007D;
pub(crate) const WM_NCCREATE: u32 = 0x0081;
pub(crate) const WM_NCDESTROY: u32 = 0x0082;
pub(crate) const WM_NCPAINT: u32 = 0x0085;
pub(crate) const WM_NCACTIVATE: u32 = 0x0086;
pub(crate) const WM_CTLCOLOREDIT: u32 = 0x0133;
pub(crate) const WM_CTLCOLORLISTBOX: u32 = 0x0134;
pub(crate) const WM_CTLCOLORDLG: u32 = 0x0136;
pub(crate) const WM_CTLCOLORSCROLLBAR: u32 = 0x0137;
pub(crate) const WM_CTLCOLORSTATIC: u32 = 0x0138;
pub(crate) const WM_THEMECHANGED: u32 = 0x031A;

// Undocumented menu-bar ("UAH") messages sent to the window owning the bar.
pub(crate) const WM_UAHDRAWMENU: u32 = 0x0091;
pub(crate) const WM_UAHDRAWMENUITEM: u32 = 0x0092;
pub(crate) const WM_UAHMEASUREMENUITEM: u32 = 0x0094;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    CtlColorDialog,
    CtlColorEdit,
    CtlColorListBox,
    CtlColorScrollBar,
    CtlColorStatic,
    DrawItem,
    EraseBackground,
    NcActivate,
    NcPaint,
    NcCreate,
    NcDestroy,
    StyleChanging,
    StyleChanged,
    ThemeChanged,
    Paint,
    UahDrawMenu,
    UahDrawMenuItem,
    UahMeasureMenuItem,
}

impl MessageKind {
    pub(crate) fn from_id(msg: u32) -> Option<Self> {
        let kind = match msg {
            WM_CTLCOLORDLG => MessageKind::CtlColorDialog,
            WM_CTLCOLOREDIT => MessageKind::CtlColorEdit,
            WM_CTLCOLORLISTBOX => MessageKind::CtlColorListBox,
            WM_CTLCOLORSCROLLBAR => MessageKind::CtlColorScrollBar,
            WM_CTLCOLORSTATIC => MessageKind::CtlColorStatic,
            WM_DRAWITEM => MessageKind::DrawItem,
            WM_ERASEBKGND => MessageKind::EraseBackground,
            WM_NCACTIVATE => MessageKind::NcActivate,
            WM_NCPAINT => MessageKind::NcPaint,
            WM_NCCREATE => MessageKind::NcCreate,
            WM_NCDESTROY => MessageKind::NcDestroy,
            WM_STYLECHANGING => MessageKind::StyleChanging,
            WM_STYLECHANGED => MessageKind::StyleChanged,
            WM_THEMECHANGED => MessageKind::ThemeChanged,
            WM_PAINT => MessageKind::Paint,
            WM_UAHDRAWMENU => MessageKind::UahDrawMenu,
            WM_UAHDRAWMENUITEM => MessageKind::UahDrawMenuItem,
            WM_UAHMEASUREMENUITEM => MessageKind::UahMeasureMenuItem,
            _ => return None,
        };
        Some(kind)
    }
}

/// Common controls recolored through their own color-setting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NativeColorTarget {
    Tooltip,
    TreeView,
    ListView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageRoute {
    DialogBackground,
    TextColors,
    ComboListColors,
    OwnerDrawButton,
    EraseBackground,
    MenuBarBottomLine,
    CreationFixup,
    ReleaseSubclass,
    SwallowStyleChange,
    InvalidateMenuTheme,
    NativeColors(NativeColorTarget),
    DrawMenuBar,
    DrawMenuBarItem,
    MeasureMenuBarItem,
    Forward,
}

pub(crate) fn route(kind: MessageKind, tag: WindowClassTag) -> MessageRoute {
    let route = match (kind, tag) {
        (MessageKind::CtlColorDialog, _) => MessageRoute::DialogBackground,
        (
            MessageKind::CtlColorEdit | MessageKind::CtlColorScrollBar | MessageKind::CtlColorStatic,
            _,
        ) => MessageRoute::TextColors,
        (MessageKind::CtlColorListBox, WindowClassTag::ComboBox) => MessageRoute::ComboListColors,
        (MessageKind::DrawItem, _) => MessageRoute::OwnerDrawButton,
        (MessageKind::EraseBackground, _) => MessageRoute::EraseBackground,
        (MessageKind::NcActivate | MessageKind::NcPaint, tag) if tag.owns_menu_bar() => {
            MessageRoute::MenuBarBottomLine
        }
        (MessageKind::NcCreate, _) => MessageRoute::CreationFixup,
        (MessageKind::NcDestroy, _) => MessageRoute::ReleaseSubclass,
        (
            MessageKind::StyleChanging | MessageKind::StyleChanged,
            WindowClassTag::Container,
        ) => MessageRoute::SwallowStyleChange,
        (MessageKind::ThemeChanged, tag) if tag.owns_menu_bar() => {
            MessageRoute::InvalidateMenuTheme
        }
        (MessageKind::Paint, WindowClassTag::Tooltip) => {
            MessageRoute::NativeColors(NativeColorTarget::Tooltip)
        }
        (MessageKind::Paint, WindowClassTag::TreeView) => {
            MessageRoute::NativeColors(NativeColorTarget::TreeView)
        }
        (MessageKind::Paint, WindowClassTag::ListView) => {
            MessageRoute::NativeColors(NativeColorTarget::ListView)
        }
        (MessageKind::UahDrawMenu, tag) if tag.owns_menu_bar() => MessageRoute::DrawMenuBar,
        (MessageKind::UahDrawMenuItem, tag) if tag.owns_menu_bar() => {
            MessageRoute::DrawMenuBarItem
        }
        (MessageKind::UahMeasureMenuItem, tag) if !tag.owns_menu_bar() => {
            MessageRoute::MeasureMenuBarItem
        }
        _ => MessageRoute::Forward,
    };
    trace!("[Route] {kind:?} on {tag:?} -> {route:?}");
    route
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TAGS: [WindowClassTag; 8] = [
        WindowClassTag::Container,
        WindowClassTag::GenericDialog,
        WindowClassTag::Button,
        WindowClassTag::Tooltip,
        WindowClassTag::ComboBox,
        WindowClassTag::ListView,
        WindowClassTag::TreeView,
        WindowClassTag::Other,
    ];

    #[test]
    fn unknown_message_ids_are_not_decoded() {
        assert_eq!(MessageKind::from_id(0x0001), None); // WM_CREATE
        assert_eq!(MessageKind::from_id(0x0093), None); // WM_UAHINITMENU
        assert_eq!(MessageKind::from_id(0x0095), None);
    }

    #[test]
    fn ctlcolor_routes_apply_to_every_tag_except_listbox() {
        for tag in ALL_TAGS {
            assert_eq!(
                route(MessageKind::CtlColorDialog, tag),
                MessageRoute::DialogBackground
            );
            assert_eq!(route(MessageKind::CtlColorStatic, tag), MessageRoute::TextColors);
            assert_eq!(route(MessageKind::CtlColorEdit, tag), MessageRoute::TextColors);
            assert_eq!(
                route(MessageKind::CtlColorScrollBar, tag),
                MessageRoute::TextColors
            );
        }
        assert_eq!(
            route(MessageKind::CtlColorListBox, WindowClassTag::ComboBox),
            MessageRoute::ComboListColors
        );
        assert_eq!(
            route(MessageKind::CtlColorListBox, WindowClassTag::GenericDialog),
            MessageRoute::Forward
        );
    }

    #[test]
    fn menu_bar_messages_only_reach_menu_owners() {
        for tag in ALL_TAGS {
            let owner = tag.owns_menu_bar();
            let expect = |hit: MessageRoute| if owner { hit } else { MessageRoute::Forward };
            assert_eq!(route(MessageKind::UahDrawMenu, tag), expect(MessageRoute::DrawMenuBar));
            assert_eq!(
                route(MessageKind::UahDrawMenuItem, tag),
                expect(MessageRoute::DrawMenuBarItem)
            );
            assert_eq!(
                route(MessageKind::NcPaint, tag),
                expect(MessageRoute::MenuBarBottomLine)
            );
            assert_eq!(
                route(MessageKind::NcActivate, tag),
                expect(MessageRoute::MenuBarBottomLine)
            );
            assert_eq!(
                route(MessageKind::ThemeChanged, tag),
                expect(MessageRoute::InvalidateMenuTheme)
            );
        }
    }

    #[test]
    fn measure_hook_point_is_for_non_owners_only() {
        assert_eq!(
            route(MessageKind::UahMeasureMenuItem, WindowClassTag::Container),
            MessageRoute::Forward
        );
        assert_eq!(
            route(MessageKind::UahMeasureMenuItem, WindowClassTag::Button),
            MessageRoute::MeasureMenuBarItem
        );
    }

    #[test]
    fn final_destroy_releases_the_subclass_for_every_tag() {
        assert_eq!(MessageKind::from_id(0x0082), Some(MessageKind::NcDestroy));
        for tag in ALL_TAGS {
            assert_eq!(route(MessageKind::NcDestroy, tag), MessageRoute::ReleaseSubclass);
        }
    }

    #[test]
    fn style_changes_are_swallowed_only_for_the_container() {
        assert_eq!(
            route(MessageKind::StyleChanging, WindowClassTag::Container),
            MessageRoute::SwallowStyleChange
        );
        assert_eq!(
            route(MessageKind::StyleChanged, WindowClassTag::Container),
            MessageRoute::SwallowStyleChange
        );
        assert_eq!(
            route(MessageKind::StyleChanged, WindowClassTag::GenericDialog),
            MessageRoute::Forward
        );
    }

    #[test]
    fn paint_recolors_only_native_color_controls() {
        assert_eq!(
            route(MessageKind::Paint, WindowClassTag::Tooltip),
            MessageRoute::NativeColors(NativeColorTarget::Tooltip)
        );
        assert_eq!(
            route(MessageKind::Paint, WindowClassTag::TreeView),
            MessageRoute::NativeColors(NativeColorTarget::TreeView)
        );
        assert_eq!(
            route(MessageKind::Paint, WindowClassTag::ListView),
            MessageRoute::NativeColors(NativeColorTarget::ListView)
        );
        assert_eq!(route(MessageKind::Paint, WindowClassTag::Button), MessageRoute::Forward);
        assert_eq!(route(MessageKind::Paint, WindowClassTag::Container), MessageRoute::Forward);
    }

    #[test]
    fn creation_and_erase_apply_to_every_tag() {
        for tag in ALL_TAGS {
            assert_eq!(route(MessageKind::NcCreate, tag), MessageRoute::CreationFixup);
            assert_eq!(
                route(MessageKind::EraseBackground, tag),
                MessageRoute::EraseBackground
            );
            assert_eq!(route(MessageKind::DrawItem, tag), MessageRoute::OwnerDrawButton);
        }
    }
}
