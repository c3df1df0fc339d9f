/*
 * Maps a window's OS class name onto the small closed set of classes the shim
 * themes. The tag is never stored; callers recompute it from the handle when a
 * message needs it.
 */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowClassTag {
    /// Unity's top-level container window (owns the main menu bar).
    Container,
    /// Standard dialog class `#32770`.
    GenericDialog,
    Button,
    Tooltip,
    ComboBox,
    ListView,
    TreeView,
    Other,
}

const CLASS_TABLE: [(&str, WindowClassTag); 7] = [
    ("UnityContainerWndClass", WindowClassTag::Container),
    ("#32770", WindowClassTag::GenericDialog),
    ("Button", WindowClassTag::Button),
    ("tooltips_class32", WindowClassTag::Tooltip),
    ("ComboBox", WindowClassTag::ComboBox),
    ("SysListView32", WindowClassTag::ListView),
    ("SysTreeView32", WindowClassTag::TreeView),
];

impl WindowClassTag {
    pub fn is_themed(self) -> bool {
        self != WindowClassTag::Other
    }

    /// Windows whose non-client area carries the menu bar we repaint.
    pub fn owns_menu_bar(self) -> bool {
        matches!(self, WindowClassTag::Container | WindowClassTag::GenericDialog)
    }

    #[cfg(test)]
    pub fn class_name(self) -> Option<&'static str> {
        CLASS_TABLE
            .iter()
            .find_map(|(name, tag)| (*tag == self).then_some(*name))
    }
}

pub fn classify_class_name(class_name: &str) -> WindowClassTag {
    CLASS_TABLE
        .iter()
        .find_map(|(name, tag)| name.eq_ignore_ascii_case(class_name).then_some(*tag))
        .unwrap_or(WindowClassTag::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_class_maps_regardless_of_case() {
        for (name, tag) in CLASS_TABLE {
            assert_eq!(classify_class_name(name), tag);
            assert_eq!(classify_class_name(&name.to_ascii_uppercase()), tag);
            assert_eq!(classify_class_name(&name.to_ascii_lowercase()), tag);
        }
        assert_eq!(classify_class_name("button"), WindowClassTag::Button);
        assert_eq!(classify_class_name("BUTTON"), WindowClassTag::Button);
    }

    #[test]
    fn unknown_classes_are_other() {
        for name in ["", "Edit", "Static", "UnityContainerWndClass2", "ComboBoxEx32", "#32768"] {
            assert_eq!(classify_class_name(name), WindowClassTag::Other);
        }
        assert!(!WindowClassTag::Other.is_themed());
    }

    #[test]
    fn only_container_and_dialog_own_a_menu_bar() {
        let owners: Vec<_> = CLASS_TABLE
            .iter()
            .map(|(_, tag)| *tag)
            .filter(|tag| tag.owns_menu_bar())
            .collect();
        assert_eq!(
            owners,
            vec![WindowClassTag::Container, WindowClassTag::GenericDialog]
        );
    }

    #[test]
    fn class_name_round_trips_through_classifier() {
        assert_eq!(WindowClassTag::Tooltip.class_name(), Some("tooltips_class32"));
        assert_eq!(WindowClassTag::Other.class_name(), None);
    }
}
