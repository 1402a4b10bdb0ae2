//! Closed enumerations backing menu-driven form fields.

/// A value chosen from a fixed menu of labels.
pub trait MenuValue: Copy + Sized + 'static {
    /// Every menu entry, in display order.
    fn options() -> &'static [Self];
    /// Stable label shown in the menu and persisted in storage.
    fn as_str(self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::options()
            .iter()
            .copied()
            .find(|option| option.as_str() == value)
    }
}

/// Declares a menu enumeration with its display labels.
macro_rules! closed_menu {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $crate::model::menu::MenuValue for $name {
            fn options() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::model::menu::MenuValue::as_str(*self))
            }
        }
    };
}

closed_menu! {
    /// Sex of an animal, shared by patients and boarders.
    pub enum Gender {
        Female => "Female",
        Male => "Male",
    }
}

#[cfg(test)]
mod tests {
    use super::{Gender, MenuValue};

    #[test]
    fn labels_round_trip_through_parse() {
        for option in Gender::options() {
            assert_eq!(Gender::parse(option.as_str()), Some(*option));
        }
        assert_eq!(Gender::parse("female"), None);
    }

    #[test]
    fn serde_uses_menu_labels() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"Female\"");
    }
}
