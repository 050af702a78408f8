//! Fixed option enumerations for the global (base) configuration fields.
//!
//! Every base field draws its value from one of the enums below. Each option
//! has a stable identifier (used in share tokens, JSON and the CLI) and a
//! display name for the UI.

use serde::{Deserialize, Serialize};

/// Declares an option enum with stable ids, display names and lookup helpers.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($id:literal, $label:literal)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $id)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable identifier used in share tokens, JSON and the CLI.
            #[must_use]
            pub const fn id(&self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)+
                }
            }

            /// Human-readable option name.
            #[must_use]
            pub const fn display_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Looks up an option by its identifier.
            #[must_use]
            pub fn from_id(id: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|option| option.id() == id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

option_enum! {
    /// Physical keyboard layout the configuration targets.
    LayoutKind {
        /// 60% layout
        Sixty => ("sixty", "60%"),
        /// 65% layout with arrow cluster
        SixtyFive => ("sixty_five", "65%"),
        /// Tenkeyless layout
        Tkl => ("tkl", "TKL"),
        /// Full-size layout with numpad
        FullSize => ("full_size", "Full-size"),
    }
}

option_enum! {
    /// Case finish.
    CaseFinish {
        /// Polycarbonate case
        Poly => ("poly", "Polycarbonate"),
        /// Anodized aluminum case
        Aluminum => ("aluminum", "Aluminum"),
        /// Wooden case
        Wood => ("wood", "Wood"),
        /// Frosted acrylic case
        Acrylic => ("acrylic", "Acrylic"),
    }
}

option_enum! {
    /// Plate material.
    PlateMaterial {
        /// FR4 fiberglass plate
        Fr4 => ("fr4", "FR4"),
        /// Aluminum plate
        Aluminum => ("aluminum", "Aluminum"),
        /// Brass plate
        Brass => ("brass", "Brass"),
        /// Polycarbonate plate
        Polycarbonate => ("polycarbonate", "Polycarbonate"),
        /// POM plate
        Pom => ("pom", "POM"),
    }
}

option_enum! {
    /// Switch type.
    SwitchType {
        /// Linear switches
        Linear => ("linear", "Linear"),
        /// Tactile switches
        Tactile => ("tactile", "Tactile"),
        /// Clicky switches
        Clicky => ("clicky", "Clicky"),
        /// Silenced switches
        Silent => ("silent", "Silent"),
    }
}

option_enum! {
    /// Keycap profile.
    KeycapProfile {
        /// Cherry profile
        Cherry => ("cherry", "Cherry"),
        /// OEM profile
        Oem => ("oem", "OEM"),
        /// SA profile
        Sa => ("sa", "SA"),
        /// XDA profile
        Xda => ("xda", "XDA"),
    }
}

option_enum! {
    /// Keycap colorway; determines the default color of keys without overrides.
    Colorway {
        /// Beige alphas
        Classic => ("classic", "Classic"),
        /// Dark grey with orange accents
        Carbon => ("carbon", "Carbon"),
        /// Pink and cream
        Olivia => ("olivia", "Olivia"),
        /// Sage green
        Botanical => ("botanical", "Botanical"),
        /// Off-white
        Milk => ("milk", "Milk"),
    }
}

option_enum! {
    /// Legend style for a single keycap.
    LegendStyle {
        /// Legends printed on top
        Standard => ("standard", "Standard"),
        /// No legend
        Blank => ("blank", "Blank"),
        /// Legends printed on the front face
        Sideprint => ("sideprint", "Side-printed"),
        /// Icon legends
        Icon => ("icon", "Icon"),
    }
}

impl Colorway {
    /// Default keycap color for keys without a color override.
    #[must_use]
    pub const fn keycap_color(&self) -> super::RgbColor {
        match self {
            Self::Classic => super::RgbColor::new(0xF2, 0xEC, 0xDC),
            Self::Carbon => super::RgbColor::new(0x2E, 0x2E, 0x2E),
            Self::Olivia => super::RgbColor::new(0xE8, 0xC4, 0xB8),
            Self::Botanical => super::RgbColor::new(0x8A, 0xA3, 0x86),
            Self::Milk => super::RgbColor::new(0xFA, 0xF9, 0xF6),
        }
    }
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self::Standard
    }
}
