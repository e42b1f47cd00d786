//! Trip enum types and parsers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Parse error shared by the trip enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {input}")]
pub struct ParseTripEnumError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub input: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Canonical lowercase representation used on the wire and in storage.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseTripEnumError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(ParseTripEnumError {
                        kind: $kind,
                        input: value.to_owned(),
                    }),
                }
            }
        }
    };
}

string_enum! {
    /// Who can see a trip.
    ///
    /// Only `Public` trips appear in public queries. `Unlisted` trips are
    /// readable by their owner and excluded from every public surface.
    #[derive(Default)]
    Visibility, "visibility" {
        #[default]
        /// Owner only.
        Private => "private",
        /// Hidden from public listings.
        Unlisted => "unlisted",
        /// Listed, likeable and clonable.
        Public => "public",
    }
}

string_enum! {
    /// Planning lifecycle tag.
    #[derive(Default)]
    TripStatus, "trip status" {
        #[default]
        /// Being put together.
        Planning => "planning",
        /// Underway.
        Active => "active",
        /// Finished.
        Completed => "completed",
        /// Shelved by the owner.
        Archived => "archived",
    }
}

string_enum! {
    /// Section of a day an activity belongs to.
    ///
    /// Declaration order is the rank used when ordering activities.
    TimeOfDay, "time of day" {
        /// Morning.
        Start => "start",
        /// Middle of the day.
        Mid => "mid",
        /// Evening.
        End => "end",
    }
}
