// SPDX-License-Identifier: MPL-2.0
//! Identifier newtypes.
//!
//! Catalog identifiers are opaque strings. Wrapping them keeps a sphere id
//! from being passed where a marker id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Identifies a layer (a named group of spheres).
    LayerId
);
string_id!(
    /// Identifies a single panoramic sphere.
    SphereId
);
string_id!(
    /// Identifies a point of interest placed on a sphere.
    MarkerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_deserialize_from_plain_strings() {
        let id: LayerId = serde_json::from_str("\"floor-1\"").unwrap();
        assert_eq!(id.as_str(), "floor-1");
    }

    #[test]
    fn ids_display_raw_value() {
        assert_eq!(MarkerId::new("m-7").to_string(), "m-7");
    }
}
