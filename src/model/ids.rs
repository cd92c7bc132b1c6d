//! Typed identifiers, one per stored kind.
//!
//! Ids are opaque strings assigned by the store (`food_1`, `topping_3`, ...). Keeping
//! a distinct type per kind stops a `ToppingId` from being passed where a
//! `FillingId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<u32> for $name {
            fn from(seq: u32) -> Self {
                Self(format!(concat!($prefix, "_{}"), seq))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self(raw.to_string())
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

define_id!(FoodId, "food");
define_id!(ToppingId, "topping");
define_id!(FillingId, "filling");
define_id!(OrderId, "order");
define_id!(
    /// Identifies both stored users and the acting principal supplied by auth.
    UserId,
    "user"
);
define_id!(AddressId, "address");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_carry_kind_prefix() {
        assert_eq!(FoodId::from(1).to_string(), "food_1");
        assert_eq!(ToppingId::from(12).as_str(), "topping_12");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&FillingId::from(3)).unwrap();
        assert_eq!(json, "\"filling_3\"");
        let back: FillingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FillingId::from("filling_3"));
    }
}
