//! Identifier management using string interning for efficient storage and comparison.
//!
//! This module provides the [`Id`] type with an efficient string-interner based
//! approach. Identifiers appear many times across a graph (edge endpoints,
//! cluster membership lists), so comparisons are symbol comparisons rather
//! than string comparisons.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Efficient identifier type using string interning.
///
/// Node ids and cluster ids are `Id`s. Two `Id`s created from the same
/// string are equal, and equality is a symbol comparison.
///
/// # Examples
///
/// ```
/// use drafter_core::identifier::Id;
///
/// let web = Id::new("web_server");
/// let db = Id::new("database");
///
/// assert_ne!(web, db);
/// assert_eq!(web, Id::new("web_server"));
/// assert_eq!(web.to_string(), "web_server");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        let mut interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Resolves the identifier back to its string representation.
    pub fn resolve(&self) -> String {
        let interner = INTERNER
            .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
            .lock()
            .expect("Failed to acquire interner lock");
        interner
            .resolve(self.0)
            .expect("Id symbol should exist in interner")
            .to_owned()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.resolve() == *other
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Id::new(name)
    }
}

// Ids cross the interchange boundary as plain strings.
impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Id::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_equality() {
        let a = Id::new("alpha");
        let b = Id::new("alpha");
        let c = Id::new("beta");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_resolve_round_trip() {
        let id = Id::new("user_service");
        assert_eq!(id.resolve(), "user_service");
        assert_eq!(id.to_string(), "user_service");
    }

    #[test]
    fn test_id_str_comparison() {
        let id = Id::new("cache");
        assert_eq!(id, "cache");
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn prop_intern_round_trips(name in "[a-z0-9_]{1,24}") {
                let id = Id::new(&name);
                prop_assert_eq!(id.resolve(), name);
            }

            #[test]
            fn prop_equal_strings_intern_to_equal_ids(name in "[a-z0-9_]{1,24}") {
                prop_assert_eq!(Id::new(&name), Id::new(&name));
            }
        }
    }

    #[test]
    fn test_id_serde_as_string() {
        let id = Id::new("load_balancer");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"load_balancer\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
