//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// Generate a vendor entry name (import path element)
    pub fn vendor_entry_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_.-]{0,15}"
    }

    /// Generate a set of distinct vendor entry names
    pub fn vendor_entries() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(vendor_entry_name(), 0..12)
    }

    /// Generate a single command token (no whitespace, no separator)
    pub fn command_token() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_./=-]{1,12}"
    }

    /// Generate a command as a program followed by arguments
    pub fn command_tokens() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(command_token(), 1..5)
    }

    /// Generate an absolute directory path
    pub fn absolute_dir() -> impl Strategy<Value = String> {
        "(/[a-z0-9_-]{1,10}){1,4}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_command_token_generator(token in command_token()) {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.contains(char::is_whitespace));
            prop_assert!(!token.contains(','));
        }

        #[test]
        fn test_vendor_entry_name_generator(name in vendor_entry_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(!name.contains('/'));
        }

        #[test]
        fn test_absolute_dir_generator(dir in absolute_dir()) {
            prop_assert!(dir.starts_with('/'));
            prop_assert!(!dir.contains(':'));
        }
    }
}
