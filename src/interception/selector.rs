// src/interception/selector.rs
//! Target selection
//!
//! Decides whether an identifier is subject to interception. Matching is an
//! exact, case-sensitive comparison; the `*` token selects everything.

use serde::{Deserialize, Serialize};

/// Token selecting every identifier
pub const WILDCARD: &str = "*";

/// One identifier or an ordered list of identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Targets {
    /// Flatten into an ordered list of identifiers
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Targets::One(target) => vec![target],
            Targets::Many(targets) => targets,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Targets::One(target) => std::slice::from_ref(target),
            Targets::Many(targets) => targets,
        };
        slice.iter().map(String::as_str)
    }
}

impl From<&str> for Targets {
    fn from(target: &str) -> Self {
        Targets::One(target.to_string())
    }
}

impl From<String> for Targets {
    fn from(target: String) -> Self {
        Targets::One(target)
    }
}

impl From<Vec<String>> for Targets {
    fn from(targets: Vec<String>) -> Self {
        Targets::Many(targets)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(targets: Vec<&str>) -> Self {
        Targets::Many(targets.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Targets {
    fn from(targets: &[&str]) -> Self {
        Targets::Many(targets.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(targets: [&str; N]) -> Self {
        Targets::Many(targets.iter().map(|t| t.to_string()).collect())
    }
}

/// The set of identifiers eligible for interception during a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    targets: Vec<String>,
}

impl Selection {
    /// Build a selection; `None` if there are no targets
    pub fn new(targets: impl Into<Targets>) -> Option<Self> {
        let targets = targets.into().into_vec();
        if targets.is_empty() {
            None
        } else {
            Some(Self { targets })
        }
    }

    /// Selection matching every identifier
    pub fn all() -> Self {
        Self {
            targets: vec![WILDCARD.to_string()],
        }
    }

    /// Whether `id` is subject to interception
    pub fn matches(&self, id: &str) -> bool {
        self.targets.iter().any(|t| t == WILDCARD || t == id)
    }

    pub fn is_wildcard(&self) -> bool {
        self.targets.iter().any(|t| t == WILDCARD)
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_match() {
        let selection = Selection::new(["http", "https"]).unwrap();

        assert!(selection.matches("http"));
        assert!(selection.matches("https"));
        assert!(!selection.matches("net"));
    }

    #[test]
    fn test_no_prefix_or_case_folding() {
        let selection = Selection::new("http").unwrap();

        assert!(!selection.matches("https"));
        assert!(!selection.matches("htt"));
        assert!(!selection.matches("HTTP"));
    }

    #[test]
    fn test_wildcard_inside_list() {
        let selection = Selection::new(vec!["net", "*"]).unwrap();
        assert!(selection.is_wildcard());
        assert!(selection.matches("anything/at/all"));
    }

    #[test]
    fn test_empty_selection_rejected() {
        assert!(Selection::new(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_targets_from_json() {
        let one: Targets = serde_json::from_str(r#""net""#).unwrap();
        let many: Targets = serde_json::from_str(r#"["http","https"]"#).unwrap();

        assert_eq!(one, Targets::One("net".to_string()));
        assert_eq!(many.iter().collect::<Vec<_>>(), vec!["http", "https"]);
    }

    proptest! {
        #[test]
        fn prop_wildcard_matches_everything(id in ".*") {
            prop_assert!(Selection::all().matches(&id));
        }

        #[test]
        fn prop_matches_iff_listed(
            targets in proptest::collection::vec("[a-z]{1,8}", 1..6),
            id in "[a-z]{1,8}",
        ) {
            let selection = Selection::new(targets.clone()).unwrap();
            prop_assert_eq!(selection.matches(&id), targets.contains(&id));
        }
    }
}
