//! Hook name derivation.
//!
//! Transition names are snake- or kebab-cased identifiers; hook names are
//! derived by studly-casing the transition and prefixing the lifecycle
//! position: `start_review` becomes `beforeStartReview` / `afterStartReview`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle position of a hook relative to the state mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookPosition {
    /// Runs before the state is written; may veto the transition.
    Before,
    /// Runs after the state is written; cannot roll it back.
    After,
}

impl HookPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl fmt::Display for HookPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert a transition name to studly case.
///
/// `-` and `_` are word boundaries; the first character of each word is
/// uppercased and the words are concatenated.
///
/// ```rust
/// use trellis::studly_case;
///
/// assert_eq!(studly_case("start_review"), "StartReview");
/// assert_eq!(studly_case("go-live"), "GoLive");
/// assert_eq!(studly_case("noop"), "Noop");
/// ```
pub fn studly_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Derive the registry key for a hook at `position` on `transition`.
pub fn hook_name(position: HookPosition, transition: &str) -> String {
    format!("{}{}", position.as_str(), studly_case(transition))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studly_case_splits_on_underscore() {
        assert_eq!(studly_case("start_review"), "StartReview");
    }

    #[test]
    fn studly_case_splits_on_hyphen() {
        assert_eq!(studly_case("go-live"), "GoLive");
    }

    #[test]
    fn studly_case_single_word() {
        assert_eq!(studly_case("noop"), "Noop");
    }

    #[test]
    fn studly_case_ignores_empty_segments() {
        assert_eq!(studly_case("__start__review__"), "StartReview");
        assert_eq!(studly_case(""), "");
    }

    #[test]
    fn studly_case_preserves_inner_casing() {
        assert_eq!(studly_case("parseJSON_body"), "ParseJSONBody");
    }

    #[test]
    fn hook_name_combines_position_and_transition() {
        assert_eq!(hook_name(HookPosition::Before, "start_review"), "beforeStartReview");
        assert_eq!(hook_name(HookPosition::After, "go-live"), "afterGoLive");
    }

    #[test]
    fn position_serializes_lowercase() {
        let json = serde_json::to_string(&HookPosition::Before).unwrap();
        assert_eq!(json, "\"before\"");
        let back: HookPosition = serde_json::from_str("\"after\"").unwrap();
        assert_eq!(back, HookPosition::After);
    }
}
