//! Anchor slug derivation for heading text

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest slug ever produced, in characters
const MAX_SLUG_CHARS: usize = 50;

/// Characters that never survive slugification. `\w` is Unicode-aware in
/// the regex crate, so Korean and other non-Latin scripts are kept.
static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid slug strip pattern"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid hyphen pattern"));

/// Derive a URL/anchor-safe identifier from heading text.
///
/// Lowercases, strips everything outside word characters and whitespace,
/// collapses whitespace runs to single hyphens, collapses repeated hyphens,
/// trims leading/trailing hyphens and caps the result at 50 characters.
/// Deterministic: the same input always yields the same slug.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(stripped.trim(), "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    let capped: String = collapsed.trim_matches('-').chars().take(MAX_SLUG_CHARS).collect();
    capped.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_heading() {
        assert_eq!(slugify("Engine Tuning Basics"), "engine-tuning-basics");
    }

    #[test]
    fn test_korean_text_survives() {
        assert_eq!(slugify("엔진 튜닝 기초"), "엔진-튜닝-기초");
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(slugify("Why? Because: it's fast!"), "why-because-its-fast");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(slugify("  spaced \t out  "), "spaced-out");
    }

    #[test]
    fn test_deterministic() {
        let input = "브레이크 패드 교체 (상급)";
        assert_eq!(slugify(input), slugify(input));
    }

    #[test]
    fn test_caps_at_fifty_chars() {
        let long = "a".repeat(80);
        assert_eq!(slugify(&long).chars().count(), 50);
    }

    #[test]
    fn test_cap_does_not_leave_trailing_hyphen() {
        // 50th char lands on the hyphen between words
        let input = format!("{} {}", "a".repeat(49), "tail");
        let slug = slugify(&input);
        assert_eq!(slug, "a".repeat(49));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }
}
