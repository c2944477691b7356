//! Symbol range expansion.
//!
//! Symbol specifications are compact lists of characters and ranges:
//!
//! - `a-z` - every character from `a` to `z` inclusive
//! - `0-1, _` - commas and whitespace both separate tokens
//! - `abc` - a token without a range dash contributes each of its characters
//!
//! A range token is exactly three characters with `-` in the middle, so
//! `+--` is the range from `+` to `-` while `ab-c` is four literal symbols.

use crate::error::CoreError;
use std::collections::BTreeSet;

/// A set of symbols with deterministic iteration order.
pub type SymbolSet = BTreeSet<char>;

/// Expands a symbol specification into the set of symbols it denotes.
///
/// Empty input yields an empty set; callers decide whether that is acceptable.
pub fn expand(spec: &str) -> Result<SymbolSet, CoreError> {
    let mut symbols = SymbolSet::new();

    for token in tokens(spec) {
        match parse_range(token) {
            Some((start, end)) => {
                if start > end {
                    return Err(CoreError::InvalidRange {
                        token: token.to_string(),
                        start,
                        end,
                    });
                }
                symbols.extend(start..=end);
            }
            None => symbols.extend(token.chars()),
        }
    }

    Ok(symbols)
}

/// Splits a specification on commas and whitespace, dropping empty tokens.
pub fn tokens(spec: &str) -> impl Iterator<Item = &str> {
    spec.split(is_separator)
        .filter(|t| !t.is_empty())
}

/// Writes a symbol set back as specification tokens.
///
/// Runs of three or more consecutive characters become `start-end` ranges,
/// everything else is listed one symbol per token. Expanding the joined
/// tokens yields the original set as long as it holds no separators.
pub fn compact(symbols: &SymbolSet) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut iter = symbols.iter().copied().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while let Some(&next) = iter.peek() {
            if u32::from(next) != u32::from(end) + 1 {
                break;
            }
            end = next;
            iter.next();
        }

        let len = u32::from(end) - u32::from(start) + 1;
        if len >= 3 {
            tokens.push(format!("{}-{}", start, end));
        } else {
            tokens.extend((start..=end).map(String::from));
        }
    }

    tokens
}

/// Returns true if the symbol cannot appear in a specification.
pub fn is_separator(symbol: char) -> bool {
    symbol == ',' || symbol.is_whitespace()
}

/// Returns the bounds of a `start-end` token, or `None` for a literal token.
fn parse_range(token: &str) -> Option<(char, char)> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some(start), Some('-'), Some(end), None) => Some((start, end)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(s: &str) -> SymbolSet {
        s.chars().collect()
    }

    #[test]
    fn test_lowercase_range() {
        let symbols = expand("a-z").unwrap();
        assert_eq!(symbols.len(), 26);
        assert_eq!(symbols, set("abcdefghijklmnopqrstuvwxyz"));
    }

    #[test]
    fn test_inverted_range() {
        let result = expand("z-a");
        assert!(matches!(
            result,
            Err(CoreError::InvalidRange {
                start: 'z',
                end: 'a',
                ..
            })
        ));
    }

    #[test]
    fn test_mixed_separators() {
        assert_eq!(expand("a,b c").unwrap(), set("abc"));
        assert_eq!(expand(" a ,, b\tc ").unwrap(), set("abc"));
    }

    #[test]
    fn test_literal_run() {
        // No dash in the middle: every character is a symbol of its own.
        assert_eq!(expand("abc").unwrap(), set("abc"));
        assert_eq!(expand("ab-c").unwrap(), set("abc-"));
        assert_eq!(expand("-").unwrap(), set("-"));
    }

    #[test]
    fn test_single_symbol_range() {
        assert_eq!(expand("x-x").unwrap(), set("x"));
        assert_eq!(expand("---").unwrap(), set("-"));
    }

    #[test]
    fn test_ranges_and_literals_union() {
        let symbols = expand("0-9, a-f _").unwrap();
        assert_eq!(symbols.len(), 17);
        assert!(symbols.contains(&'_'));
        assert!(symbols.contains(&'9'));
        assert!(!symbols.contains(&'g'));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(expand("a-c b abc").unwrap(), set("abc"));
    }

    #[test]
    fn test_empty_input() {
        assert!(expand("").unwrap().is_empty());
        assert!(expand(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_range() {
        assert_eq!(expand("α-γ").unwrap(), set("αβγ"));
    }

    #[test]
    fn test_compact_runs() {
        let symbols = expand("a-z 0-9 _ x").unwrap();
        assert_eq!(compact(&symbols), vec!["0-9", "_", "a-z"]);

        assert_eq!(compact(&set("ab")), vec!["a", "b"]);
        assert_eq!(compact(&set("abcx")), vec!["a-c", "x"]);
        assert!(compact(&SymbolSet::new()).is_empty());
    }

    #[test]
    fn test_compact_expands_back() {
        let symbols = expand("+-- 0-4 7 9 A-C q").unwrap();
        let tokens = compact(&symbols);
        assert_eq!(expand(&tokens.join(",")).unwrap(), symbols);
    }

    fn token_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (proptest::char::range('.', '~'), proptest::char::range('.', '~')).prop_map(
                |(a, b)| {
                    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                    format!("{}-{}", lo, hi)
                }
            ),
            "[a-zA-Z0-9_]{1,4}",
        ]
    }

    proptest! {
        #[test]
        fn prop_order_independent(
            tokens in proptest::collection::vec(token_strategy(), 0..8),
            seed in any::<u64>(),
        ) {
            let forward = expand(&tokens.join(",")).unwrap();

            let mut shuffled = tokens.clone();
            let len = shuffled.len();
            if len > 1 {
                shuffled.rotate_left((seed as usize) % len);
                shuffled.reverse();
            }
            let permuted = expand(&shuffled.join(" ")).unwrap();

            prop_assert_eq!(forward, permuted);
        }
    }
}
