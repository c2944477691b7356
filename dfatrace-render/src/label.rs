//! Compact edge labels.

use dfatrace_core::SymbolSet;

/// Ranges collapsed to a single token when every member is present.
const WELL_KNOWN_RANGES: [(char, char); 3] = [('a', 'z'), ('A', 'Z'), ('0', '9')];

/// Formats a symbol set as a short label such as `0-9, _, a-z`.
///
/// Complete well-known ranges become one token, remaining symbols are
/// listed individually. Tokens are sorted and comma-joined.
pub fn compact_label(symbols: &SymbolSet) -> String {
    let mut rest = symbols.clone();
    let mut tokens = Vec::new();

    for (start, end) in WELL_KNOWN_RANGES {
        if (start..=end).all(|c| rest.contains(&c)) {
            for c in start..=end {
                rest.remove(&c);
            }
            tokens.push(format!("{}-{}", start, end));
        }
    }

    tokens.extend(rest.into_iter().map(display_symbol));
    tokens.sort();
    tokens.join(", ")
}

fn display_symbol(symbol: char) -> String {
    if symbol.is_whitespace() || symbol.is_control() {
        format!("{:?}", symbol)
    } else {
        symbol.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfatrace_core::expand;
    use proptest::prelude::*;

    #[test]
    fn test_full_ranges_collapse() {
        let symbols = expand("a-z 0-9 _").unwrap();
        assert_eq!(compact_label(&symbols), "0-9, _, a-z");
    }

    #[test]
    fn test_partial_range_listed() {
        let symbols = expand("a-c 0 1").unwrap();
        assert_eq!(compact_label(&symbols), "0, 1, a, b, c");
    }

    #[test]
    fn test_uppercase_and_extra_symbols() {
        let symbols = expand("A-Z a-z x").unwrap();
        assert_eq!(compact_label(&symbols), "A-Z, a-z");

        let symbols = expand("A-Z -").unwrap();
        assert_eq!(compact_label(&symbols), "-, A-Z");
    }

    #[test]
    fn test_whitespace_symbol_visible() {
        let symbols: SymbolSet = [' ', 'a'].into_iter().collect();
        assert_eq!(compact_label(&symbols), "' ', a");
    }

    #[test]
    fn test_empty() {
        assert_eq!(compact_label(&SymbolSet::new()), "");
    }

    fn token_width(token: &str) -> usize {
        match token {
            "a-z" | "A-Z" => 26,
            "0-9" => 10,
            _ => 1,
        }
    }

    proptest! {
        #[test]
        fn prop_label_covers_every_symbol(symbols in prop::collection::btree_set("[a-zA-Z0-9]", 0..30)) {
            let symbols: SymbolSet = symbols.iter().flat_map(|s| s.chars()).collect();
            let label = compact_label(&symbols);

            let covered: usize = label
                .split(", ")
                .filter(|t| !t.is_empty())
                .map(token_width)
                .sum();
            prop_assert_eq!(covered, symbols.len());
        }
    }
}
