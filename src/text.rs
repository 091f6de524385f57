/// Collapse every whitespace variant (ordinary, tab, non-breaking U+00A0,
/// narrow no-break U+202F) into single ASCII spaces and trim the ends.
/// Total: any input, including empty, yields a string.
pub fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalization used for header and alias matching: collapsed + lowercased.
pub fn norm_key(s: &str) -> String {
    squash(s).to_lowercase()
}

/// Tight normalization for package titles: lowercased with ALL whitespace
/// removed, so "4 YOU", "4you" and "4YOU" compare equal.
pub fn norm_tight(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squash_collapses_whitespace_variants() {
        assert_eq!(squash("  Ivanov\t Petr  "), "Ivanov Petr");
        assert_eq!(squash("a\u{00A0}b"), "a b");
        assert_eq!(squash("a\u{202F}b"), "a b");
        assert_eq!(squash("one\n\ntwo"), "one two");
    }

    #[test]
    fn test_squash_is_total() {
        assert_eq!(squash(""), "");
        assert_eq!(squash("   "), "");
    }

    #[test]
    fn test_norm_key() {
        assert_eq!(norm_key("  Type of\u{00A0}Room "), "type of room");
    }

    #[test]
    fn test_norm_tight() {
        assert_eq!(norm_tight("4 YOU"), "4you");
        assert_eq!(norm_tight("NIYET 7 DAYS"), "niyet7days");
    }
}
