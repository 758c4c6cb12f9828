/// Computes the Levenshtein edit distance between two strings.
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`. Comparison is exact: callers
/// that want case-insensitive distance must lowercase both inputs first.
///
/// # Examples
///
/// ```
/// use raintag::autotagger::edit_distance;
///
/// assert_eq!(edit_distance("kitten", "sitting"), 3);
/// assert_eq!(edit_distance("", "rust"), 4);
/// assert_eq!(edit_distance("tag", "tag"), 0);
/// ```
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(edit_distance("machine learning", "machine learning"), 0);
        assert_eq!(edit_distance("", ""), 0);
    }

    #[test]
    fn empty_string_distance_is_other_length() {
        assert_eq!(edit_distance("", "news"), 4);
        assert_eq!(edit_distance("news", ""), 4);
    }

    #[test]
    fn counts_single_edits() {
        assert_eq!(edit_distance("news", "new"), 1); // deletion
        assert_eq!(edit_distance("tag", "tags"), 1); // insertion
        assert_eq!(edit_distance("cat", "car"), 1); // substitution
    }

    #[test]
    fn classic_examples() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("machine-learning", "machine learning"), 1);
    }

    #[test]
    fn is_case_sensitive() {
        assert_eq!(edit_distance("Rust", "rust"), 1);
        assert_eq!(edit_distance("AI", "ai"), 2);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("", "日本語"), 3);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
        }

        #[test]
        fn distance_to_self_is_zero(a in "\\PC{0,16}") {
            prop_assert_eq!(edit_distance(&a, &a), 0);
        }

        #[test]
        fn distance_from_empty_is_length(s in "\\PC{0,16}") {
            prop_assert_eq!(edit_distance("", &s), s.chars().count());
        }

        #[test]
        fn distance_is_bounded_by_longer_length(a in "[a-z]{0,10}", b in "[a-z]{0,10}") {
            let longer = a.chars().count().max(b.chars().count());
            prop_assert!(edit_distance(&a, &b) <= longer);
        }
    }
}
