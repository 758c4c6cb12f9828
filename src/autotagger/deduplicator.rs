use super::similarity::edit_distance;

/// Maximum case-insensitive edit distance at which two tags count as the same.
pub const SIMILARITY_THRESHOLD: usize = 2;

/// Greedy near-duplicate filter for suggested tags.
///
/// Suggestion services often return variants of one concept that differ only
/// by pluralization, hyphenation or a typo ("machine-learning" and
/// "machine learning"). The filter keeps the first tag of each such group and
/// drops later ones. It is order-dependent: acceptance order decides which
/// spelling survives.
pub struct TagDeduplicator;

impl TagDeduplicator {
    /// Returns the order-preserving subsequence of `tags` with near-duplicates removed.
    ///
    /// Each tag is compared, lowercased, against every tag accepted so far; it
    /// is dropped if any distance is within [`SIMILARITY_THRESHOLD`]. The
    /// threshold is absolute, not scaled by tag length, so short distinct tags
    /// like "AI" and "ML" also collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use raintag::autotagger::TagDeduplicator;
    ///
    /// let tags = vec!["news".to_string(), "New".to_string(), "Tech".to_string()];
    /// assert_eq!(TagDeduplicator::deduplicate(&tags), vec!["news", "Tech"]);
    /// ```
    #[must_use]
    pub fn deduplicate(tags: &[String]) -> Vec<String> {
        let mut accepted: Vec<String> = Vec::new();
        // Lowercased copies of `accepted`, kept in lockstep
        let mut accepted_lower: Vec<String> = Vec::new();

        for tag in tags {
            let lowered = tag.to_lowercase();
            let is_duplicate = accepted_lower
                .iter()
                .any(|existing| edit_distance(&lowered, existing) <= SIMILARITY_THRESHOLD);

            if !is_duplicate {
                accepted.push(tag.clone());
                accepted_lower.push(lowered);
            }
        }

        accepted
    }
}
