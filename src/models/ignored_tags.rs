/// Tags that do not count as real tagging.
///
/// An item carrying only these tags (typically automation markers added by a
/// feed-import integration) is still considered untagged. Membership is
/// case-insensitive, and the configured order is kept because it determines the
/// order in which candidate queries are issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredTagSet {
    tags: Vec<String>,
}

impl IgnoredTagSet {
    /// Tags ignored when no explicit set is configured.
    pub const DEFAULT_TAGS: [&'static str; 2] = ["ifttt", "reddit"];

    /// Creates a set from the given tags.
    ///
    /// Tags are lowercased and trimmed; empty and repeated entries are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use raintag::IgnoredTagSet;
    ///
    /// let set = IgnoredTagSet::new(["IFTTT", " reddit ", "ifttt", ""]);
    /// assert_eq!(set.tags(), &["ifttt", "reddit"]);
    /// ```
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim().to_lowercase();
            if !tag.is_empty() && !normalized.contains(&tag) {
                normalized.push(tag);
            }
        }
        Self { tags: normalized }
    }

    /// Returns true if `tag` is in the set, ignoring case.
    pub fn contains(&self, tag: &str) -> bool {
        let lowered = tag.to_lowercase();
        self.tags.iter().any(|ignored| *ignored == lowered)
    }

    /// Returns the ignored tags in their configured order (lowercase).
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns true if no tags are ignored.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Default for IgnoredTagSet {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TAGS)
    }
}
