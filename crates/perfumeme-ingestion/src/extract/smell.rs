//! Smell detection from natural-language compound descriptions.

/// Keywords whose presence in a description indicates a perceptible odor.
pub const SMELL_KEYWORDS: &[&str] = &["odor", "odour", "fragrance", "aroma", "scent", "smell"];

/// True iff any description mentions one of [`SMELL_KEYWORDS`].
/// No descriptions, or none mentioning a keyword, is simply `false`.
pub fn has_smell<S: AsRef<str>>(descriptions: &[S]) -> bool {
    descriptions.iter().any(|d| {
        let text = d.as_ref().to_lowercase();
        SMELL_KEYWORDS.iter().any(|k| text.contains(k))
    })
}
