//! Utterance normalization.
//!
//! Matching is done against a lowercase copy; the raw text is kept verbatim
//! for the transcript.

/// A user utterance prepared for keyword matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    raw: String,
    normalized: String,
}

impl Utterance {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: raw.to_lowercase(),
        }
    }

    /// The text exactly as the user typed it.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Lowercase text used for matching.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Substring containment against the lowercase text.
    pub fn contains(&self, keyword: &str) -> bool {
        self.normalized.contains(keyword)
    }

    /// True if any keyword is contained in the utterance.
    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.contains(k))
    }
}

/// Empty or whitespace-only input. Callers drop these before resolution.
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_for_matching_keeps_raw() {
        let u = Utterance::new("Tell me about MediWallet");
        assert_eq!(u.raw(), "Tell me about MediWallet");
        assert_eq!(u.normalized(), "tell me about mediwallet");
    }

    #[test]
    fn test_contains_is_substring_not_word() {
        let u = Utterance::new("Which teammates?");
        assert!(u.contains("team"));
        assert!(u.contains("hi"));
        assert!(!u.contains("teams"));
    }

    #[test]
    fn test_contains_any() {
        let u = Utterance::new("Can I BOOK a demo");
        assert!(u.contains_any(&["schedule", "book"]));
        assert!(!u.contains_any(&["newsletter", "subscribe"]));
        assert!(!u.contains_any(&[]));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" hi "));
    }
}
