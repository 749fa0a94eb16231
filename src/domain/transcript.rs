use std::fmt;

/// Full transcript of one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    pub fn from_raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Merge per-chunk transcriptions: each piece trimmed, empty pieces
    /// dropped, the rest joined by single spaces in chunk order.
    pub fn join(pieces: &[String]) -> Self {
        let joined = pieces
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
