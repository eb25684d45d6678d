use std::fmt;

/// A completion candidate: the text to insert and an annotation shown
/// next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub value: String,
    pub description: String,
}

impl Suggestion {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }

    /// A suggestion with no annotation.
    pub fn bare(value: impl Into<String>) -> Self {
        Self::new(value, String::new())
    }
}

/// Tab-separated form understood by the generated shell scripts.
impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{}\t{}", self.value, self.description)
        }
    }
}
