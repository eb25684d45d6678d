//! Tokenizing the text before the cursor.
//!
//! Tokens are produced by splitting on single spaces, so consecutive spaces
//! yield empty tokens and a trailing space yields an empty current word.

/// A view over the text before the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandLine<'a> {
    text: &'a str,
}

impl<'a> CommandLine<'a> {
    pub fn new(text_before_cursor: &'a str) -> Self {
        Self {
            text: text_before_cursor,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'a str> {
        self.text.split(' ')
    }

    /// The option flag being completed: the second-to-last token, when it is
    /// non-empty and starts with `-`.
    pub fn previous_option(&self) -> Option<&'a str> {
        let tokens: Vec<&'a str> = self.tokens().collect();
        if tokens.len() < 2 {
            return None;
        }

        let candidate = tokens[tokens.len() - 2];
        candidate.starts_with('-').then_some(candidate)
    }

    /// The partial word at the cursor: everything after the last space.
    pub fn word_before_cursor(&self) -> &'a str {
        match self.text.rfind(' ') {
            Some(idx) => &self.text[idx + 1..],
            None => self.text,
        }
    }

    /// First token that exactly matches a name accepted by `is_profile`.
    pub fn find_profile<F>(&self, is_profile: F) -> Option<&'a str>
    where
        F: Fn(&str) -> bool,
    {
        self.tokens().find(|token| is_profile(token))
    }
}
