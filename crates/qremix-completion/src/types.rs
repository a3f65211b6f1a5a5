//! Core data types shared by the completion pipeline

use serde::{Deserialize, Serialize};

use crate::error::CompletionResult;

/// Editor state around the cursor at the moment a completion is requested.
///
/// Field names serialize in camelCase so the struct round-trips with the editor's
/// `promptData` payload. The boolean flags are advisory hints from the caller: they may all be
/// false, several may be true at once, and the resolver never relies on them. They still take
/// part in [`CompletionContext::canonical_key`], so two requests that differ only in a flag are
/// cached separately.
///
/// `cursor_position` is not checked against `current_line`; matching only inspects string
/// content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionContext {
    /// Full text of the line containing the cursor
    pub current_line: String,
    /// Character offset of the cursor within the line
    pub cursor_position: usize,
    /// Token being typed, possibly empty
    pub current_word: String,
    /// Text immediately preceding the token
    pub word_before_cursor: String,
    /// Source above the cursor line
    pub previous_lines: String,
    /// Source below the cursor line
    pub next_lines: String,
    pub is_beginning_of_line: bool,
    pub is_importing: bool,
    pub is_pragma: bool,
    pub is_contract: bool,
    pub is_function: bool,
    pub is_event: bool,
    pub is_modifier: bool,
    pub is_mapping: bool,
    pub is_require: bool,
    pub is_open_zeppelin: bool,
}

impl CompletionContext {
    /// Create an all-default context
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_line(mut self, line: impl Into<String>) -> Self {
        self.current_line = line.into();
        self
    }

    pub fn with_cursor_position(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }

    pub fn with_current_word(mut self, word: impl Into<String>) -> Self {
        self.current_word = word.into();
        self
    }

    pub fn with_word_before_cursor(mut self, text: impl Into<String>) -> Self {
        self.word_before_cursor = text.into();
        self
    }

    pub fn with_previous_lines(mut self, text: impl Into<String>) -> Self {
        self.previous_lines = text.into();
        self
    }

    pub fn with_next_lines(mut self, text: impl Into<String>) -> Self {
        self.next_lines = text.into();
        self
    }

    pub fn with_beginning_of_line(mut self, value: bool) -> Self {
        self.is_beginning_of_line = value;
        self
    }

    /// Canonical serialization used as the context half of a cache key.
    ///
    /// Fields are written in declaration order, so the key does not depend on the order in
    /// which the caller supplied them.
    pub fn canonical_key(&self) -> CompletionResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A completion request as received from the editor-assist collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    /// Raw prompt text; part of the cache key
    pub prompt: String,
    /// Loosely-typed context fields; normalized by [`crate::ContextExtractor`]
    #[serde(default)]
    pub prompt_data: serde_json::Value,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, prompt_data: serde_json::Value) -> Self {
        Self {
            prompt: prompt.into(),
            prompt_data,
        }
    }
}

/// The single suggestion returned to the collaborator.
///
/// An empty `suggestion` means "no suggestion available".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub suggestion: String,
}

impl CompletionResponse {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.suggestion.is_empty()
    }
}
