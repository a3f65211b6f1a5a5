//! Context extraction for code completion
//!
//! Turns the loosely-typed field map sent by the editor into a [`CompletionContext`]. Every
//! field is optional: text fields default to the empty string, `cursorPosition` to `0` and
//! flags to `false`. A field of the wrong JSON type is treated as missing, and unknown fields
//! are ignored. Extraction never fails.
use serde_json::{Map, Value};

use crate::types::CompletionContext;

const CURRENT_LINE: &str = "currentLine";
const CURSOR_POSITION: &str = "cursorPosition";
const CURRENT_WORD: &str = "currentWord";
const WORD_BEFORE_CURSOR: &str = "wordBeforeCursor";
const PREVIOUS_LINES: &str = "previousLines";
const NEXT_LINES: &str = "nextLines";

/// Normalizes raw editor state into a [`CompletionContext`]
///
/// # Example
///
/// ```ignore
/// use qremix_completion::ContextExtractor;
/// use serde_json::json;
///
/// let context = ContextExtractor::extract(&json!({
///     "wordBeforeCursor": "contract MyToken {",
///     "isContract": true,
/// }));
/// assert_eq!(context.cursor_position, 0);
/// assert!(context.is_contract);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextExtractor;

impl ContextExtractor {
    /// Extract a context from a JSON value; anything but an object yields the default context
    pub fn extract(fields: &Value) -> CompletionContext {
        match fields {
            Value::Object(map) => Self::extract_map(map),
            _ => CompletionContext::default(),
        }
    }

    /// Extract a context from an already-unwrapped JSON object
    pub fn extract_map(map: &Map<String, Value>) -> CompletionContext {
        CompletionContext {
            current_line: text_field(map, CURRENT_LINE),
            cursor_position: offset_field(map, CURSOR_POSITION),
            current_word: text_field(map, CURRENT_WORD),
            word_before_cursor: text_field(map, WORD_BEFORE_CURSOR),
            previous_lines: text_field(map, PREVIOUS_LINES),
            next_lines: text_field(map, NEXT_LINES),
            is_beginning_of_line: flag_field(map, "isBeginningOfLine"),
            is_importing: flag_field(map, "isImporting"),
            is_pragma: flag_field(map, "isPragma"),
            is_contract: flag_field(map, "isContract"),
            is_function: flag_field(map, "isFunction"),
            is_event: flag_field(map, "isEvent"),
            is_modifier: flag_field(map, "isModifier"),
            is_mapping: flag_field(map, "isMapping"),
            is_require: flag_field(map, "isRequire"),
            is_open_zeppelin: flag_field(map, "isOpenZeppelin"),
        }
    }
}

fn text_field(map: &Map<String, Value>, name: &str) -> String {
    map.get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn flag_field(map: &Map<String, Value>, name: &str) -> bool {
    map.get(name).and_then(Value::as_bool).unwrap_or(false)
}

// Negative, fractional-negative, NaN and non-numeric offsets all collapse to 0.
fn offset_field(map: &Map<String, Value>, name: &str) -> usize {
    let Some(value) = map.get(name) else {
        return 0;
    };

    if let Some(offset) = value.as_u64() {
        return usize::try_from(offset).unwrap_or(usize::MAX);
    }

    match value.as_f64() {
        Some(offset) if offset.is_finite() && offset >= 0.0 => offset as usize,
        _ => 0,
    }
}
