//! # Line splitting
//!
//! The completion engine splits the text before the cursor on single spaces.
//! There is no quoting support: a quoted multi-word argument becomes several
//! tokens. Empty strings produced by consecutive spaces are kept so callers
//! can tell "typing a word" apart from "just typed a space".

/// Token with original byte positions.
///
/// # Fields
/// * `text` - The text content of the token (possibly empty)
/// * `start` - The starting byte position in the original string
/// * `end` - The ending byte position in the original string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split `input` on single spaces, preserving empty tokens.
///
/// An empty input yields an empty vector rather than a single empty token.
///
/// # Example
/// ```rust
/// use kubeline_util::shell_lexing::split_on_spaces;
///
/// assert_eq!(split_on_spaces("get  po"), vec!["get", "", "po"]);
/// assert_eq!(split_on_spaces("get "), vec!["get", ""]);
/// assert!(split_on_spaces("").is_empty());
/// ```
pub fn split_on_spaces(input: &str) -> Vec<&str> {
    split_on_spaces_ranged(input).into_iter().map(|token| token.text).collect()
}

/// Split `input` on single spaces, returning each token with its byte range.
///
/// # Example
/// ```rust
/// use kubeline_util::shell_lexing::split_on_spaces_ranged;
///
/// let tokens = split_on_spaces_ranged("describe pods");
/// assert_eq!(tokens[1].text, "pods");
/// assert_eq!(tokens[1].start, 9);
/// assert_eq!(tokens[1].end, 13);
/// ```
pub fn split_on_spaces_ranged(input: &str) -> Vec<LexToken<'_>> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    let mut start = 0usize;
    for (index, byte) in input.bytes().enumerate() {
        if byte == b' ' {
            tokens.push(LexToken {
                text: &input[start..index],
                start,
                end: index,
            });
            start = index + 1;
        }
    }
    tokens.push(LexToken {
        text: &input[start..],
        start,
        end: input.len(),
    });
    tokens
}

/// Returns the part of `line` before the byte offset `cursor`.
///
/// The cursor is clamped to the line length and moved back to the nearest
/// char boundary, so any integer is accepted.
pub fn text_before_cursor(line: &str, cursor: usize) -> &str {
    let mut end = cursor.min(line.len());
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}

/// Returns the word being typed: everything after the last space.
pub fn word_before_cursor(text_before_cursor: &str) -> &str {
    match text_before_cursor.rfind(' ') {
        Some(index) => &text_before_cursor[index + 1..],
        None => text_before_cursor,
    }
}
