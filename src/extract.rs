//! Recovery of a JSON payload from free-form model output.
//!
//! Models frequently wrap the requested JSON in a markdown code fence or
//! surround it with prose. The extraction here is a bracket heuristic, not a
//! parser: it takes everything from the first `[` or `{` to the last `]`
//! (or `}`), without counting nesting. A translation containing literal
//! brackets after the real payload ends can therefore mis-extract; the
//! caller surfaces that as a malformed-payload error.

/// Remove a surrounding markdown code fence, with or without a language tag.
///
/// Input that does not start with a fence is returned trimmed but otherwise
/// untouched.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };

    // Language tag such as `json` or `JSON` directly after the fence
    let tag_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let body = &body[tag_len..];

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Locate the region of `text` that most likely holds the JSON value.
///
/// Fences are stripped first. If no `[` or `{` occurs the (stripped) input is
/// returned as-is, leaving the parse failure to the caller.
pub fn extract_json_region(text: &str) -> &str {
    let text = strip_code_fence(text);

    let start = match (text.find('['), text.find('{')) {
        (Some(array), Some(object)) => array.min(object),
        (Some(array), None) => array,
        (None, Some(object)) => object,
        (None, None) => return text,
    };

    let end = match text.rfind(']') {
        Some(end) if end > start => Some(end),
        _ => text.rfind('}'),
    };

    match end {
        Some(end) if end > start => &text[start..=end],
        _ => &text[start..],
    }
}
