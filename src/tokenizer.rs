//! Line tokenizer for the editable snapshot document.
//!
//! Fields are separated by ASCII spaces. A backslash escapes the character that
//! follows it, so directory names containing spaces survive as a single token
//! (`~/src/my\ repo`). Splitting never strips the escapes; [`unescape`] does that
//! for the path token only. Tag tokens are used verbatim.

/// Split a line on unescaped spaces.
///
/// Runs of spaces collapse, so no empty tokens are produced. A trailing partial
/// token (including a dangling backslash) is still emitted.
pub fn split_by_space(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = line.char_indices();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                start.get_or_insert(idx);
                // The escaped character belongs to the token whatever it is.
                chars.next();
            }
            ' ' => {
                if let Some(begin) = start.take() {
                    parts.push(&line[begin..idx]);
                }
            }
            _ => {
                start.get_or_insert(idx);
            }
        }
    }

    if let Some(begin) = start {
        parts.push(&line[begin..]);
    }

    parts
}

/// Escape a path for use as the first field of a snapshot line.
pub fn escape_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '\\' || ch == ' ' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Remove escape backslashes: `\x` becomes `x`. A dangling trailing backslash is kept.
pub fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
