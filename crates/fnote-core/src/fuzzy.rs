//! Left-to-right token matching for template and folder catalogs.
//!
//! A query is split on spaces into tokens. A candidate is split on spaces
//! into elements. Within one element a cursor starts at 0 and never moves
//! back: each still-unfound token is located at or after the cursor, and the
//! cursor moves past the characters it used. The first token that cannot be
//! located ends the element. Tokens found in one element stay found for the
//! next. The candidate matches once every token has been found.
//!
//! A token is located as a contiguous case-insensitive substring when
//! possible, otherwise as an in-order subsequence (`fmt` in `format`).

/// A run of text that either matched a query token or did not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

/// Non-empty, space-delimited tokens of a query.
#[must_use]
pub fn query_tokens(query: &str) -> Vec<&str> {
    query.split(' ').filter(|t| !t.is_empty()).collect()
}

/// Whether `candidate` matches `query`. A blank query matches everything.
#[must_use]
pub fn matches(query: &str, candidate: &str) -> bool {
    let tokens: Vec<Vec<char>> = query_tokens(query).into_iter().map(fold_str).collect();
    if tokens.is_empty() {
        return true;
    }

    let mut found = vec![false; tokens.len()];
    for element in candidate.split(' ') {
        let element = fold_str(element);
        let mut cursor = 0;
        for (token, done) in tokens.iter().zip(found.iter_mut()) {
            if *done {
                continue;
            }
            match locate(&element, token, cursor) {
                Some(positions) => {
                    cursor = positions.last().map_or(cursor, |last| last + 1);
                    *done = true;
                }
                None => break,
            }
        }
        if found.iter().all(|f| *f) {
            return true;
        }
    }
    false
}

/// Keep the items whose key matches `query`, preserving order.
pub fn filter_by<T, F>(query: &str, items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    items
        .into_iter()
        .filter(|item| matches(query, key(item)))
        .collect()
}

/// Split `text` into matched and unmatched runs for display, marking the
/// first contiguous occurrence of each query token after the previous one.
/// A token the matcher only found as a subsequence is not marked.
#[must_use]
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let folded: Vec<char> = chars.iter().copied().map(fold).collect();
    let mut marked = vec![false; chars.len()];

    let mut cursor = 0;
    for token in query_tokens(query) {
        let token = fold_str(token);
        if let Some(start) = find_contiguous(&folded, &token, cursor) {
            let end = start + token.len();
            marked[start..end].fill(true);
            cursor = end;
        }
    }

    let mut segments: Vec<Segment> = Vec::new();
    for (c, matched) in chars.into_iter().zip(marked) {
        match segments.last_mut() {
            Some(last) if last.matched == matched => last.text.push(c),
            _ => segments.push(Segment {
                text: c.to_string(),
                matched,
            }),
        }
    }
    segments
}

/// Positions of `token` in `haystack` at or after `from`: the first
/// contiguous occurrence if there is one, else the earliest subsequence.
fn locate(haystack: &[char], token: &[char], from: usize) -> Option<Vec<usize>> {
    if token.is_empty() || from > haystack.len() {
        return None;
    }
    if let Some(start) = find_contiguous(haystack, token, from) {
        return Some((start..start + token.len()).collect());
    }

    let window = &haystack[from..];
    let mut positions = Vec::with_capacity(token.len());
    let mut wanted = token.iter().peekable();
    for (i, c) in window.iter().enumerate() {
        if wanted.peek() == Some(&c) {
            positions.push(from + i);
            wanted.next();
        }
        if wanted.peek().is_none() {
            return Some(positions);
        }
    }
    None
}

/// Start of the first contiguous occurrence of `token` at or after `from`.
fn find_contiguous(haystack: &[char], token: &[char], from: usize) -> Option<usize> {
    if token.is_empty() || from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(token.len())
        .position(|w| w == token)
        .map(|start| from + start)
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold_str(s: &str) -> Vec<char> {
    s.chars().map(fold).collect()
}
