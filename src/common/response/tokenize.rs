// src/common/response/tokenize.rs

/// Splits the next token off a cursor.
///
/// Returns the text up to the first delimiter and moves the cursor past
/// that delimiter. Adjacent delimiters produce an empty token. When no
/// delimiter is left the rest is returned and the cursor is exhausted
/// (`None`); only an exhausted cursor yields `None`.
///
/// ```
/// use methodscript::common::next_token;
///
/// let mut cursor = Some("a,,b");
/// assert_eq!(next_token(&mut cursor, &[',']), Some("a"));
/// assert_eq!(next_token(&mut cursor, &[',']), Some(""));
/// assert_eq!(next_token(&mut cursor, &[',']), Some("b"));
/// assert_eq!(next_token(&mut cursor, &[',']), None);
/// ```
pub fn next_token<'a>(cursor: &mut Option<&'a str>, delimiters: &[char]) -> Option<&'a str> {
    let remaining = cursor.take()?;
    match remaining.find(delimiters) {
        Some(pos) => {
            let (token, rest) = remaining.split_at(pos);
            // All delimiters are single chars, skip exactly one of them.
            let delimiter_len = rest.chars().next().map_or(0, char::len_utf8);
            *cursor = rest.get(delimiter_len..);
            Some(token)
        }
        None => Some(remaining),
    }
}

/// Iterator over the tokens of a line, see [`next_token`].
#[derive(Debug, Clone)]
pub struct Tokens<'a, 'd> {
    cursor: Option<&'a str>,
    delimiters: &'d [char],
}

/// Returns an iterator over the tokens of `line`.
pub fn tokens<'a, 'd>(line: &'a str, delimiters: &'d [char]) -> Tokens<'a, 'd> {
    Tokens { cursor: Some(line), delimiters }
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        next_token(&mut self.cursor, self.delimiters)
    }
}

impl core::iter::FusedIterator for Tokens<'_, '_> {}
