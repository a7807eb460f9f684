//! Lexical brace matching for JavaScript source.
//!
//! This is not a parser. It only knows enough of the token grammar to avoid
//! counting braces that live inside strings, template literals, comments
//! and regular-expression literals. Whether a `/` starts a regex is decided
//! from the previous token only, so `)` closing an `if`/`while`/`for`/`with`
//! condition is the one place parentheses are tracked.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Brace,
    TemplateExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    /// Operator, punctuation or keyword: a following `/` starts a regex.
    Operator,
    /// Identifier, literal or closing bracket: a following `/` divides.
    Value,
}

const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case",
    "do", "else", "yield", "await",
];

/// A `(` after one of these opens a statement condition; the matching `)`
/// is followed by a statement, so a `/` there starts a regex.
const CONTROL_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

/// Returns the byte index of the `}` closing the brace at `open`.
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let b = text.as_bytes();
    if b.get(open) != Some(&b'{') {
        return None;
    }

    let n = b.len();
    let mut stack = vec![Frame::Brace];
    // one entry per open `(`: true when it follows a control keyword
    let mut parens: Vec<bool> = Vec::new();
    let mut after_control = false;
    let mut prev = Prev::Operator;
    let mut i = open + 1;

    while i < n {
        let c = b[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if c == b'/' {
            match b.get(i + 1) {
                Some(b'/') => {
                    i = skip_line_comment(b, i);
                    continue;
                }
                Some(b'*') => {
                    i = skip_block_comment(b, i)?;
                    continue;
                }
                _ => {}
            }
        }

        let was_control = std::mem::replace(&mut after_control, false);
        match c {
            b'{' => {
                stack.push(Frame::Brace);
                prev = Prev::Operator;
                i += 1;
            }
            b'}' => match stack.pop()? {
                Frame::Brace => {
                    if stack.is_empty() {
                        return Some(i);
                    }
                    prev = Prev::Operator;
                    i += 1;
                }
                Frame::TemplateExpr => {
                    i = skip_template(b, i + 1, &mut stack)?;
                    prev = Prev::Value;
                }
            },
            b'`' => {
                i = skip_template(b, i + 1, &mut stack)?;
                prev = Prev::Value;
            }
            b'\'' | b'"' => {
                i = skip_string(b, i, c)?;
                prev = Prev::Value;
            }
            b'/' if prev == Prev::Operator => {
                i = skip_regex(b, i)?;
                prev = Prev::Value;
            }
            b'(' => {
                parens.push(was_control);
                prev = Prev::Operator;
                i += 1;
            }
            b')' => {
                prev = if parens.pop().unwrap_or(false) {
                    Prev::Operator
                } else {
                    Prev::Value
                };
                i += 1;
            }
            b']' => {
                prev = Prev::Value;
                i += 1;
            }
            c if is_ident_byte(c) => {
                let start = i;
                while i < n && is_ident_byte(b[i]) {
                    i += 1;
                }
                let word = &text[start..i];
                after_control = CONTROL_KEYWORDS.contains(&word);
                prev = if REGEX_PREFIX_KEYWORDS.contains(&word) {
                    Prev::Operator
                } else {
                    Prev::Value
                };
            }
            _ => {
                prev = Prev::Operator;
                i += 1;
            }
        }
    }

    None
}

fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

fn skip_string(b: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut j = start + 1;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            // an unterminated string literal ends at the line break
            b'\n' => return Some(j),
            c if c == quote => return Some(j + 1),
            _ => j += 1,
        }
    }
    None
}

/// Scans template characters starting after a backtick or a closing `}`
/// of an interpolation. Stops after the closing backtick, or after `${`
/// with an interpolation frame pushed.
fn skip_template(b: &[u8], start: usize, stack: &mut Vec<Frame>) -> Option<usize> {
    let mut j = start;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            b'`' => return Some(j + 1),
            b'$' if b.get(j + 1) == Some(&b'{') => {
                stack.push(Frame::TemplateExpr);
                return Some(j + 2);
            }
            _ => j += 1,
        }
    }
    None
}

fn skip_line_comment(b: &[u8], start: usize) -> usize {
    b[start..]
        .iter()
        .position(|&c| c == b'\n')
        .map_or(b.len(), |p| start + p + 1)
}

fn skip_block_comment(b: &[u8], start: usize) -> Option<usize> {
    b[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map(|p| start + 2 + p + 2)
}

fn skip_regex(b: &[u8], start: usize) -> Option<usize> {
    let mut j = start + 1;
    let mut in_class = false;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            b'[' => {
                in_class = true;
                j += 1;
            }
            b']' => {
                in_class = false;
                j += 1;
            }
            b'/' if !in_class => {
                j += 1;
                while j < b.len() && b[j].is_ascii_alphabetic() {
                    j += 1;
                }
                return Some(j);
            }
            // not a regex after all; resume scanning on the next line
            b'\n' => return Some(j),
            _ => j += 1,
        }
    }
    None
}
