//! Step patterns with `{name}` placeholders.
//!
//! A pattern is literal text with placeholders such as `{count}` or
//! `{count:u32}`. Doubled braces (`{{` and `}}`) stand for literal braces.
//! Patterns compile to anchored regular expressions, so a pattern matches
//! only the whole step text.

use regex::Regex;
use thiserror::Error;

/// Errors raised while compiling a step pattern.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// A `{` opened a placeholder that never closes.
    #[error("missing closing '}}' for placeholder at byte {0}")]
    UnclosedPlaceholder(usize),

    /// A placeholder name is empty or uses characters other than ASCII
    /// alphanumerics and `_`.
    #[error("invalid placeholder '{{{name}}}' at byte {position}")]
    InvalidPlaceholder {
        /// Text between the braces.
        name: String,
        /// Byte offset of the opening brace.
        position: usize,
    },

    /// A `}` appears without a matching placeholder.
    #[error("unmatched closing brace '}}' at byte {0}")]
    UnmatchedClose(usize),

    /// The generated regular expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder { hint: Option<String> },
}

fn lex(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
            '}' => return Err(PatternError::UnmatchedClose(position)),
            '{' => {
                let mut body = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    body.push(inner);
                }
                if !closed {
                    return Err(PatternError::UnclosedPlaceholder(position));
                }
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(parse_placeholder(&body, position)?);
            }
            other => literal.push(other),
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

fn parse_placeholder(body: &str, position: usize) -> Result<Token, PatternError> {
    let (name, hint) = match body.split_once(':') {
        Some((name, hint)) => (name, Some(hint)),
        None => (body, None),
    };
    let valid_name =
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let valid_hint = hint.is_none_or(|h| !h.is_empty() && !h.contains(char::is_whitespace));
    if !valid_name || !valid_hint {
        return Err(PatternError::InvalidPlaceholder {
            name: body.to_owned(),
            position,
        });
    }
    Ok(Token::Placeholder {
        hint: hint.map(str::to_owned),
    })
}

/// Regular expression fragment used for a placeholder with `hint`.
fn hint_pattern(hint: Option<&str>) -> &'static str {
    match hint {
        Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => r"\d+",
        Some("i8" | "i16" | "i32" | "i64" | "i128" | "isize") => r"[+-]?\d+",
        Some("f32" | "f64") => r"[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?",
        _ => r".+?",
    }
}

/// A compiled step pattern.
///
/// # Examples
///
/// ```
/// use bdd_runner::StepPattern;
///
/// let pattern = StepPattern::compile("I add {a:i32} and {b:i32}").unwrap();
/// assert_eq!(
///     pattern.captures("I add 2 and -3"),
///     Some(vec!["2".to_owned(), "-3".to_owned()])
/// );
/// assert_eq!(pattern.captures("I add two and three"), None);
/// ```
#[derive(Debug, Clone)]
pub struct StepPattern {
    text: String,
    regex: Regex,
    literal_chars: usize,
}

impl StepPattern {
    /// Compile `text` into an anchored regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for malformed placeholders or unbalanced
    /// braces.
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let tokens = lex(text)?;
        let mut source = String::with_capacity(text.len().saturating_mul(2) + 2);
        let mut literal_chars = 0usize;
        source.push('^');
        for token in &tokens {
            match token {
                Token::Literal(literal) => {
                    literal_chars += literal.chars().count();
                    source.push_str(&regex::escape(literal));
                }
                Token::Placeholder { hint } => {
                    source.push('(');
                    source.push_str(hint_pattern(hint.as_deref()));
                    source.push(')');
                }
            }
        }
        source.push('$');
        Ok(Self {
            text: text.to_owned(),
            regex: Regex::new(&source)?,
            literal_chars,
        })
    }

    /// Pattern text as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of literal characters; more literal text means a more specific
    /// pattern.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.literal_chars
    }

    /// Placeholder values captured from `text`, or `None` if it does not
    /// match.
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(text)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                .collect(),
        )
    }
}
