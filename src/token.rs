//! Shell tokens.
//!
//! Each word typed at the shell is exactly one token; nothing here parses
//! expressions.

use crate::model::Entry;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Entry(Entry),
    Undo,
    /// Start over with a fresh engine and empty memory
    Clear,
    /// Store the displayed value under a name
    Store(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Empty token")]
    Empty,
    #[error("Missing variable name in '{0}'")]
    MissingName(String),
}

/// ASCII spellings accepted for registry symbols
const ALIASES: &[(&str, &str)] = &[
    ("*", "×"),
    ("x", "×"),
    ("/", "÷"),
    ("sqrt", "√"),
    ("pi", "π"),
    ("neg", "±"),
    ("+/-", "±"),
    ("!", "x!"),
    ("fact", "x!"),
    ("rand", "Rand"),
    ("**", "^"),
];

/// Registry symbol for a word, resolving ASCII aliases
pub fn canonical_symbol(word: &str) -> &str {
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == word)
        .map(|(_, symbol)| *symbol)
        .unwrap_or(word)
}

pub fn parse_token(word: &str) -> Result<Token, TokenError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(TokenError::Empty);
    }

    match word {
        "undo" => return Ok(Token::Undo),
        "clear" => return Ok(Token::Clear),
        _ => {}
    }

    if let Some(name) = word.strip_prefix('@') {
        return Ok(Token::Entry(Entry::Variable(name_or_err(name, word)?)));
    }
    if let Some(name) = word.strip_prefix('→').or_else(|| word.strip_prefix("->")) {
        return Ok(Token::Store(name_or_err(name, word)?));
    }

    if looks_numeric(word) {
        if let Ok(value) = word.parse::<f64>() {
            return Ok(Token::Entry(Entry::Operand(value)));
        }
    }

    Ok(Token::Entry(Entry::Operator(
        canonical_symbol(word).to_string(),
    )))
}

pub fn parse_tokens<I, S>(words: I) -> Result<Vec<Token>, TokenError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words.into_iter().map(|w| parse_token(w.as_ref())).collect()
}

fn name_or_err(name: &str, word: &str) -> Result<String, TokenError> {
    if name.is_empty() {
        Err(TokenError::MissingName(word.to_string()))
    } else {
        Ok(name.to_string())
    }
}

/// Only digit-led words are numbers, so `e`, `inf` and `-` stay operators
fn looks_numeric(word: &str) -> bool {
    let unsigned = word
        .strip_prefix('-')
        .or_else(|| word.strip_prefix('+'))
        .unwrap_or(word);
    unsigned
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || c == '.')
        .unwrap_or(false)
}
