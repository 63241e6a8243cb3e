//! Markdown-to-speech cleaning
//!
//! Strips markup so the synthesized speech sounds natural. This is a blunt
//! character strip, not structural Markdown parsing: `` ` ``, `#`, `>` and
//! `-` are deleted wherever they occur, including in ordinary prose.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[`#>-]").unwrap());
static PIPES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove markdown formatting from text destined for speech synthesis.
///
/// Bold and italic markers are unwrapped (content kept), table bars become
/// spaces, the symbol characters are dropped, and whitespace runs collapse
/// to single spaces. Idempotent.
pub fn clean_for_speech(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = SYMBOLS.replace_all(&text, "");
    let text = PIPES.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
