//! Ruby block-keyword classification.
//!
//! Classifies one line of extracted script as opening a nested block,
//! continuing a block at its opener's level, or neither. The engine
//! drives its nesting counter with [`opens_block`] and the indentation
//! adjustment for continuation lines with [`is_mid_block_keyword`];
//! [`classify`] composes both for callers that want a single verdict.
//!
//! Classification is a pure function of the line's text — no lookahead
//! into sibling or parent lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords that introduce a new nested block.
pub static START_BLOCK_KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "if", "unless", "case", "begin", "for", "until", "while",
};

/// Keywords that continue or close a block at its opener's level.
pub static MID_BLOCK_KEYWORDS: phf::Set<&'static str> = phf::phf_set! {
    "else", "elsif", "when", "rescue", "ensure",
};

/// Ruby's structural block-keyword grammar: one capture group per
/// keyword family, mid-block first.
static BLOCK_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:(elsif|else|when|rescue|ensure)|(if|unless|case|begin|for|until|while))\b")
        .unwrap()
});

/// Leading bare token followed by mandatory whitespace. `for`, `until`
/// and `while` can head a line without any following punctuation, which
/// the structural grammar alone does not catch.
static LEADING_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\S+)\s+").unwrap());

/// Line ends in a block-starting `do`, optionally with a `|params|`
/// list.
static ANONYMOUS_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bdo\s*(\|\s*[^|]*\s*\|)?\z").unwrap());

/// Verdict for one line of script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// Introduces a nested block (keyword or anonymous `do`).
    OpensBlock,
    /// Continues/closes a block at the same level as its opener.
    ContinuesBlock,
    /// Neither.
    Plain,
}

/// Classify one line of script.
///
/// An anonymous-block ending makes the line [`BlockRole::OpensBlock`]
/// regardless of its leading keyword (`rescue Timeout => e do` both
/// re-anchors indentation and opens a block; the engine consults the
/// two predicates independently for that case).
pub fn classify(text: &str) -> BlockRole {
    if is_anonymous_block(text) {
        return BlockRole::OpensBlock;
    }
    match block_keyword(text) {
        Some(keyword) if MID_BLOCK_KEYWORDS.contains(keyword) => BlockRole::ContinuesBlock,
        Some(keyword) if START_BLOCK_KEYWORDS.contains(keyword) => BlockRole::OpensBlock,
        _ => BlockRole::Plain,
    }
}

/// Does this line require a matching `end` for the block it opens?
pub fn opens_block(text: &str) -> bool {
    is_anonymous_block(text) || is_start_block_keyword(text)
}

pub fn is_start_block_keyword(text: &str) -> bool {
    block_keyword(text).is_some_and(|keyword| START_BLOCK_KEYWORDS.contains(keyword))
}

pub fn is_mid_block_keyword(text: &str) -> bool {
    block_keyword(text).is_some_and(|keyword| MID_BLOCK_KEYWORDS.contains(keyword))
}

/// Does the line end in a block-starting marker (`do`, `do |x, y|`)?
pub fn is_anonymous_block(text: &str) -> bool {
    ANONYMOUS_BLOCK_RE.is_match(text)
}

/// Extract the leading block keyword of a line, if any.
pub fn block_keyword(text: &str) -> Option<&str> {
    // `for x in xs`, `while cond`, `until cond` appear as a bare token
    // plus whitespace, with nothing the structural grammar can anchor
    // on.
    if let Some(caps) = LEADING_TOKEN_RE.captures(text) {
        let token = caps.get(1).map(|m| m.as_str())?;
        if matches!(token, "for" | "until" | "while") {
            return Some(token);
        }
    }

    let caps = BLOCK_KEYWORD_RE.captures(text)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_keywords_open_blocks() {
        for line in [
            "if cond",
            "unless cond",
            "case value",
            "begin",
            "for x in xs",
            "until done?",
            "while running?",
            "  if indented",
        ] {
            assert_eq!(classify(line), BlockRole::OpensBlock, "line: {line:?}");
        }
    }

    #[test]
    fn mid_keywords_continue_blocks() {
        for line in [
            "else",
            "elsif other_cond",
            "when :value",
            "rescue StandardError => e",
            "ensure",
        ] {
            assert_eq!(classify(line), BlockRole::ContinuesBlock, "line: {line:?}");
            assert!(is_mid_block_keyword(line));
            assert!(!opens_block(line), "line: {line:?}");
        }
    }

    #[test]
    fn anonymous_blocks_open_regardless_of_keyword() {
        assert_eq!(classify("items.each do"), BlockRole::OpensBlock);
        assert_eq!(classify("items.each do |item|"), BlockRole::OpensBlock);
        assert_eq!(classify("items.each_with_index do |item, i|"), BlockRole::OpensBlock);
        assert_eq!(classify("rescue Timeout::Error => e do"), BlockRole::OpensBlock);
        // The indentation predicate still sees the mid keyword.
        assert!(is_mid_block_keyword("rescue Timeout::Error => e do"));
    }

    #[test]
    fn plain_lines() {
        for line in [
            "foo = 1",
            "link_to 'Sign Out', sign_out_path",
            "do_thing",
            "end",
            "format(x)",
            "iffy = 2",
            "elsewhere.call",
            "whileloop = true",
        ] {
            assert_eq!(classify(line), BlockRole::Plain, "line: {line:?}");
        }
    }

    #[test]
    fn do_must_terminate_the_line() {
        assert!(!is_anonymous_block("do_thing"));
        assert!(!is_anonymous_block("items.each do |item| item.save"));
        assert!(is_anonymous_block("form_for @user do |f|"));
    }

    #[test]
    fn keyword_extraction() {
        assert_eq!(block_keyword("if cond"), Some("if"));
        assert_eq!(block_keyword("elsif cond"), Some("elsif"));
        assert_eq!(block_keyword("for x in xs"), Some("for"));
        assert_eq!(block_keyword("begin"), Some("begin"));
        assert_eq!(block_keyword("foo = 1"), None);
        assert_eq!(block_keyword("format(x)"), None);
    }
}
