//! Loads the ad hoc lexical-rule file format this CLI uses to feed
//! [`langkit::lexer::Lexer::build`]: one rule per non-blank line,
//! tab-separated `tokenType\tpriority\tignore\tpattern` (the pattern is the
//! remainder of the line, so it may itself contain `|`, tabs aside).
//!
//! `spec.md` §6 only bit-exactly specifies the grammar-text syntax; the
//! lexical-rule file format is this CLI's own affair, same as
//! `dandy-cli::automata`'s file-loading conventions for DFA/NFA/regex text.

use langkit::lexer::{LexicalRule, TokenType};
use std::path::Path;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("error reading {0}: {1}")]
    Io(String, io::Error),
    #[error("line {0}: expected 4 tab-separated fields, got {1:?}")]
    MalformedLine(usize, String),
    #[error("line {0}: unknown token type {1:?}")]
    UnknownTokenType(usize, String),
    #[error("line {0}: priority {1:?} is not an integer")]
    BadPriority(usize, String),
}

fn parse_token_type(name: &str) -> Option<TokenType> {
    Some(match name {
        "Identifier" => TokenType::Identifier,
        "Number" => TokenType::Number,
        "String" => TokenType::String,
        "Keyword" => TokenType::Keyword,
        "Operator" => TokenType::Operator,
        "Delimiter" => TokenType::Delimiter,
        "Whitespace" => TokenType::Whitespace,
        "Comment" => TokenType::Comment,
        "Eof" => TokenType::Eof,
        "Unknown" => TokenType::Unknown,
        _ => return None,
    })
}

pub fn load_rules(path: &Path) -> Result<Vec<LexicalRule>, RulesError> {
    let text = fs::read_to_string(path).map_err(|e| RulesError::Io(path.display().to_string(), e))?;
    let mut rules = Vec::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let mut fields = line.splitn(4, '\t');
        let (Some(token_type), Some(priority), Some(ignore), Some(pattern)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(RulesError::MalformedLine(line_no + 1, line.to_string()));
        };

        let token_type = parse_token_type(token_type)
            .ok_or_else(|| RulesError::UnknownTokenType(line_no + 1, token_type.to_string()))?;
        let priority: i32 = priority
            .parse()
            .map_err(|_| RulesError::BadPriority(line_no + 1, priority.to_string()))?;
        let ignore = ignore.eq_ignore_ascii_case("true");

        let mut rule = LexicalRule::new(pattern, token_type).with_priority(priority);
        if ignore {
            rule = rule.ignored();
        }
        rules.push(rule);
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn parses_tab_separated_rules() {
        let path = write_tempfile("Keyword\t0\tfalse\tif\nWhitespace\t0\ttrue\t +\n");
        let rules = load_rules(&path).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].token_type, TokenType::Keyword);
        assert!(rules[1].ignore);
        fs::remove_file(&path).unwrap();
    }

    fn write_tempfile(content: &str) -> std::path::PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "langkit-cli-test-{}-{n}.rules",
            std::process::id()
        ));
        fs::write(&path, content).unwrap();
        path
    }
}
