//! Command line tokenizer
//!
//! Splits a raw command line into argument tokens. Single and double
//! quotes group characters (including spaces) into one token; there is
//! no escape character and quotes do not nest.

use thiserror::Error;

/// Tokenizer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// A command line split into its name and arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Build from a token list: the first token is the command name
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let mut iter = tokens.into_iter();
        let name = iter.next().unwrap_or_default();
        Self {
            name,
            args: iter.collect(),
        }
    }

    /// Tokenize and split in one step
    pub fn parse(line: &str) -> Result<Self, TokenizeError> {
        tokenize(line).map(Self::from_tokens)
    }
}

/// Split `line` into tokens.
///
/// An unquoted space separates tokens and never yields an empty token.
/// A closing quote always flushes the current token, so `""` produces a
/// single empty token.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => {
                quote = None;
                tokens.push(std::mem::take(&mut current));
            }
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                ' ' => {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(ch),
            },
        }
    }

    if quote.is_some() {
        return Err(TokenizeError::UnterminatedQuote);
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(line: &str) -> Vec<String> {
        tokenize(line).unwrap()
    }

    #[test]
    fn test_quoted_argument() {
        assert_eq!(toks("a \"b c\" d"), vec!["a", "b c", "d"]);
        assert_eq!(toks("echo 'single quoted'"), vec!["echo", "single quoted"]);
    }

    #[test]
    fn test_repeated_spaces() {
        assert_eq!(toks("a  b"), vec!["a", "b"]);
        assert_eq!(toks("   "), Vec::<String>::new());
        assert_eq!(toks(""), Vec::<String>::new());
    }

    #[test]
    fn test_empty_quotes_yield_empty_token() {
        assert_eq!(toks("\"\""), vec![""]);
        assert_eq!(toks("cd ''"), vec!["cd", ""]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(tokenize("a \"b"), Err(TokenizeError::UnterminatedQuote));
        assert_eq!(tokenize("'"), Err(TokenizeError::UnterminatedQuote));
        assert_eq!(
            TokenizeError::UnterminatedQuote.to_string(),
            "unterminated quote"
        );
    }

    #[test]
    fn test_mixed_quotes_are_literal() {
        // The other quote character is plain text inside a quoted run
        assert_eq!(toks("say \"it's\""), vec!["say", "it's"]);
        assert_eq!(toks("say 'a \"b\" c'"), vec!["say", "a \"b\" c"]);
    }

    #[test]
    fn test_quote_inside_word() {
        // Closing quote flushes the accumulated token
        assert_eq!(toks("ab\"c d\"ef"), vec!["abc d", "ef"]);
    }

    #[test]
    fn test_other_whitespace_is_literal() {
        assert_eq!(toks("a\tb"), vec!["a\tb"]);
    }

    #[test]
    fn test_command_line_split() {
        let cmd = CommandLine::parse("ls -l \"my dir\"").unwrap();
        assert_eq!(cmd.name, "ls");
        assert_eq!(cmd.args, vec!["-l", "my dir"]);

        let empty = CommandLine::parse("  ").unwrap();
        assert_eq!(empty, CommandLine::default());
    }
}
