mod error;
mod lexer;
mod parser;
mod san;


pub use self::error::{LexicalError, PgnError, SyntaxError};
pub use self::lexer::{tokenize, Token, TokenKind};
pub use self::parser::parse_tokens;
pub use self::san::{decode_san, suffix_glyph};

use crate::game::Game;

#[derive(Clone, Debug, Default)]
pub struct ReaderConfig {
    /// Deepest variation nesting accepted. `None` means no limit.
    pub max_variation_depth: Option<usize>,
}

/// Tokenizes and parses one PGN game.
pub fn parse_with(text: &str, config: &ReaderConfig) -> Result<Game, PgnError> {
    let tokens = tokenize(text)?;
    Ok(parse_tokens(&tokens, config)?)
}

pub fn parse(text: &str) -> Result<Game, PgnError> {
    parse_with(text, &ReaderConfig::default())
}
