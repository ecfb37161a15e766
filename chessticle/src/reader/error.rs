use super::lexer::TokenKind;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexicalError {
    #[error("unterminated string starting at {start} (reached end of input at {offset})")]
    UnterminatedString { start: usize, offset: usize },

    #[error("unterminated commentary starting at {start} (reached end of input at {offset})")]
    UnterminatedCommentary { start: usize, offset: usize },

    #[error("expected numeric glyph at {offset}")]
    ExpectedNumericGlyph { offset: usize },

    #[error("invalid input character {character:?} (code point: {code_point}) at {offset}")]
    InvalidCharacter {
        character: char,
        code_point: u32,
        offset: usize,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unexpected token: {kind} (at {offset})")]
    UnexpectedToken { kind: TokenKind, offset: usize },

    #[error("unrecognized token: {kind} (at {offset})")]
    UnrecognizedToken { kind: TokenKind, offset: usize },

    #[error("expected {expected}, found {found} (at {offset})")]
    ExpectedToken {
        expected: &'static str,
        found: TokenKind,
        offset: usize,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    #[error("half-move is not in standard algebraic notation: {san}")]
    NotAlgebraicNotation { san: String },

    #[error("only pawns can promote: {san}")]
    OnlyPawnsCanPromote { san: String },

    #[error("invalid promotion to {piece}, must be one of N, B, R or Q: {san}")]
    InvalidPromotion { san: String, piece: char },

    #[error("kings cannot give check: {san}")]
    KingCannotGiveCheck { san: String },

    #[error("kings cannot give checkmate: {san}")]
    KingCannotGiveCheckmate { san: String },

    #[error("invalid numeric annotation glyph ${value}, must be 0-255 (at {offset})")]
    NumericGlyphOutOfRange { value: String, offset: usize },

    #[error("game termination marker inside a variation (at {offset})")]
    TerminationInVariation { offset: usize },

    #[error("variations nested deeper than {limit} (at {offset})")]
    VariationTooDeep { limit: usize, offset: usize },
}

/// Any failure of [`crate::parse`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PgnError {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
