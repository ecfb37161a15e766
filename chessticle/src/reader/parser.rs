use super::error::SyntaxError;
use super::lexer::{Token, TokenKind};
use super::san::decode_san;
use super::ReaderConfig;
use crate::game::{Game, GameResult, HalfMove, Variation};

/// Position in the token sequence. Parsing functions take a cursor by value
/// and hand back the cursor past whatever they consumed.
#[derive(Copy, Clone, Debug)]
struct Cursor<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, index: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self, kind: TokenKind) -> Option<&'a Token> {
        self.peek().filter(|token| token.kind == kind)
    }

    fn advance(self) -> Self {
        Cursor {
            tokens: self.tokens,
            index: self.index + 1,
        }
    }

    fn expect(self, kind: TokenKind) -> Result<(&'a Token, Cursor<'a>), SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => Ok((token, self.advance())),
            Some(token) => Err(SyntaxError::ExpectedToken {
                expected: kind.name(),
                found: token.kind,
                offset: token.offset,
            }),
            None => Err(SyntaxError::UnexpectedEndOfInput {
                expected: kind.name(),
            }),
        }
    }
}

/// What a symbol or asterisk in movetext turned out to be.
#[derive(Debug)]
enum Ply {
    Move(HalfMove),
    Termination(GameResult),
}

/// Builds a game from a token sequence. Tag pairs and leading commentary are
/// accepted until the first move number opens the movetext.
pub fn parse_tokens(tokens: &[Token], config: &ReaderConfig) -> Result<Game, SyntaxError> {
    let mut game = Game::default();
    let mut cursor = Cursor::new(tokens);
    let mut tags_closed = false;

    while let Some(token) = cursor.peek() {
        match token.kind {
            TokenKind::OpenBracket if !tags_closed => {
                let ((name, value), next) = tag_pair(cursor)?;
                tracing::trace!(%name, %value, "tag");
                game.tags.insert(name, value);
                cursor = next;
            }
            TokenKind::Commentary if !tags_closed => {
                game.commentary.push_str(&token.text);
                cursor = cursor.advance();
            }
            TokenKind::Commentary => {
                // Left over after a move's variations; belongs to that move
                match game.moves.last_mut() {
                    Some(mv) => append_commentary(&mut mv.commentary, &token.text),
                    None => append_commentary(&mut game.commentary, &token.text),
                }
                cursor = cursor.advance();
            }
            TokenKind::Integer => {
                tags_closed = true;
                cursor = cursor.advance();
            }
            TokenKind::Periods | TokenKind::Escape => cursor = cursor.advance(),
            TokenKind::Symbol | TokenKind::Asterisk if tags_closed => {
                let (ply, next) = half_move(cursor, config, 0)?;
                match ply {
                    Ply::Move(mv) => game.moves.push(mv),
                    Ply::Termination(result) => {
                        tracing::trace!(%result, "game termination marker");
                        game.result = result;
                    }
                }
                cursor = next;
            }
            TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::OpenParen
            | TokenKind::CloseParen => {
                return Err(SyntaxError::UnexpectedToken {
                    kind: token.kind,
                    offset: token.offset,
                })
            }
            TokenKind::Symbol
            | TokenKind::Asterisk
            | TokenKind::NumericGlyph
            | TokenKind::Reserved
            | TokenKind::String => {
                return Err(SyntaxError::UnrecognizedToken {
                    kind: token.kind,
                    offset: token.offset,
                })
            }
        }
    }

    tracing::debug!(
        tags = game.tags.len(),
        plies = game.moves.len(),
        result = %game.result,
        "parsed PGN game"
    );

    Ok(game)
}

/// Joins a further commentary onto one already collected, space separated.
fn append_commentary(commentary: &mut String, text: &str) {
    if !commentary.is_empty() {
        commentary.push(' ');
    }
    commentary.push_str(text);
}

/// `[` name value `]`, with the cursor on the open bracket.
fn tag_pair(cursor: Cursor) -> Result<((String, String), Cursor), SyntaxError> {
    let (_, cursor) = cursor.expect(TokenKind::OpenBracket)?;
    let (name, cursor) = cursor.expect(TokenKind::Symbol)?;
    let (value, cursor) = cursor.expect(TokenKind::String)?;
    let (_, cursor) = cursor.expect(TokenKind::CloseBracket)?;

    Ok(((name.text.clone(), value.text.clone()), cursor))
}

/// Parses a move and everything attached to it: a numeric annotation glyph,
/// a commentary and any number of variations, in that order.
///
/// `depth` is the number of variations enclosing this move.
fn half_move<'a>(
    cursor: Cursor<'a>,
    config: &ReaderConfig,
    depth: usize,
) -> Result<(Ply, Cursor<'a>), SyntaxError> {
    const EXPECTED: &str = "symbol or asterisk";

    let token = cursor
        .peek()
        .ok_or(SyntaxError::UnexpectedEndOfInput { expected: EXPECTED })?;
    if token.kind != TokenKind::Symbol && token.kind != TokenKind::Asterisk {
        return Err(SyntaxError::ExpectedToken {
            expected: EXPECTED,
            found: token.kind,
            offset: token.offset,
        });
    }
    let mut cursor = cursor.advance();

    if token.kind == TokenKind::Asterisk {
        return Ok((Ply::Termination(GameResult::Unknown), cursor));
    }
    if let Some(result) = GameResult::try_from_str(&token.text) {
        return Ok((Ply::Termination(result), cursor));
    }

    let mut mv = decode_san(&token.text)?;

    // An inline suffix already set the glyph; a following $N is then left alone
    if mv.nag.is_none() {
        if let Some(glyph) = cursor.peek_kind(TokenKind::NumericGlyph) {
            let value = glyph
                .text
                .parse::<u8>()
                .map_err(|_| SyntaxError::NumericGlyphOutOfRange {
                    value: glyph.text.clone(),
                    offset: glyph.offset,
                })?;
            mv.nag = Some(value);
            cursor = cursor.advance();
        }
    }

    if let Some(commentary) = cursor.peek_kind(TokenKind::Commentary) {
        mv.commentary = commentary.text.clone();
        cursor = cursor.advance();
    }

    while cursor.peek_kind(TokenKind::OpenParen).is_some() {
        let (line, next) = variation(cursor, config, depth + 1)?;
        mv.variations.push(line);
        cursor = next;
    }

    tracing::trace!(
        san = %mv.san,
        nag = ?mv.nag,
        variations = mv.variations.len(),
        "half-move"
    );

    Ok((Ply::Move(mv), cursor))
}

/// `(` [commentary] movetext `)`, with the cursor on the open paren. Move
/// numbers and periods inside are skipped without checking them.
fn variation<'a>(
    cursor: Cursor<'a>,
    config: &ReaderConfig,
    depth: usize,
) -> Result<(Variation, Cursor<'a>), SyntaxError> {
    let (open, mut cursor) = cursor.expect(TokenKind::OpenParen)?;

    if let Some(limit) = config.max_variation_depth {
        if depth > limit {
            return Err(SyntaxError::VariationTooDeep {
                limit,
                offset: open.offset,
            });
        }
    }

    let mut line = Variation::default();

    match cursor.peek() {
        Some(token) if token.kind == TokenKind::Commentary => {
            line.commentary = token.text.clone();
            cursor = cursor.advance();
            cursor.expect(TokenKind::Integer)?;
        }
        Some(token) if token.kind == TokenKind::Integer => (),
        Some(token) => {
            return Err(SyntaxError::ExpectedToken {
                expected: "integer or commentary",
                found: token.kind,
                offset: token.offset,
            })
        }
        None => {
            return Err(SyntaxError::UnexpectedEndOfInput {
                expected: "integer or commentary",
            })
        }
    }

    loop {
        let token = cursor
            .peek()
            .ok_or(SyntaxError::UnexpectedEndOfInput {
                expected: TokenKind::CloseParen.name(),
            })?;

        match token.kind {
            TokenKind::CloseParen => {
                cursor = cursor.advance();
                break;
            }
            TokenKind::Integer | TokenKind::Periods => cursor = cursor.advance(),
            TokenKind::Commentary => {
                match line.moves.last_mut() {
                    Some(mv) => append_commentary(&mut mv.commentary, &token.text),
                    None => append_commentary(&mut line.commentary, &token.text),
                }
                cursor = cursor.advance();
            }
            _ => {
                let (ply, next) = half_move(cursor, config, depth)?;
                match ply {
                    Ply::Move(mv) => line.moves.push(mv),
                    Ply::Termination(_) => {
                        return Err(SyntaxError::TerminationInVariation {
                            offset: token.offset,
                        })
                    }
                }
                cursor = next;
            }
        }
    }

    tracing::trace!(depth, plies = line.moves.len(), "variation");

    Ok((line, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            text: text.to_string(),
            offset: 0,
        }
    }

    fn parse(tokens: &[Token]) -> Result<Game, SyntaxError> {
        parse_tokens(tokens, &ReaderConfig::default())
    }

    #[test]
    fn cursor_expect_advances() {
        let tokens = [token(TokenKind::Integer, "1"), token(TokenKind::Symbol, "e4")];
        let cursor = Cursor::new(&tokens);

        let (first, cursor) = cursor.expect(TokenKind::Integer).unwrap();
        assert_eq!(first.text, "1");
        assert_eq!(cursor.index, 1);
        assert!(cursor.peek_kind(TokenKind::Symbol).is_some());

        let (_, cursor) = cursor.expect(TokenKind::Symbol).unwrap();
        assert_eq!(
            cursor.expect(TokenKind::Symbol).unwrap_err(),
            SyntaxError::UnexpectedEndOfInput { expected: "symbol" }
        );
    }

    #[test]
    fn tag_pair_from_tokens() {
        let game = parse(&[
            token(TokenKind::OpenBracket, "["),
            token(TokenKind::Symbol, "Foo"),
            token(TokenKind::String, "bar"),
            token(TokenKind::CloseBracket, "]"),
        ])
        .unwrap();
        assert_eq!(game.tag("Foo"), Some("bar"));
        assert!(game.moves.is_empty());
    }

    #[test]
    fn tag_pair_requires_string() {
        assert_eq!(
            parse(&[
                token(TokenKind::OpenBracket, "["),
                token(TokenKind::Symbol, "Foo"),
                token(TokenKind::Symbol, "bar"),
                token(TokenKind::CloseBracket, "]"),
            ]),
            Err(SyntaxError::ExpectedToken {
                expected: "string",
                found: TokenKind::Symbol,
                offset: 0
            })
        );
    }

    #[test]
    fn half_move_returns_cursor_past_attachments() {
        let tokens = [
            token(TokenKind::Symbol, "e4"),
            token(TokenKind::NumericGlyph, "10"),
            token(TokenKind::Commentary, "fine"),
            token(TokenKind::Symbol, "e5"),
        ];
        let (ply, cursor) = half_move(Cursor::new(&tokens), &ReaderConfig::default(), 0).unwrap();
        let Ply::Move(mv) = ply else {
            panic!("expected a move");
        };
        assert_eq!(mv.nag, Some(10));
        assert_eq!(mv.commentary, "fine");
        assert_eq!(cursor.index, 3);
    }

    #[test]
    fn termination_markers_are_not_moves() {
        for (kind, text, result) in [
            (TokenKind::Symbol, "1-0", GameResult::WhiteWins),
            (TokenKind::Symbol, "0-1", GameResult::BlackWins),
            (TokenKind::Symbol, "1/2-1/2", GameResult::Draw),
            (TokenKind::Asterisk, "*", GameResult::Unknown),
        ] {
            let tokens = [token(kind, text)];
            let (ply, cursor) =
                half_move(Cursor::new(&tokens), &ReaderConfig::default(), 0).unwrap();
            assert!(matches!(ply, Ply::Termination(found) if found == result));
            assert_eq!(cursor.index, 1);
        }
    }

    #[test]
    fn unaccounted_close_bracket() {
        assert_eq!(
            parse(&[token(TokenKind::CloseBracket, "]")]),
            Err(SyntaxError::UnexpectedToken {
                kind: TokenKind::CloseBracket,
                offset: 0
            })
        );
    }

    #[test]
    fn move_before_move_number_is_unrecognized() {
        for (kind, text) in [(TokenKind::Symbol, "e4"), (TokenKind::Asterisk, "*")] {
            assert_eq!(
                parse(&[token(kind, text)]),
                Err(SyntaxError::UnrecognizedToken { kind, offset: 0 })
            );
        }
    }

    #[test]
    fn stray_commentary_joins_previous() {
        let mut commentary = String::from("first");
        append_commentary(&mut commentary, "second");
        assert_eq!(commentary, "first second");

        let mut empty = String::new();
        append_commentary(&mut empty, "only");
        assert_eq!(empty, "only");
    }

    #[test]
    fn reserved_token_is_unrecognized() {
        assert_eq!(
            parse(&[token(TokenKind::Reserved, "<")]),
            Err(SyntaxError::UnrecognizedToken {
                kind: TokenKind::Reserved,
                offset: 0
            })
        );
    }
}
