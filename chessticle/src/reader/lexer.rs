use super::error::LexicalError;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until, take_while, take_while1};
use nom::character::complete::{char, digit1, not_line_ending, satisfy};
use nom::combinator::{recognize, value};
use nom::error::Error as NomError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use nom::IResult;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Commentary,
    Periods,
    Reserved,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    NumericGlyph,
    Asterisk,
    String,
    Integer,
    Symbol,
    Escape,
}

impl TokenKind {
    pub const fn name(&self) -> &'static str {
        match self {
            TokenKind::Commentary => "commentary",
            TokenKind::Periods => "periods",
            TokenKind::Reserved => "reserved",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::OpenBracket => "open-bracket",
            TokenKind::CloseBracket => "close-bracket",
            TokenKind::NumericGlyph => "numeric-glyph",
            TokenKind::Asterisk => "asterisk",
            TokenKind::String => "string",
            TokenKind::Integer => "integer",
            TokenKind::Symbol => "symbol",
            TokenKind::Escape => "escape",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A lexical unit of PGN text.
///
/// `offset` is the byte offset of the token in the input after line endings
/// have been normalized to `\n`. The meaning of `text` depends on the kind:
/// commentary and escape tokens hold their body without delimiters, strings
/// hold the unescaped value and numeric glyphs hold the digits without `$`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

trait ErrorExplainer<I, O> {
    fn explain(self, error: LexicalError) -> Result<(I, O), LexicalError>;
}

impl<I, O> ErrorExplainer<I, O> for IResult<I, O, NomError<I>> {
    fn explain(self, error: LexicalError) -> Result<(I, O), LexicalError> {
        self.map_err(|_| error)
    }
}

fn line_commentary(input: &str) -> IResult<&str, &str> {
    preceded(char(';'), not_line_ending)(input)
}

fn brace_commentary(input: &str) -> IResult<&str, &str> {
    delimited(char('{'), take_until("}"), char('}'))(input)
}

fn periods(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == '.')(input)
}

fn numeric_glyph(input: &str) -> IResult<&str, &str> {
    preceded(char('$'), digit1)(input)
}

fn escape_line(input: &str) -> IResult<&str, &str> {
    preceded(char('%'), not_line_ending)(input)
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-_+#=:/!?".contains(c)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphanumeric()),
        take_while(is_symbol_char),
    ))(input)
}

/// `\\` and `\"` collapse to the escaped character; any other backslash is
/// kept as is.
fn string_fragment(input: &str) -> IResult<&str, &str> {
    alt((
        is_not("\\\""),
        value("\\", tag("\\\\")),
        value("\"", tag("\\\"")),
        tag("\\"),
    ))(input)
}

fn string_literal(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(string_fragment, String::new, |mut collected, fragment| {
            collected.push_str(fragment);
            collected
        }),
        char('"'),
    )(input)
}

const BYTE_ORDER_MARK: char = '\u{feff}';

fn normalize_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

fn consumed(input: &str, remaining: &str) -> usize {
    input.len() - remaining.len()
}

/// Splits PGN text into tokens. Fails on the first lexical error, never
/// returning a partial token list.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    let text = normalize_line_endings(input);
    let mut tokens = Vec::new();
    let mut offset = 0usize;

    while let Some(current) = text[offset..].chars().next() {
        let rest = &text[offset..];
        let invalid = LexicalError::InvalidCharacter {
            character: current,
            code_point: current as u32,
            offset,
        };

        let (token, length) = match current {
            ';' => {
                let (remaining, body) = line_commentary(rest).explain(invalid)?;
                (
                    Some((TokenKind::Commentary, body.to_string())),
                    consumed(rest, remaining),
                )
            }
            '{' => {
                let (remaining, body) =
                    brace_commentary(rest).explain(LexicalError::UnterminatedCommentary {
                        start: offset,
                        offset: text.len(),
                    })?;
                (
                    Some((TokenKind::Commentary, body.to_string())),
                    consumed(rest, remaining),
                )
            }
            '.' => {
                let (remaining, dots) = periods(rest).explain(invalid)?;
                (
                    Some((TokenKind::Periods, dots.to_string())),
                    consumed(rest, remaining),
                )
            }
            '<' | '>' => (Some((TokenKind::Reserved, current.to_string())), 1),
            '(' => (Some((TokenKind::OpenParen, current.to_string())), 1),
            ')' => (Some((TokenKind::CloseParen, current.to_string())), 1),
            '[' => (Some((TokenKind::OpenBracket, current.to_string())), 1),
            ']' => (Some((TokenKind::CloseBracket, current.to_string())), 1),
            '*' => (Some((TokenKind::Asterisk, current.to_string())), 1),
            '$' => {
                let (remaining, digits) = numeric_glyph(rest)
                    .explain(LexicalError::ExpectedNumericGlyph { offset })?;
                (
                    Some((TokenKind::NumericGlyph, digits.to_string())),
                    consumed(rest, remaining),
                )
            }
            '"' => {
                let (remaining, value) =
                    string_literal(rest).explain(LexicalError::UnterminatedString {
                        start: offset,
                        offset: text.len(),
                    })?;
                (
                    Some((TokenKind::String, value)),
                    consumed(rest, remaining),
                )
            }
            '%' => {
                // Only meaningful in the first column
                if offset == 0 || text[..offset].ends_with('\n') {
                    let (remaining, body) = escape_line(rest).explain(invalid)?;
                    (
                        Some((TokenKind::Escape, body.to_string())),
                        consumed(rest, remaining),
                    )
                } else {
                    (None, 1)
                }
            }
            c if c.is_ascii_alphanumeric() => {
                let (remaining, word) = symbol(rest).explain(invalid)?;
                let kind = if word.bytes().all(|b| b.is_ascii_digit()) {
                    TokenKind::Integer
                } else {
                    TokenKind::Symbol
                };
                (Some((kind, word.to_string())), consumed(rest, remaining))
            }
            c if c.is_whitespace() || c == BYTE_ORDER_MARK => (None, c.len_utf8()),
            _ => return Err(invalid),
        };

        if let Some((kind, value)) = token {
            tokens.push(Token {
                kind,
                text: value,
                offset,
            });
        }
        offset += length;
    }

    tracing::debug!(tokens = tokens.len(), bytes = text.len(), "tokenized PGN input");

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|token| token.kind).collect()
    }

    fn single(input: &str) -> Token {
        let mut tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 1, "expected one token for {:?}", input);
        tokens.remove(0)
    }

    #[test]
    fn semicolon_commentary_ends_at_line_end() {
        let tokens = tokenize("; foo\nfoo").unwrap();
        assert_eq!(kinds(&tokens), [TokenKind::Commentary, TokenKind::Symbol]);
        assert_eq!(tokens[0].text, " foo");
        assert_eq!(tokens[1].offset, 6);
    }

    #[test]
    fn semicolon_commentary_ends_at_end_of_input() {
        let token = single("; foo");
        assert_eq!(token.kind, TokenKind::Commentary);
        assert_eq!(token.text, " foo");
    }

    #[test]
    fn curly_commentary() {
        let token = single("{ foo }");
        assert_eq!(token.kind, TokenKind::Commentary);
        assert_eq!(token.text, " foo ");
    }

    #[test]
    fn curly_commentary_spans_lines() {
        let token = single("{first\r\nsecond}");
        assert_eq!(token.text, "first\nsecond");
    }

    #[test]
    fn unterminated_curly_commentary() {
        assert_eq!(
            tokenize("e4 { foo"),
            Err(LexicalError::UnterminatedCommentary {
                start: 3,
                offset: 8
            })
        );
    }

    #[test]
    fn integer_and_periods() {
        let tokens = tokenize("42...").unwrap();
        assert_eq!(kinds(&tokens), [TokenKind::Integer, TokenKind::Periods]);
        assert_eq!(tokens[0].text, "42");
        assert_eq!(tokens[1].text, "...");
    }

    #[test]
    fn single_character_tokens() {
        let tokens = tokenize("[]()<>*").unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::Reserved,
                TokenKind::Reserved,
                TokenKind::Asterisk,
            ]
        );
        assert_eq!(tokens[4].text, "<");
        assert_eq!(tokens[5].text, ">");
        assert_eq!(tokens[6].offset, 6);
    }

    #[test]
    fn symbol_with_punctuation() {
        let token = single("a2-+#=:");
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.text, "a2-+#=:");
    }

    #[test]
    fn symbol_keeps_move_suffix_and_result_slash() {
        assert_eq!(single("Nf3!?").text, "Nf3!?");

        let token = single("1/2-1/2");
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.text, "1/2-1/2");
    }

    #[test]
    fn symbol_stops_at_delimiters() {
        let tokens = tokenize("e4(d4)").unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Symbol,
                TokenKind::OpenParen,
                TokenKind::Symbol,
                TokenKind::CloseParen,
            ]
        );
    }

    #[test]
    fn string() {
        let token = single("\"foo\"");
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.text, "foo");
    }

    #[test]
    fn string_with_escapes() {
        let token = single(r#""\"\\\t""#);
        assert_eq!(token.text, r#""\\t"#);
    }

    #[test]
    fn empty_string_and_lone_backslash() {
        assert_eq!(single("\"\"").text, "");
        assert_eq!(single(r#""a\b""#).text, r"a\b");
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        assert_eq!(
            tokenize(r#""foo\""#),
            Err(LexicalError::UnterminatedString {
                start: 0,
                offset: 6
            })
        );
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        let tokens = tokenize("\u{feff}[Foo \"bar\"]").unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::OpenBracket,
                TokenKind::Symbol,
                TokenKind::String,
                TokenKind::CloseBracket,
            ]
        );
        assert_eq!(tokens[0].offset, 3);
        assert_eq!(tokens[2].text, "bar");
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize("\"foo"),
            Err(LexicalError::UnterminatedString {
                start: 0,
                offset: 4
            })
        );
    }

    #[test]
    fn tag_pair() {
        let tokens = tokenize("[Foo \"foo\"]").unwrap();
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::OpenBracket,
                TokenKind::Symbol,
                TokenKind::String,
                TokenKind::CloseBracket,
            ]
        );
        assert_eq!(tokens[1].text, "Foo");
        assert_eq!(tokens[2].text, "foo");
    }

    #[test]
    fn numeric_glyph_keeps_digits_only() {
        let token = single("$20");
        assert_eq!(token.kind, TokenKind::NumericGlyph);
        assert_eq!(token.text, "20");
        assert_eq!(token.text.parse::<u8>(), Ok(20));
    }

    #[test]
    fn large_numeric_glyph_is_lexically_valid() {
        assert_eq!(single("$23489").text, "23489");
    }

    #[test]
    fn invalid_numeric_glyph() {
        assert_eq!(
            tokenize("e4 $foo"),
            Err(LexicalError::ExpectedNumericGlyph { offset: 3 })
        );
    }

    #[test]
    fn escape_on_first_line() {
        let token = single("% escaped");
        assert_eq!(token.kind, TokenKind::Escape);
        assert_eq!(token.text, " escaped");
    }

    #[test]
    fn escape_after_newline() {
        let tokens = tokenize("foo\r% escaped\nbar").unwrap();
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Symbol, TokenKind::Escape, TokenKind::Symbol]
        );
        assert_eq!(tokens[1].text, " escaped");
    }

    #[test]
    fn percent_outside_first_column_is_ignored() {
        let tokens = tokenize("foo % bar").unwrap();
        assert_eq!(kinds(&tokens), [TokenKind::Symbol, TokenKind::Symbol]);
    }

    #[test]
    fn invalid_input_character() {
        assert_eq!(
            tokenize("\u{1}"),
            Err(LexicalError::InvalidCharacter {
                character: '\u{1}',
                code_point: 1,
                offset: 0
            })
        );
    }

    #[test]
    fn whitespace_only_input() {
        assert_eq!(tokenize(" \t\r\n\n"), Ok(vec![]));
    }
}
