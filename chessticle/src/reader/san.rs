use super::error::SyntaxError;
use crate::game::{Castling, CheckKind, HalfMove, Origin, PieceType, PromotionPieces, Square};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // piece, origin hint, capture, target, promotion, castling, check, suffix
    static ref SAN_RE: Regex = Regex::new(
        r"^(?:([PNBRQK])?([a-h]|[1-8]|[a-h][1-8])?(x)?([a-h][1-8])(?:=([A-Z]))?|(O-O(?:-O)?))(\+\+?|#)?([!?]{1,2})?$"
    )
    .expect("SAN regular expression is valid");
}

/// Numeric annotation glyph equivalent of a move suffix.
pub fn suffix_glyph(suffix: &str) -> Option<u8> {
    match suffix {
        "!" => Some(1),
        "?" => Some(2),
        "!!" => Some(3),
        "??" => Some(4),
        "!?" => Some(5),
        "?!" => Some(6),
        _ => None,
    }
}

/// Decodes a move written in standard algebraic notation.
///
/// Only the text is checked. Besides the grammar, a few rules that need no
/// board are enforced: only pawns promote, promotions go to N, B, R or Q,
/// and a king never gives check. A `!`/`?` suffix is stored as the move's
/// numeric annotation glyph.
pub fn decode_san(san: &str) -> Result<HalfMove, SyntaxError> {
    let not_san = || SyntaxError::NotAlgebraicNotation {
        san: san.to_string(),
    };

    let captures = SAN_RE.captures(san).ok_or_else(not_san)?;

    let piece = captures
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PieceType::try_from_char);
    let origin = match captures.get(2) {
        Some(m) => Some(Origin::try_from_str(m.as_str()).ok_or_else(not_san)?),
        None => None,
    };
    let capturing = captures.get(3).is_some();
    let target = match captures.get(4) {
        Some(m) => Some(Square::try_from_str(m.as_str()).ok_or_else(not_san)?),
        None => None,
    };
    let castling = captures.get(6).map(|m| match m.as_str() {
        "O-O-O" => Castling::QueenSide,
        _ => Castling::KingSide,
    });
    let check = captures.get(7).map(|m| match m.as_str() {
        "+" => CheckKind::Check,
        _ => CheckKind::Checkmate,
    });

    if piece.is_none() && origin.is_none() && target.is_none() && castling.is_none() {
        return Err(not_san());
    }

    let promotion = match captures.get(5).and_then(|m| m.as_str().chars().next()) {
        Some(letter) => {
            if piece.is_some_and(|piece| piece != PieceType::Pawn) {
                return Err(SyntaxError::OnlyPawnsCanPromote {
                    san: san.to_string(),
                });
            }
            Some(
                PromotionPieces::try_from_char(letter).ok_or_else(|| {
                    SyntaxError::InvalidPromotion {
                        san: san.to_string(),
                        piece: letter,
                    }
                })?,
            )
        }
        None => None,
    };

    if piece == Some(PieceType::King) {
        match check {
            Some(CheckKind::Check) => {
                return Err(SyntaxError::KingCannotGiveCheck {
                    san: san.to_string(),
                })
            }
            Some(CheckKind::Checkmate) => {
                return Err(SyntaxError::KingCannotGiveCheckmate {
                    san: san.to_string(),
                })
            }
            None => (),
        }
    }

    Ok(HalfMove {
        san: san.to_string(),
        piece,
        origin,
        capturing,
        target,
        promotion,
        castling,
        check,
        nag: captures.get(8).and_then(|m| suffix_glyph(m.as_str())),
        ..Default::default()
    })
}
