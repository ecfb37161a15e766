use chessticle::{
    Castling, CheckKind, Game, GameResult, HalfMove, PieceType, PromotionPieces, Variation,
};
use std::collections::BTreeMap;

#[derive(Debug, PartialEq)]
pub enum MoveType {
    Normal,
    Capture,
    Promotion(PromotionPieces),
    PromotionWithCapture(PromotionPieces),
    KingsideCastling,
    QueensideCastling,
}

impl MoveType {
    pub fn name(&self) -> &'static str {
        match self {
            MoveType::Normal => "normal",
            MoveType::Capture => "capture",
            MoveType::Promotion(piece) => match piece {
                PromotionPieces::Knight => "promotion to knight",
                PromotionPieces::Bishop => "promotion to bishop",
                PromotionPieces::Rook => "promotion to rook",
                PromotionPieces::Queen => "promotion to queen",
            },
            MoveType::PromotionWithCapture(piece) => match piece {
                PromotionPieces::Knight => "promotion to knight with capture",
                PromotionPieces::Bishop => "promotion to bishop with capture",
                PromotionPieces::Rook => "promotion to rook with capture",
                PromotionPieces::Queen => "promotion to queen with capture",
            },
            MoveType::KingsideCastling => "kingside castling",
            MoveType::QueensideCastling => "queenside castling",
        }
    }
}

#[derive(Debug)]
pub struct DetailedMoveInfo {
    pub short: String,
    pub piece: PieceType,
    pub origin: Option<String>,
    pub target: Option<String>,
    pub move_type: MoveType,
    pub check_type: Option<CheckKind>,
    pub nag: Option<u8>,
    pub commentary: String,
    pub variations: Vec<DetailedVariation>,
}

#[derive(Debug)]
pub struct DetailedVariation {
    pub commentary: String,
    pub moves: Vec<DetailedMoveInfo>,
}

#[derive(Debug)]
pub struct DetailedMove {
    pub white: DetailedMoveInfo,
    pub black: Option<DetailedMoveInfo>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum GameEnding {
    #[default]
    Unfinished,
    Draw,
    WhiteWinsCheckmate,
    BlackWinsCheckmate,
    WhiteResigned,
    BlackResigned,
}

#[derive(Debug, Default)]
pub struct DetailedGame {
    pub tags: BTreeMap<String, String>,
    pub commentary: String,
    pub moves: Vec<DetailedMove>,
    pub ending: GameEnding,
}

fn move_type(mv: &HalfMove) -> MoveType {
    match (mv.castling, mv.promotion) {
        (Some(Castling::KingSide), _) => MoveType::KingsideCastling,
        (Some(Castling::QueenSide), _) => MoveType::QueensideCastling,
        (None, Some(piece)) if mv.capturing => MoveType::PromotionWithCapture(piece),
        (None, Some(piece)) => MoveType::Promotion(piece),
        (None, None) if mv.capturing => MoveType::Capture,
        (None, None) => MoveType::Normal,
    }
}

fn describe_move(mv: &HalfMove) -> DetailedMoveInfo {
    let piece = match mv.castling {
        Some(_) => PieceType::King,
        None => mv.piece.unwrap_or(PieceType::Pawn),
    };

    DetailedMoveInfo {
        short: mv.san.clone(),
        piece,
        origin: mv.origin.map(|origin| origin.to_string()),
        target: mv.target.map(|target| target.to_string()),
        move_type: move_type(mv),
        check_type: mv.check,
        nag: mv.nag,
        commentary: mv.commentary.clone(),
        variations: mv.variations.iter().map(describe_variation).collect(),
    }
}

fn describe_variation(variation: &Variation) -> DetailedVariation {
    DetailedVariation {
        commentary: variation.commentary.clone(),
        moves: variation.moves.iter().map(describe_move).collect(),
    }
}

fn game_ending(game: &Game) -> GameEnding {
    let checkmate = game.moves.last().is_some_and(HalfMove::gives_checkmate);

    match game.result {
        GameResult::WhiteWins => {
            if checkmate {
                GameEnding::WhiteWinsCheckmate
            } else {
                GameEnding::BlackResigned
            }
        }
        GameResult::BlackWins => {
            if checkmate {
                GameEnding::BlackWinsCheckmate
            } else {
                GameEnding::WhiteResigned
            }
        }
        GameResult::Draw => GameEnding::Draw,
        GameResult::Unknown => GameEnding::Unfinished,
    }
}

/// Groups the main line into numbered full moves and describes every ply,
/// variations included.
pub fn describe_game(game: &Game) -> DetailedGame {
    let moves = game
        .moves
        .chunks(2)
        .filter_map(|pair| match pair {
            [white, black] => Some(DetailedMove {
                white: describe_move(white),
                black: Some(describe_move(black)),
            }),
            [white] => Some(DetailedMove {
                white: describe_move(white),
                black: None,
            }),
            _ => None,
        })
        .collect();

    DetailedGame {
        tags: game.tags.clone(),
        commentary: game.commentary.clone(),
        moves,
        ending: game_ending(game),
    }
}
