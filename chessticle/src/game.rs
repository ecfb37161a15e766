use std::collections::BTreeMap;
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum PieceType {
    Pawn,   // P
    Knight, // N
    Bishop, // B
    Rook,   // R
    Queen,  // Q
    King,   // K
}

impl PieceType {
    pub fn try_from_char(value: char) -> Option<Self> {
        match value {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    /// Letter used for this piece in algebraic notation.
    pub fn letter(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match &self {
                PieceType::Pawn => "pawn",
                PieceType::Knight => "knight",
                PieceType::Bishop => "bishop",
                PieceType::Rook => "rook",
                PieceType::Queen => "queen",
                PieceType::King => "king",
            }
        )
    }
}

#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum PromotionPieces {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl PromotionPieces {
    pub fn try_from_char(value: char) -> Option<Self> {
        match value {
            'N' => Some(PromotionPieces::Knight),
            'B' => Some(PromotionPieces::Bishop),
            'R' => Some(PromotionPieces::Rook),
            'Q' => Some(PromotionPieces::Queen),
            _ => None,
        }
    }
}

impl From<PromotionPieces> for PieceType {
    fn from(value: PromotionPieces) -> Self {
        match value {
            PromotionPieces::Knight => PieceType::Knight,
            PromotionPieces::Bishop => PieceType::Bishop,
            PromotionPieces::Rook => PieceType::Rook,
            PromotionPieces::Queen => PieceType::Queen,
        }
    }
}

impl fmt::Display for PromotionPieces {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        PieceType::from(*self).fmt(f)
    }
}

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

fn file_from_char(value: char) -> Option<u8> {
    FILES.iter().position(|&c| c == value).map(|file| file as u8)
}

fn rank_from_char(value: char) -> Option<u8> {
    match value.to_digit(10)? {
        rank @ 1..=8 => Some(rank as u8 - 1),
        _ => None,
    }
}

fn write_file(f: &mut fmt::Formatter, file: u8) -> fmt::Result {
    match FILES.get(usize::from(file)) {
        Some(letter) => write!(f, "{}", letter),
        None => write!(f, "?"),
    }
}

fn write_rank(f: &mut fmt::Formatter, rank: u8) -> fmt::Result {
    write!(f, "{}", u16::from(rank) + 1)
}

/// A board square, both coordinates 0-based (`a1` is file 0, rank 0).
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if usize::from(file) < FILES.len() && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn try_from_str(square_str: &str) -> Option<Square> {
        let mut chars = square_str.chars();
        let file = file_from_char(chars.next()?)?;
        let rank = rank_from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }

        Some(Square { file, rank })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_file(f, self.file)?;
        write_rank(f, self.rank)
    }
}

/// Disambiguation hint written before the target square. It is never
/// resolved against a position.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Origin {
    File(u8),
    Rank(u8),
    Square(Square),
}

impl Origin {
    pub fn try_from_str(origin_str: &str) -> Option<Origin> {
        let mut chars = origin_str.chars();
        let first = chars.next()?;
        match chars.next() {
            None => file_from_char(first)
                .map(Origin::File)
                .or_else(|| rank_from_char(first).map(Origin::Rank)),
            Some(_) => Square::try_from_str(origin_str).map(Origin::Square),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Origin::File(file) => write_file(f, *file),
            Origin::Rank(rank) => write_rank(f, *rank),
            Origin::Square(square) => square.fmt(f),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Castling {
    KingSide,
    QueenSide,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CheckKind {
    Check,
    Checkmate,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    #[default]
    Unknown,
}

impl GameResult {
    pub fn try_from_str(result_str: &str) -> Option<Self> {
        match result_str {
            "1-0" => Some(GameResult::WhiteWins),
            "0-1" => Some(GameResult::BlackWins),
            "1/2-1/2" => Some(GameResult::Draw),
            "*" => Some(GameResult::Unknown),
            _ => None,
        }
    }

    /// The game termination marker as written in PGN.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unknown => "*",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ply, decoded from its SAN text.
///
/// `target` is set for every move except castling, which sets `castling`
/// instead. A `promotion` never comes with a piece other than a pawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HalfMove {
    pub san: String,
    pub piece: Option<PieceType>,
    pub origin: Option<Origin>,
    pub capturing: bool,
    pub target: Option<Square>,
    pub promotion: Option<PromotionPieces>,
    pub castling: Option<Castling>,
    pub check: Option<CheckKind>,
    pub nag: Option<u8>,
    pub commentary: String,
    pub variations: Vec<Variation>,
}

impl HalfMove {
    pub fn is_king_side_castle(&self) -> bool {
        self.castling == Some(Castling::KingSide)
    }

    pub fn is_queen_side_castle(&self) -> bool {
        self.castling == Some(Castling::QueenSide)
    }

    pub fn gives_check(&self) -> bool {
        self.check == Some(CheckKind::Check)
    }

    pub fn gives_checkmate(&self) -> bool {
        self.check == Some(CheckKind::Checkmate)
    }
}

/// An alternate line branching off a half-move.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variation {
    pub commentary: String,
    pub moves: Vec<HalfMove>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Game {
    pub tags: BTreeMap<String, String>,
    /// Commentary found before the first move.
    pub commentary: String,
    pub result: GameResult,
    pub moves: Vec<HalfMove>,
}

impl Game {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    /// Number of half-moves in the main line.
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }
}
