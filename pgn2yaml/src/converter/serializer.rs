use crate::converter::interpreter::{
    DetailedGame, DetailedMove, DetailedMoveInfo, DetailedVariation, GameEnding, MoveType,
};
use anyhow::{Context, Result};
use chessticle::CheckKind;
use serde::ser::SerializeMap;
use serde::Serialize;
use std::path::PathBuf;

impl Serialize for DetailedMoveInfo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let optional = [
            self.origin.is_some(),
            self.target.is_some(),
            self.move_type != MoveType::Normal,
            self.check_type.is_some(),
            self.nag.is_some(),
            !self.commentary.is_empty(),
            !self.variations.is_empty(),
        ];
        let entries = 2 + optional.iter().filter(|present| **present).count();

        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry("short", &self.short)?;
        map.serialize_entry("piece", &self.piece.to_string())?;
        if let Some(origin) = &self.origin {
            map.serialize_entry("origin", origin)?;
        }
        if let Some(target) = &self.target {
            map.serialize_entry("target", target)?;
        }
        if self.move_type != MoveType::Normal {
            map.serialize_entry("type", self.move_type.name())?;
        }

        if let Some(check_type) = &self.check_type {
            map.serialize_entry(
                "check",
                match check_type {
                    CheckKind::Check => "check",
                    CheckKind::Checkmate => "checkmate",
                },
            )?;
        }

        if let Some(nag) = self.nag {
            map.serialize_entry("nag", &nag)?;
        }
        if !self.commentary.is_empty() {
            map.serialize_entry("commentary", &self.commentary)?;
        }
        if !self.variations.is_empty() {
            map.serialize_entry("variations", &self.variations)?;
        }

        map.end()
    }
}

impl Serialize for DetailedVariation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.commentary.is_empty() {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("moves", &self.moves)?;
            map.end()
        } else {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("commentary", &self.commentary)?;
            map.serialize_entry("moves", &self.moves)?;
            map.end()
        }
    }
}

impl Serialize for DetailedMove {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(black) = &self.black {
            let mut map = serializer.serialize_map(Some(2))?;

            map.serialize_entry("white", &self.white)?;
            map.serialize_entry("black", &black)?;

            map.end()
        } else {
            let mut map = serializer.serialize_map(Some(1))?;

            map.serialize_entry("white", &self.white)?;

            map.end()
        }
    }
}

struct SerializedMoveList<'a>(&'a [DetailedMove]);

impl Serialize for SerializedMoveList<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (index, mv) in self.0.iter().enumerate() {
            let move_number = index + 1;
            map.serialize_entry(&move_number, mv)?;
        }

        map.end()
    }
}

struct SerializedGameEnding(GameEnding);

impl Serialize for SerializedGameEnding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;

        let (result_str, reason_str) = match self.0 {
            GameEnding::Unfinished => ("*", "unfinished"),
            GameEnding::Draw => ("1/2-1/2", "draw"),
            GameEnding::WhiteWinsCheckmate => ("1-0", "checkmate"),
            GameEnding::BlackWinsCheckmate => ("0-1", "checkmate"),
            GameEnding::WhiteResigned => ("0-1", "resignation"),
            GameEnding::BlackResigned => ("1-0", "resignation"),
        };
        map.serialize_entry("result", result_str)?;
        map.serialize_entry("reason", reason_str)?;

        map.end()
    }
}

impl Serialize for DetailedGame {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let entries = if self.commentary.is_empty() { 3 } else { 4 };
        let mut map = serializer.serialize_map(Some(entries))?;

        map.serialize_entry("tags", &self.tags)?;
        if !self.commentary.is_empty() {
            map.serialize_entry("commentary", &self.commentary)?;
        }

        map.serialize_entry("ending", &SerializedGameEnding(self.ending))?;
        map.serialize_entry("moves", &SerializedMoveList(&self.moves))?;

        map.end()
    }
}

pub fn write_yaml(yaml_path: &PathBuf, game: &DetailedGame) -> Result<()> {
    let output = std::fs::File::create(yaml_path).context(format!(
        "Could not open file {} for writing",
        yaml_path.to_string_lossy()
    ))?;

    serde_yaml::to_writer(output, game).context(format!(
        "Error writing YAML data to {}",
        yaml_path.to_string_lossy()
    ))
}

pub fn write_json(json_path: &PathBuf, game: &DetailedGame) -> Result<()> {
    let output = std::fs::File::create(json_path).context(format!(
        "Could not open file {} for writing",
        json_path.to_string_lossy()
    ))?;

    serde_json::to_writer_pretty(output, game).context(format!(
        "Error writing JSON data to {}",
        json_path.to_string_lossy()
    ))
}

#[cfg(test)]
mod tests {
    use crate::converter::interpreter::describe_game;

    #[test]
    fn json_document() {
        let game = chessticle::parse(
            "[Event \"Test\"]\n{intro} 1. e4 {king pawn} (1. d4 $14) e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0",
        )
        .unwrap();
        let value = serde_json::to_value(describe_game(&game)).unwrap();

        assert_eq!(value["tags"]["Event"], "Test");
        assert_eq!(value["commentary"], "intro");
        assert_eq!(value["ending"]["result"], "1-0");
        assert_eq!(value["ending"]["reason"], "checkmate");

        let first = &value["moves"]["1"]["white"];
        assert_eq!(first["short"], "e4");
        assert_eq!(first["piece"], "pawn");
        assert_eq!(first["commentary"], "king pawn");
        assert_eq!(first["variations"][0]["moves"][0]["short"], "d4");
        assert_eq!(first["variations"][0]["moves"][0]["nag"], 14);
        assert!(first.get("type").is_none());

        let mate = &value["moves"]["4"]["white"];
        assert_eq!(mate["type"], "capture");
        assert_eq!(mate["check"], "checkmate");
        assert!(value["moves"]["4"].get("black").is_none());
    }

    #[test]
    fn yaml_document() {
        let game = chessticle::parse("1. O-O *").unwrap();
        let yaml = serde_yaml::to_string(&describe_game(&game)).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["ending"]["result"].as_str(), Some("*"), "{}", yaml);
        assert_eq!(value["ending"]["reason"].as_str(), Some("unfinished"));
        assert_eq!(
            value["moves"][1]["white"]["type"].as_str(),
            Some("kingside castling")
        );
        assert_eq!(value["moves"][1]["white"]["piece"].as_str(), Some("king"));
    }
}
