mod interpreter;
mod serializer;

use self::interpreter::describe_game;
use self::serializer::{write_json, write_yaml};
use anyhow::Result;
use chessticle::Game;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

pub fn write_game(game: &Game, path: &PathBuf, format: OutputFormat) -> Result<()> {
    let detailed_game = describe_game(game);
    tracing::debug!(
        moves = detailed_game.moves.len(),
        ending = ?detailed_game.ending,
        "described game"
    );

    match format {
        OutputFormat::Yaml => write_yaml(path, &detailed_game),
        OutputFormat::Json => write_json(path, &detailed_game),
    }
}
