use std::path::PathBuf;

use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum WordMasterError {
    #[snafu(display("quality {value} is outside 0..=5"))]
    InvalidQuality { value: u8 },
    #[snafu(display("no word with id {id}"))]
    WordNotFound { id: String },
    #[snafu(display("the review session has no words left"))]
    SessionFinished,
    #[snafu(display("{}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{}: {source}", path.display()))]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidInput,
}

pub type Result<T, E = WordMasterError> = std::result::Result<T, E>;
