use thiserror::Error;

/// Every failure class the engine can report. The calling dialog renders a
/// different message per class, so none of these may be collapsed into
/// another, and "sheet is full" is deliberately NOT here: a full sheet is an
/// ordinary `Ok(None)` outcome, not an error.
#[derive(Error, Debug)]
pub enum CaravanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    /// The text contains no full-name label line anywhere.
    #[error("no booking card found in text")]
    NoCard,

    /// No row in the search window (or the widened fallback window) looks
    /// like a people header. The sheet layout is unrecognized.
    #[error("no header row found in sheet rows {start}..{end}")]
    HeaderNotFound { start: usize, end: usize },

    /// A header row was found but lacks columns allocation cannot work
    /// without. Distinct from HeaderNotFound: the layout was recognized but
    /// is incomplete.
    #[error("sheet header is missing required columns: {0}")]
    MissingColumns(String),

    #[error("unrecognized room type: {0:?}")]
    UnknownRoomType(String),

    #[error("settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, CaravanError>;
