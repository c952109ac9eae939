// timetable-pdf: error taxonomy

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Required table not found: {0}")]
    MissingTable(String),
    #[error("Invalid layout: {0}")]
    Layout(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("Failed to load font: {0}")]
    Font(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
