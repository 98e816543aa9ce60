use edunova_shared::{Grade, Subject};
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An active course already covers this grade and subject.
    #[error("A course for {grade} - {subject} already exists! Use Update Course instead.")]
    DuplicateCourse { grade: Grade, subject: Subject },

    /// An active teacher already uses this email.
    #[error("A teacher with email {email} already exists")]
    DuplicateTeacher { email: String },

    /// This exact form link was already registered.
    #[error("This Google Form link already exists!")]
    DuplicateFormLink,

    /// The new value is identical to the current one.
    #[error("The new link is the same as the current link. No update needed.")]
    UnchangedLink,

    /// No active record matched the lookup key.
    #[error("Record not found")]
    NotFound,

    /// A timetable slot must end after it starts.
    #[error("Slot end time must be after its start time")]
    InvalidTimeRange,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
