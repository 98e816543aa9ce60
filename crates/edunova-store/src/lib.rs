//! # edunova-store
//!
//! In-memory record stores for the EduNova admin pages: the teacher
//! roster, the course catalog, the student form-link registry, and the
//! timetable registry, plus the per-page activity log and JSON export
//! snapshots.
//!
//! All stores are transient page-session state: plain owned values,
//! ordered collections, append-only creation, and status-flag
//! soft-delete so raw counts and ordering survive deletion.  Every
//! mutating operation rejects before it mutates; a failed call leaves
//! the store exactly as it was.

pub mod activity;
pub mod courses;
pub mod export;
pub mod form_links;
pub mod models;
pub mod teachers;
pub mod timetable;

mod error;

pub use activity::{ActivityEntry, ActivityLog};
pub use courses::{CatalogStats, CourseCatalog};
pub use error::{Result, StoreError};
pub use export::ExportSnapshot;
pub use form_links::FormLinkRegistry;
pub use models::*;
pub use teachers::TeacherRoster;
pub use timetable::{ClassKey, DaySchedule, Timetable};
