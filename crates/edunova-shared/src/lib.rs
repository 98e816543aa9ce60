//! # edunova-shared
//!
//! Domain vocabulary shared by every EduNova admin crate: typed record
//! ids, the grade/subject catalog, record status flags, the symbolic
//! route table, and the pure field validators.
//!
//! Nothing in this crate performs I/O or holds mutable state; it exists
//! so the store and controller layers agree on one set of types.

pub mod routes;
pub mod types;
pub mod validate;

pub use routes::{ResourceKind, Route};
pub use types::{CourseId, FormLinkId, Grade, RecordStatus, SlotId, Subject, TeacherId};
pub use validate::{PasswordStrength, ValidationError};
