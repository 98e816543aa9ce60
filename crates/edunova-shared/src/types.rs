//! Core identifier and catalog types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Record ids
// ---------------------------------------------------------------------------

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a teacher roster record.
    TeacherId
);
uuid_id!(
    /// Identifier of a course catalog record.
    CourseId
);
uuid_id!(
    /// Identifier of a student form-link record.
    FormLinkId
);
uuid_id!(
    /// Identifier of a single timetable slot.
    SlotId
);

// ---------------------------------------------------------------------------
// Record status
// ---------------------------------------------------------------------------

/// Soft-delete flag carried by every store record.  Deactivated records
/// stay in place so ordering and raw counts survive deletion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

// ---------------------------------------------------------------------------
// Grade
// ---------------------------------------------------------------------------

/// A school grade, 1 through 12.  Serialized as the `grade-N` slug the
/// admin pages use in their select inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    /// Construct from a grade number.  Returns `None` outside 1..=12.
    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    /// Parse a `grade-N` slug, e.g. `"grade-7"`.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let n = slug.strip_prefix("grade-")?.parse().ok()?;
        Self::new(n)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The slug form used in form values, e.g. `"grade-7"`.
    pub fn slug(self) -> String {
        format!("grade-{}", self.0)
    }

    /// The human-readable form, e.g. `"Grade 7"`.
    pub fn display_name(self) -> String {
        format!("Grade {}", self.0)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Serialize for Grade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.slug())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Self::from_slug(&slug)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid grade slug: {slug}")))
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// The subject catalog, the union of the course-management and timetable
/// page dropdowns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Mathematics,
    Science,
    English,
    History,
    Geography,
    Physics,
    Chemistry,
    Biology,
    ComputerScience,
    Art,
    Music,
    PhysicalEducation,
    Sinhala,
    Buddhism,
}

impl Subject {
    pub const ALL: [Self; 14] = [
        Self::Mathematics,
        Self::Science,
        Self::English,
        Self::History,
        Self::Geography,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::ComputerScience,
        Self::Art,
        Self::Music,
        Self::PhysicalEducation,
        Self::Sinhala,
        Self::Buddhism,
    ];

    /// Parse the kebab-case slug used in form values.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Mathematics => "mathematics",
            Self::Science => "science",
            Self::English => "english",
            Self::History => "history",
            Self::Geography => "geography",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
            Self::ComputerScience => "computer-science",
            Self::Art => "art",
            Self::Music => "music",
            Self::PhysicalEducation => "physical-education",
            Self::Sinhala => "sinhala",
            Self::Buddhism => "buddhism",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mathematics => "Mathematics",
            Self::Science => "Science",
            Self::English => "English",
            Self::History => "History",
            Self::Geography => "Geography",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
            Self::Biology => "Biology",
            Self::ComputerScience => "Computer Science",
            Self::Art => "Art",
            Self::Music => "Music",
            Self::PhysicalEducation => "Physical Education",
            Self::Sinhala => "Sinhala",
            Self::Buddhism => "Buddhism",
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
