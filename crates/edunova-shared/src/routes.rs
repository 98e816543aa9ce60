//! Symbolic navigation routes.
//!
//! The demo site navigated by assigning literal page paths to
//! `window.location.href`.  Controllers here only ever name a [`Route`]
//! variant; the literal path lives in exactly one place so a different
//! front end can remap it wholesale.

use serde::{Deserialize, Serialize};

use crate::types::{Grade, Subject};

/// The kind of learning resource the public wizard links out to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    PastPapers,
    ModelPapers,
    StudyResources,
}

impl ResourceKind {
    pub fn slug(self) -> &'static str {
        match self {
            Self::PastPapers => "pastpapers",
            Self::ModelPapers => "modelpapers",
            Self::StudyResources => "studyresources",
        }
    }
}

/// Every page the admin site can navigate to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Route {
    Landing,
    AdminLogin,
    CreateAccount,
    ForgotPassword,
    Dashboard,
    ManageStudents,
    ManageTeachers,
    ManageCourses,
    ManageTimetable,
    Settings,
    Logout,
    Materials {
        subject: Subject,
        grade: Grade,
        resource: ResourceKind,
    },
}

impl Route {
    /// Resolve the route to the page path the site serves.
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "index.html".to_string(),
            Self::AdminLogin => "adminlogin.html".to_string(),
            Self::CreateAccount => "account.html".to_string(),
            Self::ForgotPassword => "fpassword.html".to_string(),
            Self::Dashboard => "Dashboard.html".to_string(),
            Self::ManageStudents => "mstudent.html".to_string(),
            Self::ManageTeachers => "mteachers.html".to_string(),
            Self::ManageCourses => "mcources.html".to_string(),
            Self::ManageTimetable => "mtime.html".to_string(),
            Self::Settings => "settings.html".to_string(),
            Self::Logout => "logout.html".to_string(),
            Self::Materials {
                subject,
                grade,
                resource,
            } => format!(
                "materials.html?subject={}&grade={}&type={}",
                subject.slug(),
                grade.number(),
                resource.slug()
            ),
        }
    }
}
