//! Enrollment entity linking a user to a course.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Cancelled,
}

impl Default for EnrollmentStatus {
    fn default() -> Self {
        EnrollmentStatus::Active
    }
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "ACTIVE",
            EnrollmentStatus::Completed => "COMPLETED",
            EnrollmentStatus::Cancelled => "CANCELLED",
        }
    }

    /// The status the admin toggle moves to; completed enrollments stay completed
    pub fn toggled(&self) -> Self {
        match self {
            EnrollmentStatus::Active => EnrollmentStatus::Cancelled,
            EnrollmentStatus::Cancelled => EnrollmentStatus::Active,
            EnrollmentStatus::Completed => EnrollmentStatus::Completed,
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Student fields the backend populates into an enrollment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,
}

/// Course fields the backend populates into an enrollment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Document reference sent either as a bare id or as the populated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(T),
}

impl Ref<UserSummary> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(user) => &user.id,
        }
    }

    pub fn populated(&self) -> Option<&UserSummary> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(user) => Some(user),
        }
    }
}

impl Ref<CourseSummary> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(course) => &course.id,
        }
    }

    pub fn populated(&self) -> Option<&CourseSummary> {
        match self {
            Ref::Id(_) => None,
            Ref::Populated(course) => Some(course),
        }
    }
}

/// Enrollment record as returned by the backend
///
/// `userId` and `courseId` may be null once the referenced document is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(rename = "userId", default)]
    pub user: Option<Ref<UserSummary>>,

    #[serde(rename = "courseId", default)]
    pub course: Option<Ref<CourseSummary>>,

    #[serde(default)]
    pub status: EnrollmentStatus,

    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: f64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(Ref::<UserSummary>::id)
    }

    pub fn course_id(&self) -> Option<&str> {
        self.course.as_ref().map(Ref::<CourseSummary>::id)
    }

    pub fn student_name(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(Ref::<UserSummary>::populated)
            .map(|u| u.full_name.as_str())
    }

    pub fn course_title(&self) -> Option<&str> {
        self.course
            .as_ref()
            .and_then(Ref::<CourseSummary>::populated)
            .map(|c| c.title.as_str())
    }

    /// Case-insensitive match on the course title or student name
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [self.course_title(), self.student_name()]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&term))
    }
}
