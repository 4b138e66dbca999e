//! Dashboard statistics snapshots pushed over the per-role stats stream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::user::Role;

/// Which dashboard a stream feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardRole {
    Admin,
    Instructor,
    Student,
}

impl From<Role> for DashboardRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => DashboardRole::Admin,
            Role::Instructor => DashboardRole::Instructor,
            Role::Student => DashboardRole::Student,
        }
    }
}

impl std::fmt::Display for DashboardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DashboardRole::Admin => write!(f, "admin"),
            DashboardRole::Instructor => write!(f, "instructor"),
            DashboardRole::Student => write!(f, "student"),
        }
    }
}

/// Enrollment count for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month number, 1 = January
    #[serde(rename = "_id")]
    pub month: u32,

    #[serde(default)]
    pub enrollments: u64,
}

/// Statistics shown on the student dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentStats {
    pub total_enrollments: u64,
    pub active_enrollments: u64,
    pub completed_enrollments: u64,
    pub recent_enrollments: Vec<Value>,
    pub monthly_enrollments: Vec<MonthlyCount>,
}

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl StudentStats {
    /// Twelve labelled buckets, months absent from the snapshot count as zero
    pub fn monthly_series(&self) -> Vec<(&'static str, u64)> {
        MONTH_LABELS
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let month = index as u32 + 1;
                let count = self
                    .monthly_enrollments
                    .iter()
                    .find(|m| m.month == month)
                    .map_or(0, |m| m.enrollments);
                (*label, count)
            })
            .collect()
    }
}

/// One snapshot received from a dashboard stream
///
/// Admin and instructor payloads are kept as raw JSON objects; the student
/// payload has a typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub role: DashboardRole,
    pub payload: Value,
}

impl DashboardSnapshot {
    pub fn new(role: DashboardRole, payload: Value) -> Self {
        Self { role, payload }
    }

    /// Typed student statistics, when this is a student snapshot that decodes
    pub fn student_stats(&self) -> Option<StudentStats> {
        if self.role != DashboardRole::Student {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }

    /// Read a top-level numeric counter from the payload
    pub fn counter(&self, key: &str) -> Option<u64> {
        self.payload.get(key).and_then(Value::as_u64)
    }
}
