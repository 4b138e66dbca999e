//! Domain entities mirrored from the LMS backend.

pub mod course;
pub mod dashboard;
pub mod enrollment;
pub mod user;

// Re-export commonly used types
pub use course::{Course, CourseStatus, Lesson, Module, FIRST_LESSON_ORDER, FIRST_MODULE_ORDER};
pub use dashboard::{DashboardRole, DashboardSnapshot, MonthlyCount, StudentStats};
pub use enrollment::{CourseSummary, Enrollment, EnrollmentStatus, Ref, UserSummary};
pub use user::{Role, User, UserStatus};
