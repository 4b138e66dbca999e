//! Course, module and lesson entities mirrored from the LMS backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication status of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CourseStatus {
    Draft,
    Published,
    Unpublished,
}

impl Default for CourseStatus {
    fn default() -> Self {
        CourseStatus::Draft
    }
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Draft => "DRAFT",
            CourseStatus::Published => "PUBLISHED",
            CourseStatus::Unpublished => "UNPUBLISHED",
        }
    }
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lesson inside a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub order: u32,

    /// Video URL
    #[serde(default)]
    pub video_file: Option<String>,

    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Module inside a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub order: u32,

    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// First order handed out to a lesson in an empty module
pub const FIRST_LESSON_ORDER: u32 = 0;

/// First order handed out to a module in an empty course
pub const FIRST_MODULE_ORDER: u32 = 1;

impl Module {
    /// Order for the next lesson appended to this module
    pub fn next_lesson_order(&self) -> u32 {
        self.lessons
            .iter()
            .map(|l| l.order)
            .max()
            .map_or(FIRST_LESSON_ORDER, |max| max + 1)
    }

    pub fn find_lesson_mut(&mut self, lesson_id: &str) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| l.id == lesson_id)
    }
}

/// Course record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub is_free: bool,

    #[serde(default)]
    pub status: CourseStatus,

    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub modules: Vec<Module>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Order for the next module appended to this course
    pub fn next_module_order(&self) -> u32 {
        self.modules
            .iter()
            .map(|m| m.order)
            .max()
            .map_or(FIRST_MODULE_ORDER, |max| max + 1)
    }

    pub fn find_module_mut(&mut self, module_id: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == module_id)
    }

    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: &str, order: u32) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: format!("Lesson {id}"),
            order,
            video_file: None,
            duration: None,
        }
    }

    #[test]
    fn test_course_deserializes_nested_document() {
        let json = r#"{
            "_id": "c1",
            "title": "Rust 101",
            "description": "Ownership and borrowing",
            "price": 49.5,
            "isFree": false,
            "status": "PUBLISHED",
            "thumbnail": "https://cdn.example.com/rust.png",
            "modules": [
                {"_id": "m1", "title": "Basics", "order": 1, "lessons": [
                    {"_id": "l1", "title": "Hello", "order": 0, "videoFile": "https://cdn.example.com/l1.mp4", "duration": 120.0}
                ]}
            ]
        }"#;
        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.status, CourseStatus::Published);
        assert_eq!(course.modules.len(), 1);
        assert_eq!(course.lesson_count(), 1);
        assert_eq!(course.modules[0].lessons[0].duration, Some(120.0));
    }

    #[test]
    fn test_next_module_order() {
        let mut course: Course = serde_json::from_str(r#"{"_id":"c1","title":"T"}"#).unwrap();
        assert_eq!(course.next_module_order(), FIRST_MODULE_ORDER);

        course.modules.push(Module {
            id: "m1".to_string(),
            title: "A".to_string(),
            description: String::new(),
            order: 3,
            lessons: vec![],
        });
        assert_eq!(course.next_module_order(), 4);
    }

    #[test]
    fn test_next_lesson_order() {
        let mut module = Module {
            id: "m1".to_string(),
            title: "A".to_string(),
            description: String::new(),
            order: 1,
            lessons: vec![],
        };
        assert_eq!(module.next_lesson_order(), FIRST_LESSON_ORDER);

        module.lessons = vec![lesson("l1", 0), lesson("l2", 5), lesson("l3", 2)];
        assert_eq!(module.next_lesson_order(), 6);
    }
}
