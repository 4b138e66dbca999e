//! Course, module and lesson authoring forms

use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError};

use crate::domain::{Course, CourseStatus};
use crate::transport::{FileUpload, MultipartForm};

use super::{invalid, validate_upload};

/// New course
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_price", skip_on_field_errors = false))]
pub struct CourseForm {
    #[validate(length(min = 3, message = "Minimum 3 characters"))]
    pub title: String,

    #[validate(length(min = 10, message = "Minimum 10 characters"))]
    pub description: String,

    pub price: f64,

    pub is_free: bool,

    pub status: CourseStatus,

    #[validate(required(message = "Thumbnail is required"), custom = "validate_upload")]
    pub thumbnail: Option<FileUpload>,
}

fn validate_price(form: &CourseForm) -> Result<(), ValidationError> {
    if !form.is_free && form.price < 1.0 {
        return Err(invalid("price", "Must be greater than 0"));
    }
    Ok(())
}

impl CourseForm {
    /// Free courses are always sent with a zero price
    pub fn multipart(&self) -> MultipartForm {
        let price = if self.is_free { 0.0 } else { self.price };
        MultipartForm::new()
            .text("title", &self.title)
            .text("description", &self.description)
            .text("price", price)
            .text("isFree", self.is_free)
            .text("status", self.status)
            .opt_file("thumbnail", self.thumbnail.clone())
    }
}

/// Edit of an existing course; only the fields that are set are sent
#[derive(Debug, Clone, Default, Validate)]
pub struct CourseUpdate {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,

    pub price: Option<f64>,

    pub is_free: Option<bool>,

    pub status: Option<CourseStatus>,

    pub thumbnail: Option<FileUpload>,
}

impl CourseUpdate {
    /// Build an update holding only the values that differ from `course`
    pub fn diff(course: &Course, title: &str, description: &str, thumbnail: Option<FileUpload>) -> Self {
        Self {
            title: (title != course.title).then(|| title.to_string()),
            description: (description != course.description).then(|| description.to_string()),
            thumbnail,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_free.is_none()
            && self.status.is_none()
            && self.thumbnail.is_none()
    }

    pub fn multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .opt_text("title", self.title.as_ref())
            .opt_text("description", self.description.as_ref())
            .opt_text("price", self.price)
            .opt_text("isFree", self.is_free)
            .opt_text("status", self.status)
            .opt_file("thumbnail", self.thumbnail.clone())
    }
}

/// New module appended to a course
#[derive(Debug, Clone, Validate)]
pub struct ModuleForm {
    #[validate(length(min = 3, message = "Minimum 3 characters"))]
    pub title: String,

    #[validate(length(min = 5, message = "Minimum 5 characters"))]
    pub description: String,

    pub order: u32,
}

impl ModuleForm {
    /// Form for the next module of `course`
    pub fn next_for(course: &Course, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            order: course.next_module_order(),
        }
    }

    pub fn body(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "order": self.order,
        })
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ModuleUpdate {
    #[validate(length(min = 3, message = "Minimum 3 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 5, message = "Minimum 5 characters"))]
    pub description: Option<String>,

    pub order: Option<u32>,
}

impl ModuleUpdate {
    pub fn body(&self) -> Value {
        let mut body = Map::new();
        if let Some(title) = &self.title {
            body.insert("title".to_string(), json!(title));
        }
        if let Some(description) = &self.description {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(order) = self.order {
            body.insert("order".to_string(), json!(order));
        }
        Value::Object(body)
    }
}

/// New lesson appended to a module
#[derive(Debug, Clone, Validate)]
pub struct LessonForm {
    #[validate(length(min = 3, message = "Minimum 3 characters"))]
    pub title: String,

    pub order: u32,

    #[validate(required(message = "Video file is required"), custom = "validate_upload")]
    pub video_file: Option<FileUpload>,
}

impl LessonForm {
    pub fn multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .text("title", &self.title)
            .text("order", self.order)
            .opt_file("videoFile", self.video_file.clone())
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LessonUpdate {
    #[validate(length(min = 3, message = "Minimum 3 characters"))]
    pub title: Option<String>,

    pub order: Option<u32>,

    pub video_file: Option<FileUpload>,
}

impl LessonUpdate {
    pub fn multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .opt_text("title", self.title.as_ref())
            .opt_text("order", self.order)
            .opt_file("videoFile", self.video_file.clone())
    }
}
