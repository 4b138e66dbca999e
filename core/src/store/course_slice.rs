//! Course authoring slice
//!
//! Holds the paginated course listing, the course opened in the editor and
//! the listing filters. Nested merges (modules under a course, lessons under
//! a module) are applied to both the listing and the selected course so the
//! two never disagree.

use lms_shared::{Page, PaginationState};

use crate::domain::{Course, CourseStatus, Lesson, Module};

use super::{AsyncSlice, AsyncStatus};

/// Listing filters of the course page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFilters {
    pub page: u32,
    /// `None` lists every status
    pub status: Option<CourseStatus>,
    pub search: String,
}

impl Default for CourseFilters {
    fn default() -> Self {
        Self {
            page: 1,
            status: None,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseState {
    pub courses: Vec<Course>,
    pub selected_course: Option<Course>,
    pub pagination: PaginationState,
    pub filters: CourseFilters,
    pub status: AsyncStatus,
    pub error: Option<String>,
}

impl AsyncSlice for CourseState {
    fn status_mut(&mut self) -> &mut AsyncStatus {
        &mut self.status
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

impl CourseState {
    pub fn set_status_filter(&mut self, status: Option<CourseStatus>) {
        self.filters.status = status;
        self.filters.page = 1;
    }

    pub fn set_search_filter(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
        self.filters.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page;
    }

    pub fn reset_filters(&mut self) {
        self.filters = CourseFilters::default();
    }

    pub fn courses_loaded(&mut self, page: Page<Course>) {
        let (courses, pagination) = page.into_parts();
        self.courses = courses;
        self.pagination = pagination;
        self.fulfill();
    }

    pub fn course_loaded(&mut self, course: Option<Course>) {
        self.selected_course = course;
        self.fulfill();
    }

    pub fn course_created(&mut self, course: Course) {
        self.courses.insert(0, course);
        self.fulfill();
    }

    /// Replace a course in the list and the selection
    ///
    /// A response without modules keeps the ones already loaded.
    pub fn course_updated(&mut self, course: Course) {
        for existing in self.courses_mut().filter(|c| c.id == course.id) {
            let modules = if course.modules.is_empty() {
                std::mem::take(&mut existing.modules)
            } else {
                course.modules.clone()
            };
            *existing = Course {
                modules,
                ..course.clone()
            };
        }
        self.fulfill();
    }

    pub fn module_added(&mut self, course_id: &str, module: Module) {
        for course in self.courses_mut().filter(|c| c.id == course_id) {
            course.modules.push(module.clone());
        }
        self.fulfill();
    }

    /// Replace a module everywhere it appears
    ///
    /// Update responses may omit the lessons; the ones already loaded are kept.
    pub fn module_updated(&mut self, module: Module) {
        for course in self.courses_mut() {
            if let Some(existing) = course.find_module_mut(&module.id) {
                let lessons = if module.lessons.is_empty() {
                    std::mem::take(&mut existing.lessons)
                } else {
                    module.lessons.clone()
                };
                *existing = Module {
                    lessons,
                    ..module.clone()
                };
            }
        }
        self.fulfill();
    }

    pub fn lesson_added(&mut self, module_id: &str, lesson: Lesson) {
        for course in self.courses_mut() {
            if let Some(module) = course.find_module_mut(module_id) {
                module.lessons.push(lesson.clone());
            }
        }
        self.fulfill();
    }

    pub fn lesson_updated(&mut self, lesson: Lesson) {
        for course in self.courses_mut() {
            for module in course.modules.iter_mut() {
                if let Some(existing) = module.find_lesson_mut(&lesson.id) {
                    *existing = lesson.clone();
                }
            }
        }
        self.fulfill();
    }

    /// Find a module in the selected course, then in the listing
    pub fn find_module(&self, module_id: &str) -> Option<&Module> {
        self.selected_course
            .iter()
            .chain(self.courses.iter())
            .flat_map(|c| c.modules.iter())
            .find(|m| m.id == module_id)
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.selected_course
            .iter()
            .chain(self.courses.iter())
            .find(|c| c.id == course_id)
    }

    fn courses_mut(&mut self) -> impl Iterator<Item = &mut Course> {
        self.courses.iter_mut().chain(self.selected_course.iter_mut())
    }
}
