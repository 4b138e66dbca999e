//! Course service implementation

use std::sync::Arc;

use lms_shared::{Page, QueryParams};
use tracing::info;

use crate::client::ApiClient;
use crate::domain::{Course, CourseStatus, Lesson, Module, FIRST_LESSON_ORDER, FIRST_MODULE_ORDER};
use crate::errors::ConsoleResult;
use crate::forms::{check, CourseForm, CourseUpdate, LessonForm, LessonUpdate, ModuleForm, ModuleUpdate};
use crate::store::{AsyncSlice, CourseFilters, CourseState, RootState, Store};
use crate::transport::{ApiRequest, HttpTransport};

use crate::services::{begin, reject, OneOrMany};

const COURSES_PATH: &str = "/courses";
const MODULES_PATH: &str = "/modules";
const LESSONS_PATH: &str = "/lessons";

fn courses(state: &mut RootState) -> &mut CourseState {
    &mut state.courses
}

pub struct CourseService<T: HttpTransport> {
    client: Arc<ApiClient<T>>,
    store: Store,
}

impl<T: HttpTransport> CourseService<T> {
    pub fn new(client: Arc<ApiClient<T>>, store: Store) -> Self {
        Self { client, store }
    }

    /// Fetch the page of courses selected by the current filters
    pub async fn fetch_courses(&self) -> ConsoleResult<()> {
        let filters = self.store.read(|s| s.courses.filters.clone()).await;
        begin(&self.store, courses).await;

        let request = ApiRequest::get(COURSES_PATH).with_query(query_for(&filters));
        match self.client.fetch::<Page<Course>>(&request).await {
            Ok(envelope) => {
                let page = envelope.into_data().unwrap_or_else(|| Page {
                    docs: Vec::new(),
                    page: filters.page,
                    total_pages: 1,
                    total_docs: 0,
                    has_next_page: false,
                    has_prev_page: false,
                });
                self.store.update(|s| s.courses.courses_loaded(page)).await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to fetch courses").await),
        }
    }

    /// Load one course into the editor
    ///
    /// The backend answers with either the course or a one-element list.
    pub async fn fetch_course_by_id(&self, course_id: &str) -> ConsoleResult<Option<Course>> {
        begin(&self.store, courses).await;

        let request = ApiRequest::get(format!("{COURSES_PATH}/{course_id}"));
        match self.client.fetch::<OneOrMany<Course>>(&request).await {
            Ok(envelope) => {
                let course = envelope.into_data().and_then(OneOrMany::into_first);
                self.store
                    .update(|s| s.courses.course_loaded(course.clone()))
                    .await;
                Ok(course)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to fetch course").await),
        }
    }

    pub async fn create_course(&self, form: &CourseForm) -> ConsoleResult<Option<Course>> {
        check(form)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::post(COURSES_PATH).with_multipart(form.multipart());
        match self.client.fetch::<Course>(&request).await {
            Ok(envelope) => {
                let course = envelope.into_data();
                self.store
                    .update(|s| match course.clone() {
                        Some(course) => s.courses.course_created(course),
                        None => s.courses.fulfill(),
                    })
                    .await;
                if let Some(course) = &course {
                    info!(course_id = %course.id, "Course created");
                }
                Ok(course)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to create course").await),
        }
    }

    /// Send the changed fields of a course
    pub async fn update_course(
        &self,
        course_id: &str,
        update: &CourseUpdate,
    ) -> ConsoleResult<Option<Course>> {
        check(update)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::patch(format!("{COURSES_PATH}/{course_id}"))
            .with_multipart(update.multipart());
        match self.client.fetch::<Course>(&request).await {
            Ok(envelope) => {
                let course = envelope.into_data();
                self.store
                    .update(|s| match course.clone() {
                        Some(course) => s.courses.course_updated(course),
                        None => s.courses.fulfill(),
                    })
                    .await;
                Ok(course)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to update course").await),
        }
    }

    pub async fn add_module(&self, course_id: &str, form: &ModuleForm) -> ConsoleResult<Option<Module>> {
        check(form)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::post(format!("{COURSES_PATH}/{course_id}/modules"))
            .with_json(form.body());
        match self.client.fetch::<Module>(&request).await {
            Ok(envelope) => {
                let module = envelope.into_data();
                self.store
                    .update(|s| match module.clone() {
                        Some(module) => s.courses.module_added(course_id, module),
                        None => s.courses.fulfill(),
                    })
                    .await;
                Ok(module)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to add module").await),
        }
    }

    pub async fn update_module(&self, module_id: &str, update: &ModuleUpdate) -> ConsoleResult<Option<Module>> {
        check(update)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::patch(format!("{MODULES_PATH}/{module_id}"))
            .with_json(update.body());
        match self.client.fetch::<Module>(&request).await {
            Ok(envelope) => {
                let module = envelope.into_data();
                self.store
                    .update(|s| match module.clone() {
                        Some(module) => s.courses.module_updated(module),
                        None => s.courses.fulfill(),
                    })
                    .await;
                Ok(module)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to update module").await),
        }
    }

    pub async fn add_lesson(&self, module_id: &str, form: &LessonForm) -> ConsoleResult<Option<Lesson>> {
        check(form)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::post(format!("{MODULES_PATH}/{module_id}/lessons"))
            .with_multipart(form.multipart());
        match self.client.fetch::<Lesson>(&request).await {
            Ok(envelope) => {
                let lesson = envelope.into_data();
                self.store
                    .update(|s| match lesson.clone() {
                        Some(lesson) => s.courses.lesson_added(module_id, lesson),
                        None => s.courses.fulfill(),
                    })
                    .await;
                Ok(lesson)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to add lesson").await),
        }
    }

    pub async fn update_lesson(&self, lesson_id: &str, update: &LessonUpdate) -> ConsoleResult<Option<Lesson>> {
        check(update)?;
        begin(&self.store, courses).await;

        let request = ApiRequest::patch(format!("{LESSONS_PATH}/{lesson_id}"))
            .with_multipart(update.multipart());
        match self.client.fetch::<Lesson>(&request).await {
            Ok(envelope) => {
                let lesson = envelope.into_data();
                self.store
                    .update(|s| match lesson.clone() {
                        Some(lesson) => s.courses.lesson_updated(lesson),
                        None => s.courses.fulfill(),
                    })
                    .await;
                Ok(lesson)
            }
            Err(e) => Err(reject(&self.store, courses, e, "Failed to update lesson").await),
        }
    }

    /// Order for the next module of a loaded course
    pub async fn next_module_order(&self, course_id: &str) -> u32 {
        self.store
            .read(|s| {
                s.courses
                    .find_course(course_id)
                    .map_or(FIRST_MODULE_ORDER, Course::next_module_order)
            })
            .await
    }

    /// Order for the next lesson of a loaded module
    pub async fn next_lesson_order(&self, module_id: &str) -> u32 {
        self.store
            .read(|s| {
                s.courses
                    .find_module(module_id)
                    .map_or(FIRST_LESSON_ORDER, Module::next_lesson_order)
            })
            .await
    }

    pub async fn set_status_filter(&self, status: Option<CourseStatus>) {
        self.store.update(|s| s.courses.set_status_filter(status)).await;
    }

    pub async fn set_search_filter(&self, search: &str) {
        self.store.update(|s| s.courses.set_search_filter(search)).await;
    }

    pub async fn set_page(&self, page: u32) {
        self.store.update(|s| s.courses.set_page(page)).await;
    }

    pub async fn reset_filters(&self) {
        self.store.update(|s| s.courses.reset_filters()).await;
    }
}

fn query_for(filters: &CourseFilters) -> QueryParams {
    QueryParams::new()
        .with("page", filters.page)
        .with_opt("status", filters.status)
        .with_search("search", &filters.search)
}
