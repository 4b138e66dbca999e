//! Console application state and command execution

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};
use lms_core::forms::LoginForm;
use lms_core::{ApiClient, DashboardRole, Services, SessionContext, Store};
use lms_infra::{DashboardStream, Debouncer, FileSessionStorage, ReqwestTransport};
use lms_shared::AppConfig;
use tracing::{info, warn};

use crate::commands::Command;

/// Everything one console session needs, built once at startup
pub struct ConsoleApp {
    config: AppConfig,
    transport: ReqwestTransport,
    session: SessionContext,
    store: Store,
    services: Services<ReqwestTransport>,
    search: Debouncer,
}

impl ConsoleApp {
    /// Wire transport, session cache, store and services for `config`
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let transport = ReqwestTransport::new(&config.api).context("failed to build HTTP transport")?;

        let session = match &config.session.storage_path {
            Some(path) => {
                info!(path = %path.display(), "Restoring session from file");
                SessionContext::restore(Arc::new(FileSessionStorage::new(path)))
            }
            None => SessionContext::in_memory(),
        };

        let client = Arc::new(ApiClient::new(
            transport.clone(),
            config.api.clone(),
            Arc::new(session.clone()),
        ));
        let store = Store::new();
        let services = Services::new(client, store.clone(), session.clone());
        let search = Debouncer::from_config(&config.search);

        Ok(Self {
            config,
            transport,
            session,
            store,
            services,
            search,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn services(&self) -> &Services<ReqwestTransport> {
        &self.services
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Copy the cached user into the store and apply the configured page size
    pub async fn start(&self) {
        let limit = self.config.search.page_limit;
        self.store.update(|s| s.users.filters.limit = limit).await;

        match self.services.auth.hydrate_current_user().await {
            Some(user) => info!(user_id = %user.id, role = %user.role, "Resumed session"),
            None => info!("No cached session"),
        }
    }

    /// Apply a search term and fetch courses if no newer term arrives within the debounce delay
    pub async fn search_courses(&self, term: &str) -> anyhow::Result<bool> {
        self.query_courses(Some(term), None).await
    }

    /// Apply the course search and page, then fetch
    ///
    /// The page goes in after the search term, which resets it. Only a search
    /// waits out the debounce delay.
    pub async fn query_courses(&self, search: Option<&str>, page: Option<u32>) -> anyhow::Result<bool> {
        let courses = &self.services.courses;
        if let Some(term) = search {
            courses.set_search_filter(term).await;
        }
        if let Some(page) = page {
            courses.set_page(page).await;
        }
        if search.is_some() && !self.search.settle().await {
            return Ok(false);
        }
        courses.fetch_courses().await?;
        Ok(true)
    }

    /// User listing counterpart of [`ConsoleApp::search_courses`]
    pub async fn search_users(&self, term: &str) -> anyhow::Result<bool> {
        self.query_users(Some(term), None).await
    }

    pub async fn query_users(&self, search: Option<&str>, page: Option<u32>) -> anyhow::Result<bool> {
        let users = &self.services.users;
        if let Some(term) = search {
            users.set_search_term(term).await;
        }
        if let Some(page) = page {
            users.set_page(page).await;
        }
        if search.is_some() && !self.search.settle().await {
            return Ok(false);
        }
        users.fetch_all_users().await?;
        Ok(true)
    }

    /// Open the stats stream matching the signed-in user's role
    pub async fn open_dashboard(&self) -> anyhow::Result<DashboardStream> {
        let Some(user) = self.session.current_user() else {
            bail!("Sign in before opening a dashboard");
        };
        let role = DashboardRole::from(user.role);
        let stream = DashboardStream::open(&self.transport, &self.config.stream, role).await?;
        Ok(stream)
    }

    /// Execute one command, writing its report to `out`
    pub async fn run(&self, command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
        let result = self.execute(command, out).await;

        if let Some(route) = self.services.auth.follow_redirect().await {
            warn!(%route, "Session expired");
            writeln!(out, "Session expired, sign in again (redirect to {route})")?;
        }
        result
    }

    async fn execute(&self, command: Command, out: &mut dyn Write) -> anyhow::Result<()> {
        match command {
            Command::Status => {
                match self.session.current_user() {
                    Some(user) => writeln!(out, "Signed in as {} <{}> ({})", user.full_name, user.email, user.role)?,
                    None => writeln!(out, "Not signed in")?,
                }
                if let Some(user_id) = self.session.verify_user_id() {
                    writeln!(out, "Awaiting email verification for {user_id}")?;
                }
                if let Some(email) = self.session.reset_email() {
                    writeln!(out, "Password reset in progress for {email}")?;
                }
            }
            Command::Login => {
                let email = std::env::var("LMS_EMAIL").context("LMS_EMAIL is not set")?;
                let password = std::env::var("LMS_PASSWORD").context("LMS_PASSWORD is not set")?;
                let user = self.services.auth.login(&LoginForm::new(email, password)).await?;
                match user {
                    Some(user) => writeln!(out, "Signed in as {} ({})", user.full_name, user.role)?,
                    None => writeln!(out, "Signed in")?,
                }
            }
            Command::Logout => {
                self.services.auth.logout().await?;
                writeln!(out, "Signed out")?;
            }
            Command::Courses { search, page } => {
                self.query_courses(search.as_deref(), page).await?;
                let state = self.store.courses().await;
                for course in &state.courses {
                    writeln!(out, "{:<26} {:<10} {}", course.id, course.status, course.title)?;
                }
                writeln!(
                    out,
                    "page {}/{} ({} courses)",
                    state.pagination.page, state.pagination.total_pages, state.pagination.total_docs
                )?;
            }
            Command::Users {
                search,
                role,
                status,
                page,
            } => {
                let users = &self.services.users;
                users.set_role_filter(role).await;
                users.set_status_filter(status).await;
                self.query_users(search.as_deref(), page).await?;
                let state = self.store.users().await;
                for user in &state.users {
                    writeln!(
                        out,
                        "{:<26} {:<11} {:<10} {} <{}>",
                        user.id, user.role, user.status, user.full_name, user.email
                    )?;
                }
                writeln!(
                    out,
                    "page {}/{} ({} users)",
                    state.pagination.page, state.pagination.total_pages, state.pagination.total_docs
                )?;
            }
            Command::Enrollments { search } => {
                self.services.enrollments.fetch_enrollments().await?;
                let term = search.unwrap_or_default();
                let state = self.store.enrollments().await;
                for enrollment in state.enrollments.iter().filter(|e| e.matches_search(&term)) {
                    writeln!(
                        out,
                        "{:<26} {:<10} {} / {} ({:.0}%)",
                        enrollment.id,
                        enrollment.status,
                        enrollment.student_name().or(enrollment.user_id()).unwrap_or("-"),
                        enrollment.course_title().or(enrollment.course_id()).unwrap_or("-"),
                        enrollment.progress
                    )?;
                }
            }
            Command::ToggleEnrollment { enrollment_id } => {
                if self.store.enrollments().await.enrollments.is_empty() {
                    self.services.enrollments.fetch_enrollments().await?;
                }
                match self
                    .services
                    .enrollments
                    .toggle_enrollment_status(&enrollment_id)
                    .await?
                {
                    Some(status) => writeln!(out, "Enrollment {enrollment_id} is now {status}")?,
                    None => writeln!(out, "Enrollment {enrollment_id} cannot be toggled")?,
                }
            }
            Command::Dashboard { snapshots } => {
                let mut stream = self.open_dashboard().await?;
                for _ in 0..snapshots {
                    let Some(snapshot) = stream.next().await else {
                        writeln!(out, "Dashboard stream closed")?;
                        break;
                    };
                    match snapshot.student_stats() {
                        Some(stats) => {
                            writeln!(
                                out,
                                "enrollments: {} total, {} active, {} completed",
                                stats.total_enrollments, stats.active_enrollments, stats.completed_enrollments
                            )?;
                            for (month, count) in stats.monthly_series() {
                                writeln!(out, "  {month} {count}")?;
                            }
                        }
                        None => writeln!(out, "{}", serde_json::to_string_pretty(&snapshot.payload)?)?,
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> ConsoleApp {
        ConsoleApp::build(AppConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_status_without_session() {
        let app = app();
        app.start().await;

        let mut out = Vec::new();
        app.run(Command::Status, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Not signed in\n");
    }

    #[tokio::test]
    async fn test_start_applies_page_limit() {
        let mut config = AppConfig::default();
        config.search.page_limit = 25;
        let app = ConsoleApp::build(config).unwrap();

        app.start().await;

        assert_eq!(app.store().users().await.filters.limit, 25);
    }

    #[tokio::test]
    async fn test_dashboard_requires_signed_in_user() {
        let app = app();
        let err = app.open_dashboard().await.unwrap_err();
        assert!(err.to_string().contains("Sign in"));
    }

    #[tokio::test]
    async fn test_course_page_survives_search() {
        let mut config = AppConfig::default();
        config.api.base_url = "http://127.0.0.1:9/api/v1".to_string();
        config.search.debounce_ms = 0;
        let app = ConsoleApp::build(config).unwrap();

        let _ = app.query_courses(Some("rust"), Some(3)).await;

        let filters = app.store().courses().await.filters;
        assert_eq!(filters.search, "rust");
        assert_eq!(filters.page, 3);
    }

    #[tokio::test]
    async fn test_user_page_survives_search() {
        let mut config = AppConfig::default();
        config.api.base_url = "http://127.0.0.1:9/api/v1".to_string();
        config.search.debounce_ms = 0;
        let app = ConsoleApp::build(config).unwrap();

        let _ = app.query_users(Some("ada"), Some(2)).await;

        let filters = app.store().users().await.filters;
        assert_eq!(filters.search, "ada");
        assert_eq!(filters.page, 2);
    }

    #[test]
    fn test_build_rejects_malformed_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(ConsoleApp::build(config).is_err());
    }
}
