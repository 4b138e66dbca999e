//! User and authentication slice

use lms_shared::{Page, PaginationState};

use crate::domain::{Role, User, UserStatus};

use super::{AsyncSlice, AsyncStatus};

/// Page size used by the user listing
pub const DEFAULT_USER_LIMIT: u32 = 10;

/// Listing filters of the user management page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilters {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    /// `None` lists every role
    pub role: Option<Role>,
    /// `None` lists every status
    pub status: Option<UserStatus>,
}

impl Default for UserFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_USER_LIMIT,
            search: String::new(),
            role: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub current_user: Option<User>,
    pub users: Vec<User>,
    pub pagination: PaginationState,
    pub filters: UserFilters,
    pub status: AsyncStatus,
    pub error: Option<String>,
}

impl AsyncSlice for UserState {
    fn status_mut(&mut self) -> &mut AsyncStatus {
        &mut self.status
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

impl UserState {
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search = term.into();
        self.filters.page = 1;
    }

    pub fn set_role_filter(&mut self, role: Option<Role>) {
        self.filters.role = role;
        self.filters.page = 1;
    }

    pub fn set_status_filter(&mut self, status: Option<UserStatus>) {
        self.filters.status = status;
        self.filters.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page;
    }

    /// Restore default filters, keeping the configured page size
    pub fn reset_filters(&mut self) {
        self.filters = UserFilters {
            limit: self.filters.limit,
            ..UserFilters::default()
        };
    }

    /// Forget the signed-in user locally
    pub fn logout(&mut self) {
        self.current_user = None;
        self.status = AsyncStatus::Idle;
        self.error = None;
    }

    /// Take the current user from the persisted session cache
    pub fn hydrate_current_user(&mut self, cached: Option<User>) {
        self.current_user = cached;
    }

    pub fn login_fulfilled(&mut self, user: Option<User>) {
        self.current_user = user;
        self.fulfill();
    }

    pub fn users_loaded(&mut self, page: Page<User>) {
        let (users, pagination) = page.into_parts();
        self.users = users;
        self.pagination = pagination;
        self.fulfill();
    }

    /// Merge a status change; without a returned record only the status moves
    pub fn user_status_updated(&mut self, user_id: &str, status: UserStatus, user: Option<User>) {
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == user_id) {
            match user {
                Some(user) => *existing = user,
                None => existing.status = status,
            }
        }
        self.fulfill();
    }
}
