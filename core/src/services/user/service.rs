//! Admin user listing and account status changes

use std::sync::Arc;

use lms_shared::{Page, QueryParams};
use serde_json::json;
use tracing::info;

use crate::client::ApiClient;
use crate::domain::{Role, User, UserStatus};
use crate::errors::ConsoleResult;
use crate::store::{RootState, Store, UserFilters, UserState};
use crate::transport::{ApiRequest, HttpTransport};

use crate::services::{begin, reject};

const USERS_PATH: &str = "/users";

fn users(state: &mut RootState) -> &mut UserState {
    &mut state.users
}

pub struct UserService<T: HttpTransport> {
    client: Arc<ApiClient<T>>,
    store: Store,
}

impl<T: HttpTransport> UserService<T> {
    pub fn new(client: Arc<ApiClient<T>>, store: Store) -> Self {
        Self { client, store }
    }

    /// Fetch the page of users selected by the current filters
    pub async fn fetch_all_users(&self) -> ConsoleResult<()> {
        let filters = self.store.read(|s| s.users.filters.clone()).await;
        begin(&self.store, users).await;

        let request = ApiRequest::get(USERS_PATH).with_query(query_for(&filters));
        match self.client.fetch::<Page<User>>(&request).await {
            Ok(envelope) => {
                let page = envelope.into_data().unwrap_or_else(empty_page);
                self.store.update(|s| s.users.users_loaded(page)).await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, users, e, "Failed to fetch users").await),
        }
    }

    pub async fn update_user_status(&self, user_id: &str, status: UserStatus) -> ConsoleResult<()> {
        begin(&self.store, users).await;

        let request = ApiRequest::patch(format!("{USERS_PATH}/{user_id}/status"))
            .with_json(json!({ "status": status }));
        match self.client.fetch::<User>(&request).await {
            Ok(envelope) => {
                info!(user_id, %status, "User status updated");
                let user = envelope.into_data();
                self.store
                    .update(|s| s.users.user_status_updated(user_id, status, user))
                    .await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, users, e, "Failed to update user status").await),
        }
    }

    pub async fn set_search_term(&self, term: &str) {
        self.store.update(|s| s.users.set_search_term(term)).await;
    }

    pub async fn set_role_filter(&self, role: Option<Role>) {
        self.store.update(|s| s.users.set_role_filter(role)).await;
    }

    pub async fn set_status_filter(&self, status: Option<UserStatus>) {
        self.store.update(|s| s.users.set_status_filter(status)).await;
    }

    pub async fn set_page(&self, page: u32) {
        self.store.update(|s| s.users.set_page(page)).await;
    }

    pub async fn reset_filters(&self) {
        self.store.update(|s| s.users.reset_filters()).await;
    }
}

fn query_for(filters: &UserFilters) -> QueryParams {
    QueryParams::new()
        .with("page", filters.page)
        .with("limit", filters.limit)
        .with_opt("role", filters.role)
        .with_opt("status", filters.status)
        .with_search("search", &filters.search)
}

fn empty_page() -> Page<User> {
    Page {
        docs: Vec::new(),
        page: 1,
        total_pages: 1,
        total_docs: 0,
        has_next_page: false,
        has_prev_page: false,
    }
}
