//! Main authentication service implementation

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::client::ApiClient;
use crate::domain::User;
use crate::errors::ConsoleResult;
use crate::forms::{
    check, ChangePasswordForm, ForgotPasswordForm, LoginForm, ResendOtpForm, ResetPasswordForm,
    SignupForm, VerifyOtpForm, VerifyResetOtpForm,
};
use crate::session::SessionContext;
use crate::store::{AsyncSlice, RootState, Store, UserState};
use crate::transport::{ApiRequest, HttpTransport};

use crate::services::{begin, reject};

const LOGIN_PATH: &str = "/users/login";
const SIGNUP_PATH: &str = "/users/signup";
const VERIFY_OTP_PATH: &str = "/users/verify-otp";
const RESEND_OTP_PATH: &str = "/users/resend-verification-otp";
const CHANGE_PASSWORD_PATH: &str = "/users/change-password";
const LOGOUT_PATH: &str = "/users/logout";
const FORGOT_PASSWORD_PATH: &str = "/users/forgot-password";
const VERIFY_RESET_OTP_PATH: &str = "/users/verify-reset-otp";
const RESET_PASSWORD_PATH: &str = "/users/reset-password";

fn users(state: &mut RootState) -> &mut UserState {
    &mut state.users
}

/// Authentication service over the user slice and the session cache
pub struct AuthService<T: HttpTransport> {
    client: Arc<ApiClient<T>>,
    store: Store,
    session: SessionContext,
}

impl<T: HttpTransport> AuthService<T> {
    pub fn new(client: Arc<ApiClient<T>>, store: Store, session: SessionContext) -> Self {
        Self {
            client,
            store,
            session,
        }
    }

    /// Sign in and cache the returned user
    pub async fn login(&self, form: &LoginForm) -> ConsoleResult<Option<User>> {
        check(form)?;
        begin(&self.store, users).await;

        let request = ApiRequest::post(LOGIN_PATH).with_json(form.body());
        match self.client.fetch::<User>(&request).await {
            Ok(envelope) => {
                let user = envelope.into_data();
                info!(user_id = ?user.as_ref().map(|u| &u.id), "Signed in");
                self.session.set_current_user(user.clone());
                self.store
                    .update(|s| s.users.login_fulfilled(user.clone()))
                    .await;
                Ok(user)
            }
            Err(e) => Err(reject(&self.store, users, e, "Login failed").await),
        }
    }

    /// Register an account; the new user id is kept for OTP verification
    pub async fn signup(&self, form: &SignupForm) -> ConsoleResult<Option<User>> {
        check(form)?;
        begin(&self.store, users).await;

        let request = ApiRequest::post(SIGNUP_PATH).with_multipart(form.multipart());
        match self.client.fetch::<User>(&request).await {
            Ok(envelope) => {
                let user = envelope.into_data();
                if let Some(user) = &user {
                    info!(user_id = %user.id, "Account created, awaiting verification");
                    self.session.set_verify_user_id(Some(user.id.clone()));
                }
                self.store
                    .update(|s| s.users.login_fulfilled(user.clone()))
                    .await;
                Ok(user)
            }
            Err(e) => Err(reject(&self.store, users, e, "signup failed").await),
        }
    }

    pub async fn verify_otp(&self, form: &VerifyOtpForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(VERIFY_OTP_PATH, form.body(), "OTP verification failed")
            .await?;
        self.session.set_verify_user_id(None);
        Ok(())
    }

    pub async fn resend_verification_otp(&self, form: &ResendOtpForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(RESEND_OTP_PATH, form.body(), "Failed to resend OTP")
            .await
    }

    pub async fn change_password(&self, form: &ChangePasswordForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(CHANGE_PASSWORD_PATH, form.body(), "Failed to update password")
            .await
    }

    /// End the backend session and drop the cached user
    pub async fn logout(&self) -> ConsoleResult<()> {
        begin(&self.store, users).await;

        match self.client.send(&ApiRequest::post(LOGOUT_PATH)).await {
            Ok(_) => {
                info!("Signed out");
                self.session.set_current_user(None);
                self.store
                    .update(|s| {
                        s.users.current_user = None;
                        s.users.fulfill();
                    })
                    .await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, users, e, "Logout failed").await),
        }
    }

    /// Start the password reset flow; the address is kept for the next steps
    pub async fn forgot_password(&self, form: &ForgotPasswordForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(
            FORGOT_PASSWORD_PATH,
            form.body(),
            "Failed to send reset code",
        )
        .await?;
        self.session.set_reset_email(Some(form.email.clone()));
        Ok(())
    }

    pub async fn verify_reset_otp(&self, form: &VerifyResetOtpForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(VERIFY_RESET_OTP_PATH, form.body(), "OTP verification failed")
            .await
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> ConsoleResult<()> {
        check(form)?;
        self.send_json(RESET_PASSWORD_PATH, form.body(), "Failed to reset password")
            .await?;
        self.session.set_reset_email(None);
        Ok(())
    }

    /// Forget the signed-in user without calling the backend
    pub async fn logout_local(&self) {
        self.session.set_current_user(None);
        self.store.update(|s| s.users.logout()).await;
    }

    /// Consume a pending redirect, signing the store out along with the session
    pub async fn follow_redirect(&self) -> Option<String> {
        let route = self.session.take_redirect()?;
        self.logout_local().await;
        Some(route)
    }

    /// Load the cached user from the session into the store
    pub async fn hydrate_current_user(&self) -> Option<User> {
        let cached = self.session.current_user();
        self.store
            .update(|s| s.users.hydrate_current_user(cached.clone()))
            .await;
        cached
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// POST a JSON body where only the request status is recorded
    async fn send_json(&self, path: &str, body: Value, fallback: &str) -> ConsoleResult<()> {
        begin(&self.store, users).await;

        let request = ApiRequest::post(path).with_json(body);
        match self.client.send(&request).await {
            Ok(_) => {
                self.store.update(|s| s.users.fulfill()).await;
                Ok(())
            }
            Err(e) => Err(reject(&self.store, users, e, fallback).await),
        }
    }
}
