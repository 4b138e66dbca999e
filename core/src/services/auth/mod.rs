//! Authentication service module
//!
//! Sign-in, sign-up with e-mail OTP verification, password change and the
//! forgot/reset password flow. Operations update the user slice and keep the
//! session cache in step with it.

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
