//! Form inputs for every mutating console operation.
//!
//! Each form carries its schema as `validator` derive attributes and knows
//! how to encode itself as a request body. Services validate a form before
//! touching the store, so invalid input never produces a pending state or a
//! request.

pub mod auth;
pub mod course;

use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::errors::FormError;
use crate::transport::FileUpload;

pub use auth::{
    ChangePasswordForm, ForgotPasswordForm, LoginForm, ResendOtpForm, ResetPasswordForm,
    SignupForm, VerifyOtpForm, VerifyResetOtpForm,
};
pub use course::{CourseForm, CourseUpdate, LessonForm, LessonUpdate, ModuleForm, ModuleUpdate};

/// Key under which struct-level checks report their errors
pub const FORM_LEVEL: &str = "__all__";

/// Run the schema checks of a form
pub fn check<F: Validate>(form: &F) -> Result<(), FormError> {
    form.validate().map_err(FormError::from)
}

pub(crate) fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn validate_otp(code: &str) -> Result<(), ValidationError> {
    if lms_shared::validation::is_otp_code(code) {
        Ok(())
    } else {
        Err(invalid("otp", "OTP must be 6 digits"))
    }
}

pub(crate) fn validate_upload(file: &FileUpload) -> Result<(), ValidationError> {
    if file.is_empty() {
        Err(invalid("empty_file", "File is empty"))
    } else {
        Ok(())
    }
}
