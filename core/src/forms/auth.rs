//! Authentication and account forms

use serde_json::{json, Value};
use validator::{Validate, ValidationError};

use crate::domain::Role;
use crate::transport::{FileUpload, MultipartForm};

use super::{invalid, validate_otp, validate_upload};

#[derive(Debug, Clone, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn body(&self) -> Value {
        json!({ "email": self.email, "password": self.password })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Enter a valid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub password: String,

    pub role: Role,

    #[validate(required(message = "Avatar is required"), custom = "validate_upload")]
    pub avatar: Option<FileUpload>,
}

impl SignupForm {
    pub fn multipart(&self) -> MultipartForm {
        MultipartForm::new()
            .text("fullName", &self.full_name)
            .text("email", &self.email)
            .text("password", &self.password)
            .text("role", self.role)
            .opt_file("avatar", self.avatar.clone())
    }
}

#[derive(Debug, Clone, Validate)]
pub struct VerifyOtpForm {
    #[validate(custom = "validate_otp")]
    pub verification_code: String,

    #[validate(length(min = 1, message = "Missing user to verify"))]
    pub user_id: String,
}

impl VerifyOtpForm {
    pub fn body(&self) -> Value {
        json!({ "verificationCode": self.verification_code, "userId": self.user_id })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ResendOtpForm {
    #[validate(length(min = 1, message = "Missing user to verify"))]
    pub user_id: String,
}

impl ResendOtpForm {
    pub fn body(&self) -> Value {
        json!({ "userId": self.user_id })
    }
}

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_new_password_differs"))]
pub struct ChangePasswordForm {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub new_password: String,
}

fn validate_new_password_differs(form: &ChangePasswordForm) -> Result<(), ValidationError> {
    if form.current_password == form.new_password {
        return Err(invalid(
            "same_password",
            "New password must differ from the current one",
        ));
    }
    Ok(())
}

impl ChangePasswordForm {
    pub fn body(&self) -> Value {
        json!({
            "currentPassword": self.current_password,
            "newPassword": self.new_password,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn body(&self) -> Value {
        json!({ "email": self.email })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct VerifyResetOtpForm {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(custom = "validate_otp")]
    pub otp: String,
}

impl VerifyResetOtpForm {
    pub fn body(&self) -> Value {
        json!({ "email": self.email, "otp": self.otp })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ResetPasswordForm {
    #[validate(email(message = "Invalid email"))]
    pub email: String,

    #[validate(length(min = 6, message = "Minimum 6 characters"))]
    pub new_password: String,
}

impl ResetPasswordForm {
    pub fn body(&self) -> Value {
        json!({ "email": self.email, "newPassword": self.new_password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{check, FORM_LEVEL};

    #[test]
    fn test_login_requires_valid_email_and_password() {
        assert!(check(&LoginForm::new("a@b.com", "x")).is_ok());

        let error = check(&LoginForm::new("not-an-email", "")).unwrap_err();
        assert!(error.has_field("email"));
        assert!(error.has_field("password"));
        assert_eq!(
            error.field_messages()["password"],
            vec!["Password is required".to_string()]
        );
    }

    #[test]
    fn test_signup_requires_avatar_and_long_password() {
        let form = SignupForm {
            full_name: "Ada".to_string(),
            email: "ada@lms.dev".to_string(),
            password: "12345".to_string(),
            role: Role::Instructor,
            avatar: None,
        };

        let error = check(&form).unwrap_err();
        assert!(error.has_field("password"));
        assert!(error.has_field("avatar"));
        assert!(!error.has_field("email"));
    }

    #[test]
    fn test_signup_rejects_empty_avatar() {
        let mut form = SignupForm {
            full_name: "Ada".to_string(),
            email: "ada@lms.dev".to_string(),
            password: "secret1".to_string(),
            role: Role::Student,
            avatar: Some(FileUpload::new("a.png", "image/png", Vec::new())),
        };

        let error = check(&form).unwrap_err();
        assert_eq!(error.field_messages()["avatar"], vec!["File is empty".to_string()]);

        form.avatar = Some(FileUpload::new("a.png", "image/png", vec![1, 2]));
        assert!(check(&form).is_ok());
    }

    #[test]
    fn test_signup_multipart_fields() {
        let form = SignupForm {
            full_name: "Ada".to_string(),
            email: "ada@lms.dev".to_string(),
            password: "secret1".to_string(),
            role: Role::Instructor,
            avatar: Some(FileUpload::new("a.png", "image/png", vec![1])),
        };

        let multipart = form.multipart();
        assert_eq!(multipart.text_value("fullName"), Some("Ada"));
        assert_eq!(multipart.text_value("role"), Some("INSTRUCTOR"));
        assert!(multipart.has_file("avatar"));
    }

    #[test]
    fn test_otp_must_be_six_digits() {
        let mut form = VerifyOtpForm {
            verification_code: "12345".to_string(),
            user_id: "u1".to_string(),
        };
        assert!(check(&form).unwrap_err().has_field("verification_code"));

        form.verification_code = "12a456".to_string();
        assert!(check(&form).is_err());

        form.verification_code = "123456".to_string();
        assert!(check(&form).is_ok());
        assert_eq!(form.body()["verificationCode"], "123456");
    }

    #[test]
    fn test_change_password_must_differ() {
        let form = ChangePasswordForm {
            current_password: "secret1".to_string(),
            new_password: "secret1".to_string(),
        };
        assert!(check(&form).unwrap_err().has_field(FORM_LEVEL));

        let form = ChangePasswordForm {
            current_password: "secret1".to_string(),
            new_password: "secret2".to_string(),
        };
        assert!(check(&form).is_ok());
    }

    #[test]
    fn test_reset_password_min_length() {
        let form = ResetPasswordForm {
            email: "ada@lms.dev".to_string(),
            new_password: "abc".to_string(),
        };
        assert!(check(&form).unwrap_err().has_field("new_password"));
    }
}
