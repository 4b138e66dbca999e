//! User entity mirrored from the LMS backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Platform administrator
    Admin,
    /// Course author
    Instructor,
    /// Learner
    Student,
}

impl Default for Role {
    fn default() -> Self {
        Role::Student
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Instructor => "INSTRUCTOR",
            Role::Student => "STUDENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "INSTRUCTOR" => Ok(Role::Instructor),
            "STUDENT" | "USER" => Ok(Role::Student),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Account status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Pending,
    Suspended,
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Pending
    }
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Pending => "PENDING",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(UserStatus::Active),
            "PENDING" => Ok(UserStatus::Pending),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {}", s)),
        }
    }
}

/// User record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend document id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub full_name: String,

    pub email: String,

    #[serde(default)]
    pub role: Role,

    #[serde(default)]
    pub status: UserStatus,

    #[serde(default)]
    pub is_email_verified: bool,

    /// Avatar URL
    #[serde(default)]
    pub avatar: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_instructor(&self) -> bool {
        self.role == Role::Instructor
    }

    /// Whether the account may sign in and use the console
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_document() {
        let json = r#"{
            "_id": "65f1c2a9e4b0a1b2c3d4e5f6",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "INSTRUCTOR",
            "status": "ACTIVE",
            "isEmailVerified": true,
            "avatar": "https://cdn.example.com/ada.png",
            "createdAt": "2024-03-13T10:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(user.full_name, "Ada Lovelace");
        assert!(user.is_instructor());
        assert!(user.is_active());
        assert!(user.is_email_verified);
        assert!(user.created_at.is_some());
        assert!(user.updated_at.is_none());
    }

    #[test]
    fn test_user_accepts_plain_id_and_defaults() {
        let user: User = serde_json::from_str(r#"{"id":"u1","email":"a@b.com"}"#).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.status, UserStatus::Pending);
        assert!(!user.is_email_verified);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::Student);
        assert!("guest".parse::<Role>().is_err());
        assert_eq!(Role::Instructor.to_string(), "INSTRUCTOR");
    }
}
