//! Command-line parsing

use clap::{Parser, Subcommand};
use lms_core::{Role, UserStatus};

const DEFAULT_SNAPSHOTS: usize = 1;

/// LMS console - course authoring, user management and enrollment tracking
#[derive(Parser, Debug)]
#[command(name = "lms-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// Selected command; no subcommand means `status`
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Status)
    }
}

/// One console invocation
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show the cached session
    Status,
    /// Sign in with `LMS_EMAIL` / `LMS_PASSWORD`
    Login,
    /// Sign out and clear the cached session
    Logout,
    /// List courses
    Courses {
        /// Title search term
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,
    },
    /// List users
    Users {
        /// Name or email search term
        #[arg(long)]
        search: Option<String>,

        /// student, instructor or admin
        #[arg(long)]
        role: Option<Role>,

        /// active, inactive, pending or banned
        #[arg(long)]
        status: Option<UserStatus>,

        #[arg(long)]
        page: Option<u32>,
    },
    /// List enrollments
    Enrollments {
        /// Match against course title or student name
        #[arg(long)]
        search: Option<String>,
    },
    /// Flip an enrollment between active and cancelled
    ToggleEnrollment {
        #[arg(value_name = "ENROLLMENT_ID")]
        enrollment_id: String,
    },
    /// Print snapshots from the signed-in user's dashboard stream
    Dashboard {
        /// Number of snapshots to print
        #[arg(long = "count", default_value_t = DEFAULT_SNAPSHOTS)]
        snapshots: usize,
    },
}
