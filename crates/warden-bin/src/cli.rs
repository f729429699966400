// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! Each subcommand stands in for one console view or action:
//!
//! - `login` / `logout` / `whoami`: session lifecycle
//! - `can` / `nav` / `guard`: local authorization queries
//! - `register` / `users` / `scans` / `roles`: user management
//! - `logs` / `kpi`: dashboard data
//! - `update-profile` / `admin-update` / `reset-password`: profile changes
//! - `validate` / `version`: housekeeping

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use warden_client::models::ScanStatus;
use warden_core::{Action, Subject};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Warden - admin console for document scanning operations
///
/// Signs operators in, keeps their session between invocations and exposes
/// the console's views as subcommands.
#[derive(Parser, Debug)]
#[command(
    name = "warden",
    author = "Sylvex <contact@sylvex.io>",
    version = warden_core::VERSION,
    about = "Admin console for document scanning operations",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path
    #[arg(
        short,
        long,
        default_value = "warden.yaml",
        env = "WARDEN_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format (text, json, compact); overrides the config file
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Output format for command results
    #[arg(short, long, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Enable quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the Warden CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and discard the stored session
    Logout,

    /// Show the signed-in operator
    ///
    /// This is the default command when no subcommand is specified.
    Whoami,

    /// Check whether the session permits an action on a subject
    Can(CanArgs),

    /// List the navigation entries the session can see
    Nav,

    /// Run the route guard for a path
    Guard(GuardArgs),

    /// Register a new user
    Register(RegisterArgs),

    /// List users with scan totals
    Users,

    /// Browse a user's scan logs
    Scans(ScansArgs),

    /// List roles
    Roles(RolesArgs),

    /// Browse activity logs
    Logs(LogsArgs),

    /// Show dashboard counters
    Kpi,

    /// Update your own profile
    #[command(name = "update-profile")]
    UpdateProfile(UpdateProfileArgs),

    /// Update another user's name
    #[command(name = "admin-update")]
    AdminUpdate(AdminUpdateArgs),

    /// Reset another user's password
    #[command(name = "reset-password")]
    ResetPassword(ResetPasswordArgs),

    /// Validate the configuration file
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Password source shared by commands that take one.
#[derive(Args, Debug, Default, Clone)]
pub struct PasswordArgs {
    /// Password
    #[arg(long, env = "WARDEN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the password from stdin
    #[arg(long, conflicts_with = "password")]
    pub password_stdin: bool,
}

/// Arguments for the `login` command.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub password: PasswordArgs,

    /// Path to return to after signing in
    #[arg(long)]
    pub from: Option<String>,
}

/// Arguments for the `can` command.
#[derive(Args, Debug, Clone)]
pub struct CanArgs {
    /// Action (read, create, update, delete, manage)
    pub action: Action,

    /// Subject (Dashboard, Logs, User, Role, Scan, all)
    pub subject: Subject,
}

/// Arguments for the `guard` command.
#[derive(Args, Debug, Clone)]
pub struct GuardArgs {
    /// Requested path
    pub path: String,
}

/// Arguments for the `register` command.
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    pub first_name: String,

    /// Last name
    #[arg(long)]
    pub last_name: String,

    /// Email
    #[arg(long)]
    pub email: String,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub password: PasswordArgs,

    /// Role ID (default: first assignable role)
    #[arg(long)]
    pub role_id: Option<i64>,
}

/// Arguments for the `scans` command.
#[derive(Args, Debug, Clone)]
pub struct ScansArgs {
    /// User ID
    pub user_id: i64,

    /// Status filter (success, failed)
    #[arg(short, long, value_parser = parse_scan_status)]
    pub status: Option<ScanStatus>,

    /// Rows to skip
    #[arg(long, default_value = "0", conflicts_with = "page")]
    pub offset: u32,

    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<u32>,
}

impl ScansArgs {
    /// Returns the effective offset, or `None` when `--page` is too large to
    /// address.
    pub fn effective_offset(&self) -> Option<u32> {
        match self.page {
            Some(page) => page
                .saturating_sub(1)
                .checked_mul(warden_client::models::SCAN_PAGE_SIZE),
            None => Some(self.offset),
        }
    }
}

/// Arguments for the `roles` command.
#[derive(Args, Debug, Default, Clone)]
pub struct RolesArgs {
    /// Include roles that cannot be assigned at registration
    #[arg(short, long)]
    pub all: bool,
}

/// Arguments for the `logs` command.
#[derive(Args, Debug, Default, Clone)]
pub struct LogsArgs {
    /// 1-based page number
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub limit: Option<u32>,

    /// Free-text search
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the `update-profile` command.
#[derive(Args, Debug, Default, Clone)]
pub struct UpdateProfileArgs {
    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// New email
    #[arg(long)]
    pub email: Option<String>,
}

/// Arguments for the `admin-update` command.
#[derive(Args, Debug, Clone)]
pub struct AdminUpdateArgs {
    /// User ID
    pub user_id: i64,

    /// New first name
    #[arg(long)]
    pub first_name: String,

    /// New last name
    #[arg(long)]
    pub last_name: String,
}

/// Arguments for the `reset-password` command.
#[derive(Args, Debug, Clone)]
pub struct ResetPasswordArgs {
    /// User ID
    pub user_id: i64,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub password: PasswordArgs,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Default, Clone)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<warden_config::LogFormat> for LogFormat {
    fn from(format: warden_config::LogFormat) -> Self {
        match format {
            warden_config::LogFormat::Text => LogFormat::Text,
            warden_config::LogFormat::Json => LogFormat::Json,
            warden_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

fn parse_scan_status(s: &str) -> Result<ScanStatus, String> {
    ScanStatus::parse(s).ok_or_else(|| format!("unknown status '{s}' (expected success or failed)"))
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective command, defaulting to `Whoami` if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Whoami)
    }

    /// Check if verbose logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Get the effective log level based on flags, then the config file.
    pub fn effective_log_level(&self, configured: Option<warden_config::LogLevel>) -> String {
        if self.quiet {
            "warn".to_string()
        } else if self.verbose {
            "debug".to_string()
        } else if let Some(ref level) = self.log_level {
            level.clone()
        } else {
            configured.unwrap_or_default().as_str().to_string()
        }
    }

    /// Get the effective log format, preferring the flag over the config file.
    pub fn effective_log_format(&self, configured: Option<warden_config::LogFormat>) -> LogFormat {
        self.log_format
            .or_else(|| configured.map(LogFormat::from))
            .unwrap_or_default()
    }

    /// Returns `true` for JSON output.
    pub fn json_output(&self) -> bool {
        self.output == OutputFormat::Json
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command() {
        let cli = Cli::parse_from(["warden"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.effective_command(), Commands::Whoami));
    }

    #[test]
    fn test_login_command() {
        let cli = Cli::parse_from([
            "warden",
            "login",
            "ops@example.com",
            "--password-stdin",
            "--from",
            "/dashboard/users",
        ]);
        if let Some(Commands::Login(args)) = cli.command {
            assert_eq!(args.email, "ops@example.com");
            assert!(args.password.password_stdin);
            assert_eq!(args.from.as_deref(), Some("/dashboard/users"));
        } else {
            panic!("Expected Login command");
        }
    }

    #[test]
    fn test_can_command_parses_names() {
        let cli = Cli::parse_from(["warden", "can", "read", "logs"]);
        if let Some(Commands::Can(args)) = cli.command {
            assert_eq!(args.action, Action::Read);
            assert_eq!(args.subject, Subject::Logs);
        } else {
            panic!("Expected Can command");
        }
        assert!(Cli::try_parse_from(["warden", "can", "fly", "User"]).is_err());
    }

    #[test]
    fn test_scans_command() {
        let cli = Cli::parse_from(["warden", "scans", "5", "--status", "FAILED", "--page", "3"]);
        if let Some(Commands::Scans(args)) = cli.command {
            assert_eq!(args.user_id, 5);
            assert_eq!(args.status, Some(ScanStatus::Failed));
            assert_eq!(args.effective_offset(), Some(40));
        } else {
            panic!("Expected Scans command");
        }
        assert!(Cli::try_parse_from(["warden", "scans", "5", "--status", "pending"]).is_err());
    }

    #[test]
    fn test_scans_offset_bounds() {
        let cli = Cli::parse_from(["warden", "scans", "1", "--page", "300000000"]);
        let Some(Commands::Scans(args)) = cli.command else {
            panic!("Expected Scans command");
        };
        assert_eq!(args.effective_offset(), None);

        let cli = Cli::parse_from(["warden", "scans", "1", "--offset", "4294967290"]);
        let Some(Commands::Scans(args)) = cli.command else {
            panic!("Expected Scans command");
        };
        assert_eq!(args.effective_offset(), Some(4_294_967_290));
    }

    #[test]
    fn test_config_path() {
        let cli = Cli::parse_from(["warden", "-c", "/etc/warden/warden.yaml"]);
        assert_eq!(cli.config, PathBuf::from("/etc/warden/warden.yaml"));
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::parse_from(["warden"]);
        assert_eq!(cli.effective_log_level(None), "info");
        assert_eq!(cli.effective_log_level(Some(warden_config::LogLevel::Error)), "error");

        let cli = Cli::parse_from(["warden", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(Some(warden_config::LogLevel::Error)), "trace");

        let cli = Cli::parse_from(["warden", "-q", "-l", "trace"]);
        assert_eq!(cli.effective_log_level(None), "warn");

        let cli = Cli::parse_from(["warden", "-v"]);
        assert!(cli.is_verbose());
        assert_eq!(cli.effective_log_level(None), "debug");
    }

    #[test]
    fn test_log_format_precedence() {
        let cli = Cli::parse_from(["warden"]);
        assert_eq!(cli.effective_log_format(None), LogFormat::Text);
        assert_eq!(
            cli.effective_log_format(Some(warden_config::LogFormat::Json)),
            LogFormat::Json
        );

        let cli = Cli::parse_from(["warden", "--log-format", "compact"]);
        assert_eq!(
            cli.effective_log_format(Some(warden_config::LogFormat::Json)),
            LogFormat::Compact
        );
    }

    #[test]
    fn test_output_format() {
        assert!(Cli::parse_from(["warden", "nav", "-o", "json"]).json_output());
        assert!(!Cli::parse_from(["warden", "nav"]).json_output());
    }
}
