/// Command-line arguments
use admin_core::{SortDirection, SortKey};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "admin-panel")]
#[command(about = "Manage the users of a REST backend", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./admin.toml when present)
    #[arg(short, long, global = true, env = "ADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level for the admin panel crates (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List, add, edit or delete users
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Show registration counts for the last 24 hours, 7, 15 and 30 days
    Metrics {
        /// Keep refreshing until interrupted
        #[arg(long)]
        watch: bool,
        /// Seconds between refreshes (defaults to metrics.refresh_interval_secs)
        #[arg(long)]
        interval: Option<u64>,
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
    /// Create an operator account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Sign in with email and password
    Login {
        /// Defaults to auth.email
        #[arg(long)]
        email: Option<String>,
        /// Defaults to auth.password
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Print one page of users
    List {
        /// Case-insensitive match against the name
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(long, value_enum, default_value = "name")]
        sort: SortArg,
        #[arg(long, value_enum, default_value = "asc")]
        order: OrderArg,
        /// 1-based; out-of-range pages are clamped
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// One of 5, 10, 25, 50 (defaults to view.page_size)
        #[arg(long)]
        page_size: Option<usize>,
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },
    /// Create a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: String,
    },
    /// Change fields of an existing user
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Remove a user
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Email,
    Role,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Email => SortKey::Email,
            SortArg::Role => SortKey::Role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Asc => SortDirection::Ascending,
            OrderArg::Desc => SortDirection::Descending,
        }
    }
}
