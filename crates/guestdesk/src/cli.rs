//! Clap derive structures for the `guestdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use guestdesk_core::{DateRange, SortDirection};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// guestdesk -- admin console for the hotel guest-management backend
#[derive(Debug, Parser)]
#[command(
    name = "guestdesk",
    version,
    about = "Manage hotel orders, rooms, staff, and products from the command line",
    long_about = "Administer a hotel guest-management backend.\n\n\
        Lists support the same search/status/date filters as the web admin,\n\
        evaluated locally over the fetched collection; exports are pure\n\
        client-side CSV of whatever the filters matched.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "GUESTDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 's', env = "GUESTDESK_SERVER", global = true)]
    pub server: Option<String>,

    /// Session token (overrides keyring/profile)
    #[arg(long, env = "GUESTDESK_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GUESTDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GUESTDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GUESTDESK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Shared list arguments ────────────────────────────────────────────

/// Filter/sort/page flags shared by every `list` and `export` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListOpts {
    /// Free-text search across the entity's text fields
    #[arg(long, short = 'S')]
    pub search: Option<String>,

    /// Status/category code filter (e.g. P, CA; G, V; ADMIN)
    #[arg(long)]
    pub status: Option<String>,

    /// Created-at window
    #[arg(long, value_enum, default_value = "all")]
    pub range: RangeArg,

    /// Sort field (created_at, total_amount, name, ...)
    #[arg(long, default_value = "created_at")]
    pub sort: String,

    /// Sort direction
    #[arg(long, value_enum, default_value = "desc")]
    pub dir: DirArg,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page
    #[arg(long, default_value = "10")]
    pub page_size: usize,

    /// Ignore pagination and show every matching row
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RangeArg {
    #[default]
    All,
    Today,
    Week,
    Month,
    #[value(name = "3months")]
    ThreeMonths,
}

impl From<RangeArg> for DateRange {
    fn from(arg: RangeArg) -> Self {
        match arg {
            RangeArg::All => Self::All,
            RangeArg::Today => Self::Today,
            RangeArg::Week => Self::Week,
            RangeArg::Month => Self::Month,
            RangeArg::ThreeMonths => Self::ThreeMonths,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DirArg {
    Asc,
    #[default]
    Desc,
}

impl From<DirArg> for SortDirection {
    fn from(arg: DirArg) -> Self {
        match arg {
            DirArg::Asc => Self::Asc,
            DirArg::Desc => Self::Desc,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and manage customer orders
    #[command(alias = "ord", alias = "o")]
    Orders(OrdersArgs),

    /// Manage hotel rooms
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Manage staff accounts
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Manage shop products
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// Manage product categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Sign in / out of the backend
    Auth(AuthArgs),

    /// Inspect and edit configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List orders (filtered, sorted, paginated locally)
    #[command(alias = "ls")]
    List(ListOpts),

    /// Show one order with its line items
    Get { id: i64 },

    /// Per-status counts and revenue over the matching orders
    Stats(ListOpts),

    /// Transition an order's status (P, C, PR, S, D, CA, R)
    SetStatus { id: i64, status: String },

    /// Delete an order
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Export the matching orders as CSV
    Export {
        #[command(flatten)]
        opts: ListOpts,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

// ── Rooms ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    #[command(alias = "ls")]
    List(ListOpts),

    /// Show one room
    Get { id: i64 },

    /// Create a room
    Create {
        /// Unique room code (e.g. R-101)
        #[arg(long)]
        code: String,

        /// Category code: G, V, S, D
        #[arg(long, default_value = "G")]
        category: String,

        /// Price per night
        #[arg(long)]
        price: String,

        /// Guest capacity
        #[arg(long, default_value = "1")]
        capacity: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Update a room (only the given flags change)
    Update {
        id: i64,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        capacity: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Activate or deactivate the room
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a room
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Export the matching rooms as CSV
    Export {
        #[command(flatten)]
        opts: ListOpts,

        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List staff accounts
    #[command(alias = "ls")]
    List(ListOpts),

    /// Show one staff account
    Get { id: i64 },

    /// Create a staff account (prompts for the password)
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,

        /// Role code: ADMIN, MANAGER, STAFF
        #[arg(long, default_value = "STAFF")]
        role: String,
    },

    /// Update a staff account
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        role: Option<String>,

        /// Status code: ACTIVE, INACTIVE
        #[arg(long)]
        status: Option<String>,
    },

    /// Reset a staff account's password (prompts)
    ResetPassword { id: i64 },

    /// Delete a staff account
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Export the matching accounts as CSV
    Export {
        #[command(flatten)]
        opts: ListOpts,

        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ListOpts),

    /// Show one product
    Get { id: i64 },

    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        cost: String,

        #[arg(long)]
        price: String,

        #[arg(long, default_value = "0")]
        quantity: String,

        #[arg(long)]
        description: Option<String>,

        /// Category ids (repeatable)
        #[arg(long = "category")]
        categories: Vec<i64>,
    },

    /// Update a product
    Update {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        cost: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        quantity: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Export the matching products as CSV
    Export {
        #[command(flatten)]
        opts: ListOpts,

        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List product categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete { id: i64 },
}

// ── Auth / Config / Completions ──────────────────────────────────────

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Sign in and store the session token in the OS keyring
    Login {
        /// Staff e-mail (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Invalidate the session and clear the stored token
    Logout,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile interactively
    Init,

    /// Print the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
