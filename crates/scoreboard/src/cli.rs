//! Clap derive structures for the `scoreboard` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// scoreboard -- track game scores from the command line
#[derive(Debug, Parser)]
#[command(
    name = "scoreboard",
    version,
    about = "Manage groups, scorables and scores on a scoreboard server",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "SCOREBOARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL, e.g. http://localhost:8000/api (overrides profile)
    #[arg(long, env = "SCOREBOARD_SERVER", global = true)]
    pub server: Option<String>,

    /// Username to log in as (overrides profile)
    #[arg(long, short = 'u', env = "SCOREBOARD_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, env = "SCOREBOARD_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SCOREBOARD_OUTPUT",
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
    #[arg(long, short = 'k', env = "SCOREBOARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SCOREBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// How often `watch` checks the server for changes, in milliseconds
    #[arg(long, env = "SCOREBOARD_POLL_INTERVAL_MS", global = true)]
    pub poll_interval_ms: Option<u64>,
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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials by logging in
    Login,

    /// Show who the server thinks you are
    Whoami,

    /// Manage user accounts
    Users(UsersArgs),

    /// Manage groups
    #[command(alias = "g")]
    Groups(GroupsArgs),

    /// Manage scorables (games, events, ...) within a group
    #[command(alias = "s")]
    Scorables(ScorablesArgs),

    /// Manage scores for a scorable
    Scores(ScoresArgs),

    /// Print the server's current change marker
    LastChanged,

    /// Show scores for a scorable and refresh them whenever the server changes
    Watch {
        /// Scorable ID
        scorable: String,

        /// Max scores to show
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// Create a user or change a password
    ///
    /// Without --name, changes the logged-in user's password.
    Upsert {
        /// Username to create or update
        #[arg(long)]
        name: Option<String>,

        /// New password (prompted when omitted)
        #[arg(long = "new-password")]
        new_password: Option<String>,
    },

    /// Delete a user
    Delete {
        /// Username
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List all groups
    #[command(alias = "ls")]
    List,

    /// Get group details
    Get {
        /// Group ID
        id: String,
    },

    /// Create a group, or rename one with --id
    Upsert {
        /// Existing group ID
        #[arg(long)]
        id: Option<String>,

        /// Group name
        #[arg(long, required = true)]
        name: String,
    },

    /// Delete a group
    Delete {
        /// Group ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCORABLES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ScorablesArgs {
    #[command(subcommand)]
    pub command: ScorablesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScorablesCommand {
    /// List scorables in a group
    #[command(alias = "ls")]
    List {
        /// Group ID
        group: String,
    },

    /// Get scorable details
    Get {
        /// Scorable ID
        id: String,
    },

    /// Create a scorable, or rename one with --id
    Upsert {
        /// Existing scorable ID
        #[arg(long)]
        id: Option<String>,

        /// Group the scorable belongs to
        #[arg(long, required = true)]
        group: String,

        /// Scorable name
        #[arg(long, required = true)]
        name: String,
    },

    /// Delete a scorable
    Delete {
        /// Scorable ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SCORES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ScoresArgs {
    #[command(subcommand)]
    pub command: ScoresCommand,
}

#[derive(Debug, Subcommand)]
pub enum ScoresCommand {
    /// List scores for a scorable
    #[command(alias = "ls")]
    List {
        /// Scorable ID
        scorable: String,

        /// Max scores to return
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// Record a score, or edit one with --id
    Upsert {
        /// Existing score ID
        #[arg(long)]
        id: Option<String>,

        /// Scorable the score belongs to
        #[arg(long, required = true)]
        scorable: String,

        /// Player (defaults to the logged-in user)
        #[arg(long)]
        player: Option<String>,

        /// Score value
        #[arg(long, required = true, allow_negative_numbers = true)]
        value: i64,

        /// When the score was achieved (RFC 3339; defaults to now on the server)
        #[arg(long)]
        date: Option<chrono::DateTime<chrono::Utc>>,
    },

    /// Delete a score
    Delete {
        /// Score ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
