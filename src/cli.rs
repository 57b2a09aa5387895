use clap::{ArgAction, Parser, Subcommand};

/// CLI arguments parser using `clap`
#[derive(Parser, Debug)]
#[command(
    name = "git-profile",
    version,
    about = "git-profile - manage multiple git/GitHub identity profiles"
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand chosen to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new identity profile
    Add {
        /// Profile id (e.g. work, personal)
        #[arg(long)]
        id: Option<String>,
        /// Git user.name
        #[arg(long)]
        name: Option<String>,
        /// Git user.email
        #[arg(long)]
        email: Option<String>,
        /// SSH private key used for this identity
        #[arg(long)]
        ssh_key: Option<String>,
    },
    /// List configured profiles
    List,
    /// Apply a profile to this repo or globally
    Use {
        /// Apply to the global git config
        #[arg(long)]
        global: bool,
        /// Profile to apply
        profile_id: Option<String>,
    },
    /// Show current git identity and defaults
    Current,
    /// Interactively choose a profile and apply it locally
    Choose,
    /// Set the repo or global default profile (stored in git config)
    SetDefault {
        /// Store the default in the global git config
        #[arg(long)]
        global: bool,
        /// Profile to use as default
        profile_id: Option<String>,
    },
    /// Apply repo default, then global default, otherwise prompt (used by hooks)
    Ensure,
    /// Install hooks so plain `git commit` and `git push` call `git-profile ensure`
    InstallHooks,
}
