use clap::{Parser, Subcommand};

/// `dossier` - Sign in to the analysis service and request company dossiers.
#[derive(Parser, Debug)]
#[command(name = "dossier")]
#[command(version = "0.1.0")]
#[command(about = "Client for the corporate site analysis service.", long_about = None)]
pub struct Cli {
    /// Log at debug level regardless of configuration
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create a new account
    Register {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in account and the views it can reach
    Whoami,

    /// Analyze a single site and print its dossier
    Scrape {
        /// Site URL (http or https)
        url: String,
    },

    /// Interactive conversation: one URL per line, empty line or EOF to quit
    Chat,

    /// User and cache management (privileged accounts only)
    Admin {
        #[command(subcommand)]
        admin_command: AdminCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List every account
    Users,

    /// Create an account
    CreateUser {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,
    },

    /// Delete an account by id
    DeleteUser {
        /// Account id as shown by `admin users`
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Drop every cached analysis on the service
    ClearCache {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
