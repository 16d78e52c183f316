use clap::{Args, Parser, Subcommand};
use copydeck::model::Scope;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "copydeck", version)]
#[command(about = "Keep marketing copy in sync with its store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store location (defaults to $COPYDECK_HOME, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScopeArgs {
    /// Site the copy belongs to
    #[arg(long)]
    pub site: String,

    /// User the copy belongs to
    #[arg(long)]
    pub user: String,
}

impl From<ScopeArgs> for Scope {
    fn from(args: ScopeArgs) -> Self {
        Scope::new(args.site, args.user)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile a JSON list of drafts into the store
    #[command(alias = "s")]
    Sync {
        #[command(flatten)]
        scope: ScopeArgs,

        /// JSON file with an array of drafts ("-" reads stdin)
        drafts: PathBuf,

        /// The drafts are the complete list: delete records they do not mention
        #[arg(long)]
        authoritative: bool,

        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Never match drafts without an id by title
        #[arg(long)]
        no_title_match: bool,

        /// Print the result as {"success": ..., "error": ...}
        #[arg(long)]
        json: bool,
    },

    /// List stored copy
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., match-titles)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
