use std::path::PathBuf;

use crate::config::Overrides;

#[derive(clap::Parser, Debug)]
#[command(name = "repofs", about = "Read and write files in a GitLab repository branch")]
pub struct Cli {
    /// GitLab instance URL, e.g. https://gitlab.com
    #[clap(long, global = true)]
    pub base_url: Option<String>,
    /// Numeric project id or URL-encoded namespace path
    #[clap(long, global = true)]
    pub project: Option<String>,
    /// Branch to read from and commit to
    #[clap(long, short, global = true)]
    pub branch: Option<String>,
    /// Personal access token
    #[clap(long, global = true)]
    pub token: Option<String>,
    /// Log every request
    #[clap(long, short, global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            project_id: self.project.clone(),
            branch: self.branch.clone(),
            access_token: self.token.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print a file's content
    Cat { path: String },
    /// Print a file's API representation as JSON
    Show { path: String },
    /// Print size, mimetype and last commit time of a file
    Stat { path: String },
    /// Exit successfully if the file exists
    Exists { path: String },
    /// List a directory
    Ls {
        /// Directory to list; the repository root when omitted
        dir: Option<String>,
        #[clap(long, short)]
        recursive: bool,
    },
    /// Upload a file from disk or stdin
    Put {
        path: String,
        /// Local file to upload; stdin when omitted
        #[clap(long, short)]
        file: Option<PathBuf>,
        /// Replace an existing file instead of creating a new one
        #[clap(long)]
        overwrite: bool,
        /// Commit message
        #[clap(long, short)]
        message: Option<String>,
    },
    /// Delete a file
    Rm {
        path: String,
        /// Commit message
        #[clap(long, short)]
        message: Option<String>,
    },
    /// Copy a file
    Cp { from: String, to: String },
    /// Move a file
    Mv { from: String, to: String },
    /// Create a directory
    Mkdir { dir: String },
    /// Delete a directory and every file below it
    Rmdir { dir: String },
    /// Manage configuration
    Config {
        #[clap(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
    /// Show all configuration
    Show,
    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[clap(long)]
        force: bool,
    },
}
