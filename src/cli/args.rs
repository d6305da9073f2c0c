use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cert-portal")]
#[command(version = "1.0.0")]
#[command(about = "Portal page renderer and download client for a certificate issuance endpoint")]
#[command(long_about = None)]
pub struct Cli {
    /// Certificate download endpoint URL
    #[arg(long, env = "CERT_PORTAL_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Config file path (default: ~/.config/cert-portal/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output raw tab-separated values (no formatting)
    #[arg(short, long)]
    pub raw: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download certificates from the issuance endpoint
    Fetch {
        #[command(subcommand)]
        command: FetchCommands,
    },
    /// Portal page operations
    Page {
        #[command(subcommand)]
        command: PageCommands,
    },
    /// Download endpoint resolution
    Endpoint {
        #[command(subcommand)]
        command: EndpointCommands,
    },
    /// Show details of a downloaded certificate file
    Inspect {
        /// Path to a PEM certificate file
        file: PathBuf,
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

#[derive(Subcommand)]
pub enum FetchCommands {
    /// Download the long-lived user certificate
    User {
        /// Write the certificate to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Username for endpoint authentication (prompts for password)
        #[arg(long, short = 'u')]
        username: Option<String>,
    },
    /// Download a short-lived proxy certificate
    Proxy {
        /// Requested lifetime in days (1-14)
        days: String,
        /// Write the certificate to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Username for endpoint authentication (prompts for password)
        #[arg(long, short = 'u')]
        username: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PageCommands {
    /// Compose the portal page from the site directory
    Render {
        /// Directory holding the page fragments (default: site/ or config)
        #[arg(long, short = 's')]
        site_dir: Option<PathBuf>,
        /// Write the page to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Report which fragment variant each page section resolves to
    Check {
        /// Directory holding the page fragments (default: site/ or config)
        #[arg(long, short = 's')]
        site_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EndpointCommands {
    /// Show the endpoint the portal would use
    Show,
    /// Drop the cached DNS-discovered endpoint
    ClearCache,
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Generate bash completion script
    Bash,
    /// Generate zsh completion script
    Zsh,
    /// Generate fish completion script
    Fish,
    /// Generate PowerShell completion script
    PowerShell,
}

impl CompletionCommands {
    pub fn shell(&self) -> Shell {
        match self {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::PowerShell => Shell::PowerShell,
        }
    }
}
