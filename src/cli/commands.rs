use crate::cli::args::*;
use crate::dispatch::client::Credentials;
use crate::dispatch::service::{DeliveryTarget, DownloadService};
use crate::page::fragments::FragmentSet;
use crate::utils::config::PortalConfig;
use crate::utils::errors::{CertPortalError, Result};
use crate::utils::output::OutputFormat;
use crate::utils::paths::CertPortalPaths;
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io;
use std::path::PathBuf;

pub async fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "cert_portal=warn",  // Default: warnings only
            1 => "cert_portal=info",  // -v: info level
            2 => "cert_portal=debug", // -vv: debug level
            _ => "cert_portal=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    // Create output formatter
    let output = OutputFormat::new(cli.raw);

    // Ensure directories exist
    CertPortalPaths::ensure_all_dirs()?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => CertPortalPaths::config_file()?,
    };
    let config = PortalConfig::load(&config_path)?;

    match cli.command {
        Commands::Fetch { command } => handle_fetch_command(command, &cli.endpoint, &config).await,
        Commands::Page { command } => handle_page_command(command, &config, &output),
        Commands::Endpoint { command } => {
            handle_endpoint_command(command, &cli.endpoint, &config).await
        }
        Commands::Inspect { file, json } => crate::cert::show_certificate_file(&file, json, &output),
        Commands::Completion { ref command } => handle_completion_command(command),
    }
}

async fn handle_fetch_command(
    command: FetchCommands,
    cli_endpoint: &Option<String>,
    config: &PortalConfig,
) -> Result<()> {
    let endpoint = resolve_endpoint(cli_endpoint, config).await?;
    let service = DownloadService::new(endpoint)?;

    match command {
        FetchCommands::User { output, username } => {
            let credentials = read_credentials(username)?;
            let target = delivery_target(output);
            service
                .fetch_user_certificate(credentials.as_ref(), &target)
                .await
        }
        FetchCommands::Proxy {
            days,
            output,
            username,
        } => {
            let credentials = read_credentials(username)?;
            let target = delivery_target(output);
            service
                .fetch_proxy_certificate(&days, credentials.as_ref(), &target)
                .await
        }
    }
}

fn handle_page_command(
    command: PageCommands,
    config: &PortalConfig,
    output: &OutputFormat,
) -> Result<()> {
    match command {
        PageCommands::Render {
            site_dir,
            output: out_file,
        } => {
            let fragments = FragmentSet::new(resolve_site_dir(site_dir, config));
            let page = crate::page::compose(&fragments)?;

            match out_file {
                Some(path) => {
                    fs::write(&path, page)?;
                    eprintln!("Rendered page to {}", path.display());
                }
                None => print!("{page}"),
            }
            Ok(())
        }
        PageCommands::Check { site_dir } => {
            let fragments = FragmentSet::new(resolve_site_dir(site_dir, config));

            let mut rows: Vec<Vec<String>> = fragments
                .resolve_all()?
                .iter()
                .map(|fragment| {
                    vec![
                        fragment.section.to_string(),
                        if fragment.custom { "custom" } else { "default" }.to_string(),
                        fragment.file_name.to_string(),
                    ]
                })
                .collect();

            for sheet in fragments.stylesheets() {
                rows.push(vec![
                    "stylesheet".to_string(),
                    if sheet == crate::page::fragments::CUSTOM_STYLESHEET {
                        "custom"
                    } else {
                        "default"
                    }
                    .to_string(),
                    sheet.to_string(),
                ]);
            }

            output.print_table(&rows);
            Ok(())
        }
    }
}

async fn handle_endpoint_command(
    command: EndpointCommands,
    cli_endpoint: &Option<String>,
    config: &PortalConfig,
) -> Result<()> {
    match command {
        EndpointCommands::Show => {
            let endpoint = resolve_endpoint(cli_endpoint, config).await?;
            println!("{endpoint}");
            Ok(())
        }
        EndpointCommands::ClearCache => {
            if crate::utils::discovery::clear_cached_endpoint()? {
                eprintln!("Cleared cached download endpoint");
            } else {
                eprintln!("No cached download endpoint found");
            }
            Ok(())
        }
    }
}

fn handle_completion_command(command: &CompletionCommands) -> Result<()> {
    let shell = command.shell();
    let mut cmd = Cli::command();

    generate(shell, &mut cmd, "cert-portal", &mut io::stdout());
    Ok(())
}

/// Prompt for a password when a username was given
fn read_credentials(username: Option<String>) -> Result<Option<Credentials>> {
    match username {
        Some(username) => {
            let password = rpassword::prompt_password("Enter file system password: ")
                .map_err(|e| CertPortalError::Auth(format!("Failed to read password: {e}")))?;
            Ok(Some(Credentials { username, password }))
        }
        None => Ok(None),
    }
}

fn delivery_target(output: Option<PathBuf>) -> DeliveryTarget {
    match output {
        Some(path) => DeliveryTarget::File(path),
        None => DeliveryTarget::Stdout,
    }
}

fn resolve_site_dir(flag: Option<PathBuf>, config: &PortalConfig) -> PathBuf {
    flag.or_else(|| config.site_dir.clone())
        .unwrap_or_else(|| PathBuf::from("site"))
}

/// Resolve the download endpoint: flag or environment first, then the
/// config file, then DNS SRV discovery.
async fn resolve_endpoint(cli_endpoint: &Option<String>, config: &PortalConfig) -> Result<String> {
    if let Some(endpoint) = cli_endpoint {
        return Ok(endpoint.clone());
    }

    if let Some(endpoint) = &config.endpoint {
        return Ok(endpoint.clone());
    }

    tracing::info!("No endpoint configured, attempting DNS discovery...");
    crate::utils::discovery::discover_endpoint().await
}
