use anyhow::{bail, Context};
use clap::Parser;
use folio_site::domain::ports::SourceProvider;
use folio_site::domain::section::Section;
use folio_site::utils::{logger, validation::Validate};
use folio_site::{ContentService, ContentSources, GistClient, SiteToml};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "check-content")]
#[command(about = "Fetch every configured gist once and report which sections would fall back")]
struct Args {
    /// Optional TOML file whose [sources] table complements the environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the resolved JSON of each section
    #[arg(long)]
    print: bool,

    #[arg(long, default_value = "10")]
    request_timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let mut sources = ContentSources::from_env();
    if let Some(path) = &args.config {
        let file = SiteToml::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?;
        file.validate().context("Invalid config file")?;
        sources = sources.merge_toml(&file);
    }

    let fetcher = GistClient::new(Duration::from_secs(args.request_timeout_secs))
        .context("Failed to build HTTP client")?;
    let service = ContentService::new(Arc::new(fetcher), Arc::new(sources));

    let mut failed = 0;
    for section in Section::ALL {
        let url = service.sources().source_url(section).unwrap_or("").to_string();
        match service.try_load_json(section).await {
            None => println!("⚪ {:<12} not configured ({})", section, section.env_var()),
            Some(Ok(value)) => {
                println!("✅ {:<12} {}", section, url);
                if args.print {
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
            }
            Some(Err(e)) => {
                failed += 1;
                println!("❌ {:<12} {}", section, url);
                println!("   {}", e.user_friendly_message());
                println!("   💡 {}", e.recovery_suggestion());
            }
        }
    }

    if failed > 0 {
        bail!("{} configured section(s) would be served from fallback content", failed);
    }
    Ok(())
}
