use clap::Parser;
use folio_site::utils::{logger, validation::Validate};
use folio_site::{
    AppState, ContentService, ContentSources, EnvConfig, GistClient, ServeConfig, SiteError,
    SiteToml,
};
use std::sync::Arc;

fn fail(context: &str, e: &SiteError) -> ! {
    tracing::error!("❌ {}: {}", context, e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(if e.is_config_error() { 2 } else { 1 });
}

#[tokio::main]
async fn main() {
    let config = ServeConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting folio-site");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    let file = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            let file = SiteToml::from_file(path)
                .and_then(|file| file.validate().map(|_| file))
                .unwrap_or_else(|e| fail("Failed to load config file", &e));
            for key in file.unresolved_sources() {
                tracing::warn!("Source '{}' has an unresolved placeholder and stays unset", key);
            }
            Some(file)
        }
        None => None,
    };

    let settings = config
        .settings(file.as_ref())
        .unwrap_or_else(|e| fail("Invalid server settings", &e));

    let env = EnvConfig::from_env().unwrap_or_else(|e| fail("Invalid environment", &e));

    let mut sources = ContentSources::from_env()
        .with_revalidate(settings.revalidate, settings.site_config_revalidate);
    if let Some(file) = &file {
        sources = sources.merge_toml(file);
    }
    for section in sources.missing() {
        tracing::warn!(
            "No source for {} section ({}); serving fallback content",
            section,
            section.env_var()
        );
    }

    let fetcher = GistClient::new(settings.request_timeout)
        .unwrap_or_else(|e| fail("Failed to build HTTP client", &e));
    let content = ContentService::new(Arc::new(fetcher), Arc::new(sources));
    let state = AppState::new(content, env);

    if let Err(e) = folio_site::web::run(&settings, state).await {
        fail("Server stopped", &e);
    }

    tracing::info!("✅ Server stopped cleanly");
}
