use clap::Parser;
use cold_mail::domain::ports::ConfigProvider;
use cold_mail::utils::error::ErrorSeverity;
use cold_mail::utils::text::format_experience;
use cold_mail::utils::{logger, validation::Validate};
use cold_mail::{
    CliConfig, ColdMailPipeline, CsvCatalogSource, GeneratedEmail, GroqClient, Portfolio, Result,
    TomlConfig, WebPageFetcher,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cold-mail v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Cold mail generation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<()> {
    config.validate()?;

    let toml_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml_config = TomlConfig::from_file(path)?;
            toml_config.validate()?;
            Some(toml_config)
        }
        None => None,
    };
    let settings: &dyn ConfigProvider = match &toml_config {
        Some(toml_config) => toml_config,
        None => config,
    };

    let source = CsvCatalogSource::new(settings.portfolio_path());
    let portfolio = Arc::new(Portfolio::load(Some(&source)));

    let fetcher = WebPageFetcher::new(settings.user_agent(), settings.timeout_seconds())?;
    let llm = GroqClient::from_config(settings)?;
    let pipeline = ColdMailPipeline::new(fetcher, llm, portfolio);

    let emails = pipeline.run(&config.url).await?;
    tracing::info!("✅ Drafted {} email(s)", emails.len());

    for generated in &emails {
        print_email(generated, config.show_job)?;
    }

    Ok(())
}

fn print_email(generated: &GeneratedEmail, show_job: bool) -> Result<()> {
    if show_job {
        println!("### Job Details:");
        println!("Role: {}", generated.job.role);
        println!("Experience: {}", format_experience(&generated.job.experience));
        println!("{}", serde_json::to_string_pretty(&generated.job)?);
        println!();
        println!("### Portfolio Links:");
        for link in &generated.links {
            println!("- {}", link);
        }
        println!();
    }

    println!("### Generated Email:");
    println!("{}", generated.email);
    println!();
    Ok(())
}
