use clap::Parser;
use geocode_chain::config::OutputFormat;
use geocode_chain::utils::error::{GeocodeError, ErrorSeverity};
use geocode_chain::utils::{logger, validation::Validate};
use geocode_chain::{build_orchestrator, CliConfig, GeocoderConfig, LookupOutcome, OverallStatus};

fn exit_code_for_error(e: &GeocodeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn exit_code_for_outcome(outcome: &LookupOutcome) -> i32 {
    match outcome.status {
        OverallStatus::Geocoded => 0,
        OverallStatus::ZeroResults => 4,
        OverallStatus::TemporaryGeocodeError => 5,
        OverallStatus::PermanentGeocodeError
        | OverallStatus::MultipleIssues
        | OverallStatus::NoProvidersAvailable => 6,
    }
}

fn fail(e: &GeocodeError) -> ! {
    tracing::error!(
        "❌ Lookup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code_for_error(e));
}

fn print_outcome(outcome: &LookupOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        OutputFormat::Text => {
            println!("status: {}", outcome.status);
            if let Some(provider) = &outcome.provider {
                println!("provider: {}", provider);
            }
            for (i, location) in outcome.locations.iter().enumerate() {
                println!(
                    "{}. {} (lat: {}, lng: {})",
                    i + 1,
                    location.formatted_address,
                    location.coordinate.lat,
                    location.coordinate.lng
                );
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let config = GeocoderConfig::from_file(&cli.config).unwrap_or_else(|e| fail(&e));
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }
    tracing::info!(service = config.service_name(), "✅ Configuration loaded and validated");

    let bounds_hint = cli.bounds_hint().unwrap_or_else(|e| fail(&e));
    let orchestrator = build_orchestrator(&config).unwrap_or_else(|e| fail(&e));

    let outcome = orchestrator
        .lookup_address_within(&cli.address, bounds_hint)
        .await
        .unwrap_or_else(|e| fail(&e));

    print_outcome(&outcome, cli.format)?;

    let exit_code = exit_code_for_outcome(&outcome);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
