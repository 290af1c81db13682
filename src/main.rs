use clap::Parser;
use pokedex_models::utils::error::{ErrorSeverity, PokedexError};
use pokedex_models::utils::{logger, validation::Validate};
use pokedex_models::{CliConfig, ConformanceChecker, TomlConfig};

fn exit_code(e: &PokedexError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 1,
        ErrorSeverity::High => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn fail(e: PokedexError) -> ! {
    tracing::error!(
        "❌ Check failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("   {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let file_config = cli
        .config
        .as_deref()
        .map(TomlConfig::from_file)
        .transpose();

    let level = file_config
        .as_ref()
        .ok()
        .and_then(|c| c.as_ref())
        .and_then(|c| c.log_level());
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting pokedex-check");
    tracing::debug!("CLI config: {:?}", cli);

    let file_config = file_config.unwrap_or_else(|e| fail(e));
    if let Err(e) = cli.validate() {
        fail(e);
    }
    if let Some(file) = &file_config {
        if let Err(e) = file.validate() {
            fail(e);
        }
    }

    let contract = cli.resolve(file_config.as_ref());
    tracing::debug!("Contract settings: {:?}", contract);
    if let Err(e) = contract.validate() {
        fail(e);
    }

    let json = std::fs::read_to_string(&cli.input)
        .map_err(PokedexError::IoError)
        .unwrap_or_else(|e| fail(e));

    let checker = ConformanceChecker::new(contract);
    let report = checker
        .check_document(cli.kind, &json)
        .unwrap_or_else(|e| fail(e));

    if report.is_clean() {
        println!(
            "✅ {} {} record(s) in {} conform",
            report.records, report.kind, cli.input
        );
        return Ok(());
    }

    for violation in &report.violations {
        println!("#{}: {}", violation.index, violation.message);
    }
    println!(
        "❌ {} of {} {} record(s) in {} have violations",
        report.violations.len(),
        report.records,
        report.kind,
        cli.input
    );
    std::process::exit(1);
}
