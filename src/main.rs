use clap::{Arg, Command};
use log::LevelFilter;
use scam_radar::{Config, FeatureEngine, ScamAnalyzer, ServiceOrchestrator};
use std::io::Read;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let matches = Command::new("scam-radar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scores suspicious emails, SMS and chat messages for scam risk")
        .long_about("scam-radar combines weighted local pattern matching with remote\n\
                    classifiers (scam text, credential breaches, URL reputation) into a\n\
                    tiered risk report with recommended next steps.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/scam-radar.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and list indicator categories")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .value_name("TEXT")
                .help("Message text to analyze")
                .conflicts_with("file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read the message from a file (default: stdin)")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the report as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Skip all remote services and score locally only")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/scam-radar.yaml");

    let config = match load_config(config_path) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config);
        return;
    }

    let analyzer = if matches.get_flag("offline") {
        ScamAnalyzer::with_services(config, ServiceOrchestrator::offline())
    } else {
        ScamAnalyzer::new(config)
    };
    let analyzer = match analyzer {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(1);
        }
    };

    let text = match read_input(
        matches.get_one::<String>("text"),
        matches.get_one::<String>("file"),
    ) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            process::exit(1);
        }
    };

    let report = match analyzer.analyze(&text).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if matches.get_flag("json") {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{report}");
    }
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(Config::default())
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn test_config(config: &Config) {
    println!("Testing configuration...");
    println!();

    if let Err(e) = FeatureEngine::from_config(config).and_then(|_| config.validate()) {
        println!("Configuration validation failed:");
        println!("Error: {e}");
        process::exit(1);
    }

    println!("Remote services at {}:", config.services.base_url);
    for (name, endpoint) in [
        ("scam classifier", &config.services.scam_classifier),
        ("breach check", &config.services.breach_check),
        ("link reputation", &config.services.link_reputation),
    ] {
        let state = if endpoint.enabled { "enabled" } else { "disabled" };
        println!("  {name}: {} ({state})", endpoint.path);
    }
    println!("  timeout: {}s per call", config.services.timeout_seconds);
    println!();

    println!("Number of indicator categories: {}", config.indicators.len());
    for (i, category) in config.indicators.iter().enumerate() {
        println!(
            "  Category {}: {} (+{} per match, {} patterns)",
            i + 1,
            category.name,
            category.points_per_match,
            category.patterns.len()
        );
    }
    println!("All patterns compiled successfully.");
}

fn read_input(text: Option<&String>, file: Option<&String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text.clone());
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
