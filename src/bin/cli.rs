use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use privacylens::config::{Config, DEFAULT_CONFIG_FILE};
use privacylens::engine::PrivacyEngine;
use privacylens::error::{PrivacyError, Result};
use privacylens::output::OutputFormat;
use privacylens::rules::Ruleset;
use privacylens::{AnalysisReport, AnalyzeOptions};

#[derive(Parser)]
#[command(
    name = "privacylens",
    about = "Privacy scoring for observed web pages",
    version,
    author
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a page observation, snapshot or extension message
    Score {
        /// Input JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        path: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, html)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Fail when the score is below this value (0-100)
        #[arg(long)]
        fail_below: Option<u8>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score several input files and print a summary
    Batch {
        /// Input JSON files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, html)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Fail when any score is below this value (0-100)
        #[arg(long)]
        fail_below: Option<u8>,

        /// Also write one full report per page into this directory
        #[arg(long, short = 'd')]
        save_dir: Option<PathBuf>,
    },

    /// List the classification and recommendation rules in effect
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Generate a starter .privacylens.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Score {
            path,
            config,
            format,
            fail_below,
            output,
        } => cmd_score(path, config, format, fail_below, output),
        Commands::Batch {
            paths,
            config,
            format,
            fail_below,
            save_dir,
        } => cmd_batch(paths, config, format, fail_below, save_dir),
        Commands::ListRules { format, config } => cmd_list_rules(format, config),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("privacylens=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_format(format_str: &str) -> OutputFormat {
    OutputFormat::from_str_lenient(format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    })
}

fn check_threshold(fail_below: Option<u8>) -> Result<Option<u8>> {
    match fail_below {
        Some(v) if v > 100 => Err(PrivacyError::Config(format!(
            "--fail-below must be between 0 and 100, got {v}"
        ))),
        other => Ok(other),
    }
}

fn cmd_score(
    path: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    fail_below: Option<u8>,
    output_path: Option<PathBuf>,
) -> Result<i32> {
    let format = parse_format(&format_str);
    let options = AnalyzeOptions {
        config_path: config,
        format,
        fail_below_override: check_threshold(fail_below)?,
    };

    let reports = privacylens::analyze(&path, &options)?;
    let rendered = if reports.len() == 1 {
        privacylens::render_report(&reports[0], format)?
    } else {
        privacylens::output::render_batch(&reports, format)?
    };

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = a page scored below the threshold
    Ok(exit_code_for(&reports))
}

fn cmd_batch(
    paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    format_str: String,
    fail_below: Option<u8>,
    save_dir: Option<PathBuf>,
) -> Result<i32> {
    let format = parse_format(&format_str);
    let options = AnalyzeOptions {
        config_path: config,
        format,
        fail_below_override: check_threshold(fail_below)?,
    };

    let mut reports: Vec<AnalysisReport> = Vec::new();
    for path in &paths {
        match privacylens::analyze(path, &options) {
            Ok(found) => reports.extend(found),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping input");
                eprintln!("Warning: {}: {}", path.display(), e);
            }
        }
    }
    if reports.is_empty() {
        return Err(PrivacyError::NoSource(format!(
            "batch of {} input file(s)",
            paths.len()
        )));
    }

    if let Some(dir) = save_dir {
        save_reports(&dir, &reports, format)?;
    }

    print!("{}", privacylens::output::render_batch(&reports, format)?);
    Ok(exit_code_for(&reports))
}

fn save_reports(dir: &Path, reports: &[AnalysisReport], format: OutputFormat) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (idx, report) in reports.iter().enumerate() {
        let stem: String = report
            .page_label()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        let file = dir.join(format!("{:03}-{}.{}", idx + 1, stem, format.extension()));
        std::fs::write(&file, privacylens::render_report(report, format)?)?;
        tracing::debug!(file = %file.display(), "report saved");
    }
    Ok(())
}

fn exit_code_for(reports: &[AnalysisReport]) -> i32 {
    if reports.iter().all(|r| r.verdict.pass) {
        0
    } else {
        1
    }
}

fn cmd_list_rules(format_str: String, config: Option<PathBuf>) -> Result<i32> {
    let config_path = config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = Config::load(&config_path)?;
    let engine = PrivacyEngine::new(Ruleset::from_config(&config.rules));
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("COOKIE RULES ({})", rules.cookie_rules.len());
            println!("{:<8} PATTERN", "FIELD");
            println!("{}", "-".repeat(40));
            for rule in &rules.cookie_rules {
                println!("{:<8} {}", rule.field.to_string(), rule.pattern);
            }

            println!("\nSCRIPT RULES ({})", rules.script_rules.len());
            println!(
                "{:<28} {:<12} {:<9} {:<10} SERVICE",
                "DOMAIN", "CATEGORY", "TRACKING", "ANALYTICS"
            );
            println!("{}", "-".repeat(80));
            for rule in &rules.script_rules {
                println!(
                    "{:<28} {:<12} {:<9} {:<10} {}",
                    rule.domain,
                    rule.category.to_string(),
                    yes_no(rule.is_tracking_related),
                    yes_no(rule.is_analytics),
                    rule.service.as_deref().unwrap_or("-"),
                );
            }

            println!("\nRESOURCE MARKERS ({})", rules.resource_rules.len());
            println!("{}", "-".repeat(40));
            for rule in &rules.resource_rules {
                println!("{}", rule.pattern);
            }

            println!("\nSECURITY HEADERS ({})", rules.header_rules.len());
            println!("{:<28} {:<24} REQUIREMENT", "HEADER", "LABEL");
            println!("{}", "-".repeat(80));
            for rule in &rules.header_rules {
                println!("{:<28} {:<24} {}", rule.header, rule.label, rule.requirement);
            }

            println!("\nHEADER EXPOSURES ({})", rules.exposure_rules.len());
            println!("{:<28} {:<12} DESCRIPTION", "HEADER", "LONGER THAN");
            println!("{}", "-".repeat(80));
            for rule in &rules.exposure_rules {
                println!("{:<28} {:<12} {}", rule.header, rule.longer_than, rule.description);
            }

            println!("\nRECOMMENDATIONS ({})", rules.recommendation_rules.len());
            println!("{:<12} {:<8} {:<10} TRIGGER", "ID", "PRIORITY", "CATEGORY");
            println!("{}", "-".repeat(80));
            for rule in &rules.recommendation_rules {
                println!(
                    "{:<12} {:<8} {:<10} {}",
                    rule.id,
                    rule.priority.to_string(),
                    rule.category.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
                    rule.trigger,
                );
            }
        }
    }

    Ok(0)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn cmd_init(force: bool) -> Result<i32> {
    let path = PathBuf::from(DEFAULT_CONFIG_FILE);

    if path.exists() && !force {
        eprintln!("{} already exists. Use --force to overwrite.", DEFAULT_CONFIG_FILE);
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created {}", DEFAULT_CONFIG_FILE);

    Ok(0)
}
