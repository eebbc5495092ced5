//! Plainspeak: Formatting Quality Analyzer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use plainspeak::analyzer::FormattingAnalyzer;
use plainspeak::config::{
    build_ignore_set, is_ignored, load_config, starter_config, Config, CONFIG_FILENAME,
};
use plainspeak::provider::{is_ai_available, GeminiClient};
use plainspeak::reporter::{ConsoleReporter, JsonReporter};
use plainspeak::suite::{Scenario, SuiteRunner};
use plainspeak::InputReport;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Plainspeak: flag asterisks and markdown in conversational AI responses
#[derive(Parser, Debug)]
#[command(name = "plainspeak")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text files or directories to analyze (omit or `-` to read stdin)
    paths: Vec<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum score every input must reach (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (one line per input)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output and debug logging
    #[arg(long, short)]
    verbose: bool,

    /// List the lines that contain asterisks
    #[arg(long)]
    locate: bool,

    /// Path to config file (default: search .plainspeakrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analyze files in parallel (default for more than 10 files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask the provider each scenario question and score the answers (needs the `ai` feature)
    Run {
        /// Path to config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format as JSON
        #[arg(long, short)]
        json: bool,

        /// Pause between requests in milliseconds (default 1000)
        #[arg(long, value_name = "MS")]
        pause_ms: Option<u64>,

        /// Ask this question instead of the configured scenarios (repeatable)
        #[arg(long)]
        question: Vec<String>,

        /// List the lines that contain asterisks
        #[arg(long)]
        locate: bool,

        /// Verbose output and debug logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Create .plainspeakrc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 80)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode> {
    let mut args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command.take() {
        Some(Commands::Run {
            config,
            json,
            pause_ms,
            question,
            locate,
            verbose,
        }) => {
            init_tracing(verbose);
            run_suite(config.as_deref(), json, pause_ms, question, locate, verbose)
        }
        Some(Commands::Init { threshold, dir }) => {
            init_tracing(false);
            run_init(threshold, dir.as_deref())
        }
        None => {
            init_tracing(args.verbose);
            run_check(&args)
        }
    }
}

fn run_check(args: &Args) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let work_dir = match args.paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) if p.is_file() => match p.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => cwd.clone(),
        },
        _ => cwd.clone(),
    };

    // An explicit --config is relative to the current directory, not the input
    let config_path = args.config.as_ref().map(|p| cwd.join(p));
    let config = load_config(&work_dir, config_path.as_deref())?.merge_with_cli(args.threshold, None);

    let analyzer = if args.locate {
        FormattingAnalyzer::new().with_locations()
    } else {
        FormattingAnalyzer::new()
    };

    let reads_stdin = args.paths.is_empty()
        || (args.paths.len() == 1 && args.paths[0].as_os_str() == "-");

    let (reports, had_errors) = if reads_stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        (vec![analyzer.report("<stdin>", &text)], false)
    } else {
        let files = collect_text_files(&args.paths, &config)?;
        if files.is_empty() {
            eprintln!("{}: No text files found", "Warning".yellow());
            return Ok(ExitCode::from(2));
        }

        // Set up parallel processing
        if let Some(jobs) = args.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .ok();
        }

        if args.parallel || files.len() > 10 {
            analyze_files_parallel(&analyzer, &files, args.quiet)
        } else {
            analyze_files_sequential(&analyzer, &files, args.quiet)
        }
    };

    if reports.is_empty() {
        eprintln!("{}: All files failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    let stats = FormattingAnalyzer::aggregate_stats(&reports);

    // Output results
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(&reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if reports.len() == 1 {
            reporter.report(&reports[0]);
        } else {
            reporter.report_many(&reports, &stats);
        }
    }

    if had_errors {
        return Ok(ExitCode::from(2));
    }

    let below_threshold: Vec<&InputReport> = match config.threshold {
        Some(threshold) => reports
            .iter()
            .filter(|r| r.analysis.score < threshold)
            .collect(),
        None => Vec::new(),
    };
    if !below_threshold.is_empty() {
        if !args.quiet && !args.json {
            for report in &below_threshold {
                eprintln!(
                    "\n{}: {} scored {}, below threshold {}",
                    "Failed".red().bold(),
                    report.label,
                    report.analysis.score,
                    config.threshold.unwrap_or_default()
                );
            }
        }
        return Ok(ExitCode::from(1));
    }

    if stats.passed < stats.total {
        return Ok(ExitCode::from(1));
    }

    Ok(ExitCode::SUCCESS)
}

fn run_suite(
    config_path: Option<&Path>,
    json: bool,
    pause_ms: Option<u64>,
    questions: Vec<String>,
    locate: bool,
    verbose: bool,
) -> Result<ExitCode> {
    if !is_ai_available() {
        anyhow::bail!("`run` needs the ai feature. Rebuild with: cargo build --features ai");
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, config_path)?.merge_with_cli(None, pause_ms);

    let client = GeminiClient::from_config(&config.provider)?;

    let scenarios: Vec<Scenario> = if questions.is_empty() {
        config.scenarios()
    } else {
        questions
            .into_iter()
            .enumerate()
            .map(|(i, q)| Scenario::new(format!("Question {}", i + 1), q))
            .collect()
    };

    let mut runner = SuiteRunner::new(client)
        .with_pause(config.pause())
        .with_system_prompt(config.system_prompt());
    if locate {
        runner = runner.with_locations();
    }

    let report = if json {
        let report = runner.run(&scenarios);
        println!("{}", JsonReporter::new().pretty().report_suite(&report));
        report
    } else {
        let mut reporter = ConsoleReporter::new();
        if verbose {
            reporter = reporter.verbose();
        }
        println!("{}", "🎯 Starting Clean Formatting Validation Tests...".bold());
        println!(
            "Testing {} scenarios for clean, natural formatting",
            scenarios.len()
        );
        let report = runner.run_with(&scenarios, |outcome| reporter.report_outcome(outcome));
        reporter.report_suite_summary(&report.summary);
        report
    };

    if report.summary.stats.all_passed {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let content = starter_config(threshold.unwrap_or(plainspeak::CLEAN_THRESHOLD));
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("{}: Created {}", "Info".blue(), config_path.display());
    Ok(ExitCode::SUCCESS)
}

/// Expand the CLI paths into the text files to analyze
fn collect_text_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            // Explicit files are analyzed whatever their extension
            files.push(path.clone());
            continue;
        }

        if !path.is_dir() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let file_path = entry.path();
            if !file_path.is_file() {
                continue;
            }
            let accepted = file_path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| config.accepts_extension(ext));
            if !accepted {
                continue;
            }
            if let Some(ref set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            found.push(file_path.to_path_buf());
        }

        // Sort for consistent output
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn analyze_files_sequential(
    analyzer: &FormattingAnalyzer,
    files: &[PathBuf],
    quiet: bool,
) -> (Vec<InputReport>, bool) {
    let mut results = Vec::with_capacity(files.len());
    let mut had_errors = false;

    for file in files {
        match analyzer.analyze_path(file) {
            Ok(report) => results.push(report),
            Err(e) => {
                had_errors = true;
                if !quiet {
                    eprintln!("{}: {:#}", "Error".red(), e);
                }
            }
        }
    }

    (results, had_errors)
}

fn analyze_files_parallel(
    analyzer: &FormattingAnalyzer,
    files: &[PathBuf],
    quiet: bool,
) -> (Vec<InputReport>, bool) {
    use rayon::prelude::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    let had_errors = AtomicBool::new(false);

    let results: Vec<_> = files
        .par_iter()
        .filter_map(|file| match analyzer.analyze_path(file) {
            Ok(report) => Some(report),
            Err(e) => {
                had_errors.store(true, Ordering::Relaxed);
                if !quiet {
                    eprintln!("{}: {:#}", "Error".red(), e);
                }
                None
            }
        })
        .collect();

    (results, had_errors.load(Ordering::Relaxed))
}
