//! pasteport - paste and drop hook for terminals
//!
//! Terminal integrations call this binary from their paste or drop hook and
//! write whatever it prints into the session. Logs go to stderr so stdout
//! carries only the payloads.

use std::collections::HashMap;
use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, error, warn};

use pasteport::extract::URI_LIST_MIME;
use pasteport::{
    Config, ConfigLoader, Dispatcher, DropOutcome, Platform, ProcessDescriptor, TerminalWindow,
};

/// Exit status telling the caller to run its default drop handling
const EXIT_DEFERRED: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Paste,
    Drop,
    Classify,
}

/// Command line arguments
#[derive(Debug, Default)]
struct AppArgs {
    /// Subcommand to run
    mode: Option<Mode>,
    /// Shell process of the target session
    pid: Option<u32>,
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Print the classification as JSON
    json: bool,
    /// Enable debug logging
    debug: bool,
    help: bool,
    version: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> std::result::Result<Self, String> {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from<I>(args: I) -> std::result::Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut app_args = AppArgs::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "paste" | "drop" | "classify" if app_args.mode.is_some() => {
                    return Err(format!("Unexpected second command: {}", arg));
                }
                "paste" => app_args.mode = Some(Mode::Paste),
                "drop" => app_args.mode = Some(Mode::Drop),
                "classify" => app_args.mode = Some(Mode::Classify),
                "--pid" | "-p" => {
                    let value = args.next().ok_or("Missing value for --pid")?;
                    app_args.pid = Some(
                        value
                            .parse()
                            .map_err(|_| format!("Invalid pid: {}", value))?,
                    );
                }
                "--config" | "-c" => {
                    let value = args.next().ok_or("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(value));
                }
                "--json" => app_args.json = true,
                "--debug" | "-d" => app_args.debug = true,
                "--help" | "-h" => app_args.help = true,
                "--version" | "-V" => app_args.version = true,
                other if other.starts_with('-') => {
                    return Err(format!("Unknown option: {}", other));
                }
                other => return Err(format!("Unknown command: {}", other)),
            }
        }

        Ok(app_args)
    }
}

/// Print help information
fn print_help() {
    println!("pasteport - upload pasted or dropped local files into remote sessions");
    println!();
    println!("USAGE:");
    println!("    pasteport <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    paste                  Read the clipboard and print what to paste");
    println!("    drop                   Read a text/uri-list from stdin and print what to paste;");
    println!("                           exits with status 3 when the drop should be left alone");
    println!("    classify               Print how the session is connected");
    println!();
    println!("OPTIONS:");
    println!("    -p, --pid <PID>        Shell process of the target session");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("        --json             Print the classification as JSON");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Print this help message");
    println!("    -V, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    pasteport looks for config.toml or config.json in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $XDG_CONFIG_HOME/pasteport/");
    println!("    3. ~/.config/pasteport/");
    println!("    4. ~/.pasteport/");
    println!("    5. ./.pasteport/");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    PASTEPORT_CONFIG       Path to configuration file");
    println!("    PASTEPORT_PID          Default for --pid (otherwise the parent process)");
    println!("    PASTEPORT_DEBUG        Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

/// Terminal window backed by stdout and the OS process table
struct StdoutWindow {
    pid: Option<u32>,
    out: io::StdoutLock<'static>,
}

impl StdoutWindow {
    fn new(pid: Option<u32>) -> Self {
        Self {
            pid,
            out: io::stdout().lock(),
        }
    }
}

impl TerminalWindow for StdoutWindow {
    fn foreground_processes(&self) -> Vec<ProcessDescriptor> {
        let Some(pid) = self.pid else {
            warn!("No session pid known; treating session as local");
            return Vec::new();
        };

        match Platform::processes().foreground_processes(pid) {
            Ok(processes) => processes,
            Err(e) => {
                warn!("{}; treating session as local", e);
                Vec::new()
            }
        }
    }

    fn paste_text(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            error!("Failed to write payload: {}", e);
        }
    }
}

fn main() {
    let args = AppArgs::parse().unwrap_or_else(|e| {
        eprintln!("pasteport: {}", e);
        eprintln!("Run 'pasteport --help' for usage.");
        process::exit(2);
    });

    if args.help {
        print_help();
        return;
    }
    if args.version {
        println!("pasteport v{}", pasteport::VERSION);
        return;
    }

    init_logging(&args);

    match run(&args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

/// Initialize logging based on the debug flag and `RUST_LOG`
fn init_logging(args: &AppArgs) {
    let debug_env = env::var("PASTEPORT_DEBUG")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let log_level = if args.debug || debug_env { "debug" } else { "warn" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: &AppArgs) -> Result<i32> {
    let mode = args
        .mode
        .ok_or_else(|| anyhow!("No command given; expected paste, drop or classify"))?;
    let config = load_configuration(args)?;
    let pid = session_pid(args);
    debug!("Running {:?} for session pid {:?}", mode, pid);

    let dispatcher = Dispatcher::new(&config);
    let mut window = StdoutWindow::new(pid);

    match mode {
        Mode::Paste => {
            let clipboard = Platform::clipboard(&config.clipboard);
            if dispatcher.on_paste_requested(clipboard.as_ref(), &mut window).is_none() {
                debug!("Nothing pasted");
            }
            Ok(0)
        }
        Mode::Drop => {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read drop payload from stdin")?;
            let payload = HashMap::from([(URI_LIST_MIME.to_string(), raw)]);

            match dispatcher.on_drop(&payload, &mut window) {
                DropOutcome::Handled(plan) => {
                    debug!("Drop handled with {}", plan.kind_str());
                    Ok(0)
                }
                DropOutcome::Deferred => Ok(EXIT_DEFERRED),
            }
        }
        Mode::Classify => {
            let info = dispatcher
                .classifier()
                .classify(&window.foreground_processes());
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&info).context("Failed to serialize classification")?
                );
            } else {
                println!("{}", info.kind);
            }
            Ok(0)
        }
    }
}

/// Load configuration from --config, `$PASTEPORT_CONFIG`, or the search paths
fn load_configuration(args: &AppArgs) -> Result<Config> {
    let config_path = args
        .config_path
        .clone()
        .or_else(|| env::var("PASTEPORT_CONFIG").ok().map(PathBuf::from));

    match config_path {
        Some(path) => pasteport::init_with_config(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => match ConfigLoader::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to load configuration: {}. Using defaults", e);
                Ok(Config::default())
            }
        },
    }
}

/// Session shell pid from --pid, `$PASTEPORT_PID`, or the parent process
fn session_pid(args: &AppArgs) -> Option<u32> {
    if let Some(pid) = args.pid {
        return Some(pid);
    }
    if let Some(pid) = env::var("PASTEPORT_PID").ok().and_then(|v| v.trim().parse().ok()) {
        return Some(pid);
    }

    #[cfg(unix)]
    {
        Some(std::os::unix::process::parent_id())
    }

    #[cfg(not(unix))]
    {
        None
    }
}
