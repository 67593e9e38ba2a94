//! glot CLI
//!
//! Snippet analysis: language detection, diagnostics, heuristic
//! correction, and IR.

use glotc::commands::{check_file, detect_file, ir_file, CheckOptions};
use glotc::Error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: glot check <file> [--lang=<id>] [--no-detect] [--json]");
                std::process::exit(1);
            }
            let (path, options) = match parse_check_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            match check_file(&path, &options) {
                Ok(true) => {}
                Ok(false) => std::process::exit(1),
                Err(error) => fail(&error),
            }
        }
        "detect" => {
            if args.len() < 3 {
                eprintln!("Usage: glot detect <file>");
                std::process::exit(1);
            }
            if let Err(error) = detect_file(&args[2]) {
                fail(&error);
            }
        }
        "ir" => {
            if args.len() < 3 {
                eprintln!("Usage: glot ir <file> [--lang=<id>] [--no-detect]");
                std::process::exit(1);
            }
            let (path, options) = match parse_check_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };
            if let Err(error) = ir_file(&path, &options) {
                fail(&error);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("glot {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn fail(error: &Error) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

/// Parse `<file> [--lang=<id>] [--no-detect] [--json]` in any order.
fn parse_check_args(args: &[String]) -> Result<(String, CheckOptions), String> {
    let mut options = CheckOptions::default();
    let mut path = None;

    for arg in args {
        if let Some(id) = arg.strip_prefix("--lang=") {
            options.language = id
                .parse()
                .map_err(|error: glot_profile::UnknownLanguage| error.to_string())?;
        } else if arg == "--no-detect" {
            options.auto_detect = false;
        } else if arg == "--json" {
            options.json = true;
        } else if !arg.starts_with('-') && path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| "missing file path".to_owned())?;
    Ok((path, options))
}

fn print_usage() {
    println!("glot - multi-language snippet analysis");
    println!();
    println!("Usage: glot <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <file>    Analyze a snippet and print the report");
    println!("  detect <file>   Print the detected language and confidence");
    println!("  ir <file>       Print the raw and optimized IR listings");
    println!("  help            Show this help message");
    println!("  version         Show version information");
    println!();
    println!("Check/ir options:");
    println!("  --lang=<id>     Language to assume (python, javascript, cpp, java)");
    println!("  --no-detect     Skip language detection, keep --lang");
    println!("  --json          Print the full report as JSON (check only)");
    println!();
    println!("Examples:");
    println!("  glot check snippet.py");
    println!("  glot check snippet.js --lang=javascript --no-detect");
    println!("  glot check snippet.py --json");
    println!("  glot detect snippet.txt");
    println!("  glot ir snippet.py");
}
