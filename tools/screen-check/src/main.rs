//! Spam screening CLI for Profile-Sentry.
//!
//! Checks text against a screener config and prints the verdict.
//!
//! Usage:
//!   screen-check <config.json> <text>       Screen a single value
//!   screen-check <config.json> --stdin      Screen each stdin line
//!
//! Exit codes: 0 clean, 1 usage or config error, 2 blocked.

use std::io::BufRead;
use std::path::Path;

use profile_sentry::{screening, ScreenerConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage:");
        eprintln!("  screen-check <config.json> <text>");
        eprintln!("  screen-check <config.json> --stdin");
        std::process::exit(1);
    }

    let config = match ScreenerConfig::load(Path::new(&args[1])) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Loaded config: {} blacklist term(s), {} whitelist entr(ies)",
        config.blacklist.len(),
        config.whitelist.len()
    );

    let rules = config.rules();

    if args[2] == "--stdin" {
        let stdin = std::io::stdin();
        let mut any_blocked = false;

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    eprintln!("Failed to read stdin: {}", e);
                    std::process::exit(1);
                }
            };
            let blocked = screening::should_block(&line, &rules);
            println!("{}\t{}", verdict(blocked), line);
            any_blocked |= blocked;
        }

        std::process::exit(if any_blocked { 2 } else { 0 });
    }

    let blocked = screening::should_block(&args[2], &rules);
    println!("{}", verdict(blocked));
    std::process::exit(if blocked { 2 } else { 0 });
}

fn verdict(blocked: bool) -> &'static str {
    if blocked {
        "BLOCKED"
    } else {
        "CLEAN"
    }
}
