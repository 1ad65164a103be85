use bundle_diff::cli::{Cli, Commands};
use bundle_diff::cmd::{self, PublishTarget};
use clap::Parser;
use std::process;

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Report {
            options,
            token,
            repository,
            pr,
            api_url,
            dry_run,
        }) => {
            let target = PublishTarget {
                token: token.clone(),
                repository: repository.clone(),
                pr: *pr,
                api_url: api_url.clone(),
            };
            cmd::cmd_report(options, &target, *dry_run)
        }
        Some(Commands::Diff { options, json }) => cmd::cmd_diff(options, *json),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("bundle-diff v{}", env!("CARGO_PKG_VERSION"));
            println!("Bundle size difference reporter\n");
            println!("Usage: bundle-diff <COMMAND>\n");
            println!("Commands:");
            println!("  report       Compare stats and comment on the pull request");
            println!("  diff         Compare stats and print the report locally");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-diff <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_diff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
