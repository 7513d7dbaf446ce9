use clap::Parser;
use d0010_importer::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Cancellation token coordinating graceful shutdown between files
        let cancellation_token = CancellationToken::new();

        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            cancellation_token.cancel();
        };

        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(d0010_importer::Error::processing_interrupted(
                    "Import interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("D0010 Importer - Energy Market Flow File Processor");
    println!("==================================================");
    println!();
    println!("Import D0010 flow files carrying meter readings, validate every record");
    println!("against the published field schemas, and persist complete files as one unit.");
    println!();
    println!("USAGE:");
    println!("    d0010-importer <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a flow file or a directory of flow files");
    println!("    codes       Print one of the closed code catalogues used for validation");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import every file in a directory, four files at a time:");
    println!("    d0010-importer import /data/flows --workers 4");
    println!();
    println!("    # Validate without persisting:");
    println!("    d0010-importer import DTC5259515123502080915D0010.uff --dry-run");
    println!();
    println!("    # Browse the site visit reason catalogue:");
    println!("    d0010-importer codes site-visit-reasons");
    println!();
    println!("For detailed help on any command, use:");
    println!("    d0010-importer <COMMAND> --help");
}
