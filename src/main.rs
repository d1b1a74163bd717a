use clap::{Parser, Subcommand};
use colored::Colorize;
use fluttergen::{commands, logging};

#[derive(Parser)]
#[command(name = "fluttergen")]
#[command(about = "Compile JSON UI specifications into Flutter apps", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug diagnostics (overridden by FLUTTERGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new fluttergen project
    Init {
        /// Name of the project
        name: String,
    },
    /// Compile a single .json specification to Dart (no Flutter project generation)
    Compile {
        /// Path to .json specification
        file: String,
        /// Print only this unit, e.g. lib/main.dart
        #[arg(long)]
        unit: Option<String>,
        /// Write units below this directory instead of printing them
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Build the Flutter project (compile the specification + generate project files)
    /// Works with both project directories (fluttergen.toml) and single .json files
    Build {
        /// Path to project directory or .json file (defaults to current directory)
        #[arg(default_value = ".")]
        target: String,
        /// Also write the project as a .zip next to the output directory
        #[arg(long)]
        archive: bool,
    },
    /// Validate a specification without writing anything
    Check {
        /// Path to project directory or .json file (defaults to current directory)
        #[arg(default_value = ".")]
        target: String,
    },
    /// Extract the specification from raw completion text
    Extract {
        /// File holding the completion, or - for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Also compile the extracted specification
        #[arg(long)]
        check: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init { name } => {
            commands::init::execute(&name)
        }
        Commands::Compile { file, unit, output } => {
            commands::compile::execute(&file, unit.as_deref(), output.as_deref())
        }
        Commands::Build { target, archive } => {
            commands::build::execute(&target, archive)
        }
        Commands::Check { target } => {
            commands::check::execute(&target)
        }
        Commands::Extract { input, check } => {
            commands::extract::execute(&input, check)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
