use clap::{Parser, Subcommand};
use mirror_gen::cmds;
use mirror_gen::cmds::analyze::ReportFormat;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "mirror-gen")]
#[command(about = "Field accessor generator for inspectable types", long_about = None)]
struct Cli {
    /* Enable debug logging */
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Analyze declarations and print each type's field descriptors */
    Analyze {
        /* Input YAML or JSON files containing type declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output format for the report */
        #[arg(long = "format", value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /* Generate Rust accessor impls for every declared type */
    Codegen {
        /* Input YAML or JSON files containing type declarations */
        #[arg(short = 'f', long = "files", value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /* Output file; generated code is printed when omitted */
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,

        /* Path of the runtime crate as seen from the generated code */
        #[arg(long = "crate-path", default_value = mirror_gen::emit::rust::DEFAULT_CRATE_PATH)]
        crate_path: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze { files, format } => {
            cmds::analyze::run(files, format)?;
        }

        Commands::Codegen {
            files,
            output,
            crate_path,
        } => {
            cmds::codegen::run(files, output, crate_path)?;
        }
    }

    Ok(())
}
