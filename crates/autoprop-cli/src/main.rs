//! autoprop command-line driver.

mod output;

use autoprop::{
    build::{self, GenerationOutput, Pipeline},
    schema::diagnostic::Diagnostics,
    utils::{NamingConvention, mutate},
};
use autoprop_config::{AutopropConfig, ConfigError};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),

    #[error(transparent)]
    Autoprop(#[from] autoprop::Error),
}

///
/// Cli
///

#[derive(Parser)]
#[command(name = "autoprop")]
#[command(about = "Accessor and serialization-metadata generator", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate units from a JSON compilation snapshot
    Generate {
        /// Compilation snapshot (JSON)
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Config file; defaults to autoprop.toml beside the input
        #[arg(short, long, env = "AUTOPROP_CONFIG")]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = PipelineArg::All)]
        pipeline: PipelineArg,
    },

    /// Print an identifier in the given naming convention
    Case {
        ident: String,

        #[arg(long, value_enum, default_value_t = ConventionArg::LowerCamel)]
        convention: ConventionArg,
    },

    /// Print the annotation scaffold unit
    Scaffold {
        #[arg(short, long, env = "AUTOPROP_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PipelineArg {
    Accessors,
    Serialization,
    All,
}

impl From<PipelineArg> for Pipeline {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::Accessors => Self::Accessors,
            PipelineArg::Serialization => Self::Serialization,
            PipelineArg::All => Self::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ConventionArg {
    LowerCamel,
    UpperCamel,
    Snake,
    Kebab,
}

impl From<ConventionArg> for NamingConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::LowerCamel => Self::LowerCamel,
            ConventionArg::UpperCamel => Self::UpperCamel,
            ConventionArg::Snake => Self::Snake,
            ConventionArg::Kebab => Self::Kebab,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("autoprop: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> Result<ExitCode, CliError> {
    match command {
        Command::Generate {
            input,
            out,
            config,
            pipeline,
        } => {
            let config = load_config(config.as_deref(), input.parent())?;
            let json = fs::read_to_string(&input).map_err(|source| CliError::Read {
                path: input.clone(),
                source,
            })?;

            let output = autoprop::generate_from_json(&json, &config.to_options(), pipeline.into())?;
            report(&output.diagnostics);
            let written = write_output(&out, &output)?;
            debug!("{written} unit(s) written to {}", out.display());

            Ok(exit_code(&output.diagnostics))
        }

        Command::Case { ident, convention } => {
            println!("{}", mutate(&ident, convention.into()));

            Ok(ExitCode::SUCCESS)
        }

        Command::Scaffold { config } => {
            let config = load_config(config.as_deref(), None)?;
            let unit = build::scaffold::scaffold_unit(&config.to_options())
                .map_err(autoprop::Error::from)?;
            print!("{}", unit.source);

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(explicit: Option<&Path>, near: Option<&Path>) -> Result<AutopropConfig, CliError> {
    let config = match (explicit, near) {
        (Some(path), _) => AutopropConfig::load(path)?,
        (None, Some(dir)) => AutopropConfig::discover(dir)?,
        (None, None) => AutopropConfig::default(),
    };

    Ok(config)
}

fn write_output(dir: &Path, output: &GenerationOutput) -> Result<usize, CliError> {
    let written = output::write_units(dir, output.all_units()).map_err(CliError::Write)?;

    Ok(written.len())
}

fn report(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

fn exit_code(diagnostics: &Diagnostics) -> ExitCode {
    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
