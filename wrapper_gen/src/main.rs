use clap::{Parser, Subcommand, ValueEnum};
use cmds::analyze::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cmds;

#[derive(Parser)]
#[command(name = "gen-wrapper")]
#[command(about = "Generate virtual module wrappers from pkcs11.h and pkcs11i.h", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render wrapper functions and the initializer table
    Generate {
        /// Name of the template (defaults to the config file's, then base)
        #[arg(short = 't', long = "template", value_enum)]
        template: Option<Template>,

        /// The pkcs11.h header file
        pkcs11: PathBuf,

        /// The pkcs11i.h header file
        pkcs11i: PathBuf,

        /// Exclude functions (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,

        /// YAML config providing extra exclusions
        #[arg(short = 'c', long = "config", value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the generated code here instead of stdout
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the reconciled signatures of both headers
    Analyze {
        /// The pkcs11.h header file
        pkcs11: PathBuf,

        /// The pkcs11i.h header file
        pkcs11i: PathBuf,

        /// Serialization format for the signature dump
        #[arg(long = "format", value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum Template {
    /// Forward into a plain CK_FUNCTION_LIST
    Base,
    /// Forward into the next CK_X_FUNCTION_LIST
    Stack,
}

impl From<Template> for wrapper_gen::TemplateKind {
    fn from(template: Template) -> Self {
        match template {
            Template::Base => wrapper_gen::TemplateKind::Base,
            Template::Stack => wrapper_gen::TemplateKind::Stack,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    match cli.command {
        Commands::Generate {
            template,
            pkcs11,
            pkcs11i,
            exclude,
            config,
            output,
        } => {
            cmds::generate::run(template.map(Into::into), pkcs11, pkcs11i, exclude, config, output)?;
        }

        Commands::Analyze {
            pkcs11,
            pkcs11i,
            format,
        } => {
            cmds::analyze::run(pkcs11, pkcs11i, format)?;
        }
    }

    Ok(())
}
