// entity_codegen - generate persistence-layer sources from an entity model

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use entity_codegen::{schemas::create_entity_set, CodeGenerator, Config, EntitySet, GenerationOptions};

#[derive(Parser)]
#[command(name = "entity_codegen")]
#[command(about = "Generate persistence-layer sources from declarative entity models")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate all artifacts for a JSON entity model
    Generate {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Check a JSON entity model and report every defect
    Validate {
        #[arg(long)]
        model: PathBuf,
    },
    /// Generate the bundled sample model
    Sample {
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Generation switches. Each one, when given, replaces the value from the
/// environment; a bare flag means `true`.
#[derive(Args, Debug, Default)]
struct OptionArgs {
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    composable_data: Option<bool>,
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    constrained_data: Option<bool>,
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    json_aware_data: Option<bool>,
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, default_missing_value = "true")]
    only_data: Option<bool>,
}

impl OptionArgs {
    fn apply(&self, options: &mut GenerationOptions) {
        if let Some(value) = self.composable_data {
            options.generate_composable_data = value;
        }
        if let Some(value) = self.constrained_data {
            options.generate_constrained_data = value;
        }
        if let Some(value) = self.json_aware_data {
            options.generate_json_aware_data = value;
        }
        if let Some(value) = self.only_data {
            options.generate_only_data = value;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();

    match cli.command {
        Command::Generate { model, output, options } => {
            if let Some(output) = output {
                config.output_directory = output;
            }
            options.apply(&mut config.options);

            let entities = load_model(&model)?;
            generate(entities, config)
        }
        Command::Validate { model } => {
            let entities = load_model(&model)?;
            match entities.validate() {
                Ok(()) => {
                    println!("{} entities, no defects", entities.len());
                    Ok(())
                }
                Err(defects) => {
                    for defect in &defects {
                        eprintln!("  - {defect}");
                    }
                    bail!("entity model has {} defect(s)", defects.len())
                }
            }
        }
        Command::Sample { output } => {
            if let Some(output) = output {
                config.output_directory = output;
            }
            let entities = create_entity_set().context("failed to build sample entity model")?;
            generate(entities, config)
        }
    }
}

fn load_model(path: &Path) -> Result<EntitySet> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read entity model {}", path.display()))?;
    EntitySet::from_json(&json).with_context(|| format!("failed to load entity model {}", path.display()))
}

fn generate(entities: EntitySet, config: Config) -> Result<()> {
    let generator = CodeGenerator::new(entities, config.options);
    let written = generator
        .generate_all(&config.output_directory)
        .context("code generation failed")?;
    info!(
        files = written.len(),
        output = %config.output_directory.display(),
        "generated sources"
    );
    Ok(())
}
