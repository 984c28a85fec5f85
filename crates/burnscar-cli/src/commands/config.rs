use std::path::PathBuf;

use anyhow::{Context, Result};
use burnscar_core::consts::DEFAULT_MASK_LAYER;
use burnscar_core::pipeline::{CompositeConfig, PipelineConfig};
use clap::Args;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include a [composite] section
    #[arg(long)]
    pub composite: bool,
}

/// Print or save a full default PipelineConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let mut config = PipelineConfig::default();
    if args.composite {
        config.composite = Some(CompositeConfig {
            mask_dir: PathBuf::from("mask"),
            index_dir: PathBuf::from("index"),
            indices: vec!["ndvi".into(), "nbr".into()],
            output_dir: PathBuf::from("seasonal"),
            mask_layer: DEFAULT_MASK_LAYER.into(),
        });
    }
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
