//! Arch command implementation

use super::{print_json, print_yaml};
use crate::arch::{BlockSpec, DiscriminatorPlan, GeneratorPlan, ProgressiveNet};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, ArchArgs, OutputFormat};
use serde::Serialize;

/// Parameter summary of one network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetSummary {
    pub parameters: usize,
    pub blocks: Vec<BlockSpec>,
}

impl NetSummary {
    pub fn of(net: &impl ProgressiveNet) -> Self {
        Self {
            parameters: net.parameter_count(),
            blocks: net.blocks(),
        }
    }
}

/// Both networks at one stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchReport {
    pub stage: usize,
    pub resolution: usize,
    pub generator: NetSummary,
    pub discriminator: NetSummary,
}

impl ArchReport {
    pub fn new(generator: &GeneratorPlan, discriminator: &DiscriminatorPlan) -> Self {
        Self {
            stage: generator.scale_count() - 1,
            resolution: generator.resolution(),
            generator: NetSummary::of(generator),
            discriminator: NetSummary::of(discriminator),
        }
    }
}

pub fn format_block(block: &BlockSpec) -> String {
    let layers: Vec<String> = block
        .layers
        .iter()
        .map(|l| format!("{}->{}", l.in_channels, l.out_channels))
        .collect();
    format!(
        "  {:<16} {:>12}  [{}]",
        block.name,
        block.parameter_count(),
        layers.join(", ")
    )
}

fn print_net(title: &str, summary: &NetSummary) {
    println!("{title}:");
    for block in &summary.blocks {
        println!("{}", format_block(block));
    }
    println!("  {:<16} {:>12}", "total", summary.parameters);
}

pub fn run_arch(args: ArchArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let stage = args
        .stage
        .unwrap_or_else(|| spec.stage_count().saturating_sub(1));

    let generator =
        GeneratorPlan::for_stage(&spec, stage).map_err(|e| format!("Generator error: {e}"))?;
    let discriminator = DiscriminatorPlan::for_stage(&spec, stage)
        .map_err(|e| format!("Discriminator error: {e}"))?;
    let report = ArchReport::new(&generator, &discriminator);

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Stage {} ({}x{}) of {}:",
                    report.stage,
                    report.resolution,
                    report.resolution,
                    spec.model_id
                ),
            );
            println!();
            print_net("Generator", &report.generator);
            println!();
            print_net("Discriminator", &report.discriminator);
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Yaml => print_yaml(&report)?,
    }

    Ok(())
}
