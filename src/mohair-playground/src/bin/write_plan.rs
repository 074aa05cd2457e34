//! Write Plan - compile a sample partition into a Substrait plan
//!
//! Loads delimited sample data into a partition, compiles it into a plan whose
//! single relation is a mohair extension leaf, and writes the plan bytes.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package mohair-playground --bin write-plan -- --domain test --explain
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;

use common_config::MohairConfig;
use common_error::MohairResult;
use mohair_core::PartitionDomain;
use mohair_playground::{read_delimited_file, set_partition_data, write_plan};
use mohair_substrait::{SkyTable, SubstraitCompiler, TableDescriptor, explain_plan};

/// Write Plan CLI.
#[derive(Parser, Debug)]
#[command(name = "write-plan")]
#[command(about = "Compile sample data into a Substrait plan file")]
#[command(version)]
struct Args {
    /// Delimited input file
    #[arg(short, long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/sample-data.tsv"))]
    data: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Domain key (overrides configuration)
    #[arg(long)]
    domain: Option<String>,

    /// Partition key
    #[arg(short, long, default_value = "sample")]
    partition: String,

    /// Maximum rows per slice (overrides configuration)
    #[arg(long)]
    max_slice_rows: Option<usize>,

    /// Output path (overrides configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the compiled plan
    #[arg(long)]
    explain: bool,
}

fn main() -> MohairResult<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MohairConfig::from_json_file(path)?,
        None => MohairConfig::default(),
    };
    if let Some(domain) = args.domain {
        config.domain.key = domain;
    }
    if let Some(max_slice_rows) = args.max_slice_rows {
        config.loader.max_slice_rows = max_slice_rows;
    }
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.plan_path));

    let domain = Arc::new(PartitionDomain::new(config.domain.key.clone()));
    let mut partition = domain.partition_for(args.partition);

    let batches = read_delimited_file(&args.data, &config.loader)?;
    set_partition_data(&mut partition, batches)?;

    let table = SkyTable::from(partition);
    info!(
        "Loaded '{}' with {} slice(s)",
        table.name(),
        table.partition().map_or(0, |p| p.meta().slice_count())
    );

    let compiler = SubstraitCompiler::with_mohair_translators(&config.encoder);
    let plan = compiler.compile(&table)?;

    if args.explain {
        print!("{}", explain_plan(&plan));
    }

    let written = write_plan(&plan, &output)?;
    println!("Wrote {written} bytes to {}", output.display());

    Ok(())
}
