//! Layerpack CLI

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use layerpack::{
    Allocator, CsvItemSource, LayerPacker, Mode, NullSink, PackConfig, PackSummary,
    SubmissionWriter,
};

#[derive(Parser)]
#[command(name = "layerpack")]
#[command(about = "Layered 3D box packing for a square-footprint container")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack an item CSV and write the placement submission CSV
    Pack {
        /// Path to the input item CSV (PresentId,Dimension1,Dimension2,Dimension3)
        input: PathBuf,

        /// Output file for the submission CSV
        #[arg(short, long, default_value = "submission.csv")]
        output: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Run a measuring pass only and report the packing summary
    Measure {
        /// Path to the input item CSV
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Side length of the square container footprint
    #[arg(long, default_value = "1000")]
    side: u32,

    /// Item flow mode
    #[arg(short, long, value_enum, default_value = "online")]
    mode: ModeArg,

    /// 2D allocator used per layer
    #[arg(short, long, value_enum, default_value = "guillotine")]
    allocator: AllocatorArg,

    /// Fraction of each batch re-sorted largest-first before packing
    #[arg(long, default_value = "0.7")]
    sort_fraction: f64,

    /// Maximum number of layers before the remaining input is dropped
    #[arg(long)]
    max_layers: Option<usize>,

    /// Do not mirror even-numbered layers
    #[arg(long)]
    no_reflect: bool,

    /// Do not compact layers onto the layer below
    #[arg(long)]
    no_compact: bool,
}

impl ConfigArgs {
    fn build(&self) -> PackConfig {
        let mut config = PackConfig::new()
            .with_container_side(self.side)
            .with_mode(self.mode.into())
            .with_allocator(self.allocator.into())
            .with_sort_fraction(self.sort_fraction)
            .with_reflect_alternate(!self.no_reflect)
            .with_compact(!self.no_compact);
        if let Some(layers) = self.max_layers {
            config = config.with_max_layers(layers);
        }
        config
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Place each item the moment it arrives
    Online,
    /// Buffer a layer's items and pack them in one pass
    Batch,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Online => Mode::Online,
            ModeArg::Batch => Mode::Batch,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AllocatorArg {
    /// Recursive guillotine-cut partition tree
    Guillotine,
    /// Free-rectangle set with Best Short Side Fit scoring
    BestFit,
}

impl From<AllocatorArg> for Allocator {
    fn from(arg: AllocatorArg) -> Self {
        match arg {
            AllocatorArg::Guillotine => Allocator::Guillotine,
            AllocatorArg::BestFit => Allocator::BestFit,
        }
    }
}

fn print_summary(summary: &PackSummary) {
    println!("Layers emitted:  {}", summary.layers_emitted);
    println!("Items placed:    {}", summary.items_placed);
    println!("Items dropped:   {}", summary.items_dropped);
    println!("Max z:           {}", summary.max_z);
    println!("Time:            {} ms", summary.computation_time_ms);
    if summary.truncated {
        println!("WARNING: layer cap reached, output is truncated");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Pack {
            input,
            output,
            config,
        } => {
            let packer = LayerPacker::new(config.build())?;

            // Pass one measures the final height; pass two writes the
            // records with z inverted against it.
            log::info!("measuring {}", input.display());
            let source = CsvItemSource::from_path(&input)?;
            let max_z = packer.measure(source)?;

            log::info!("writing {} (max z {})", output.display(), max_z);
            let file = BufWriter::new(File::create(&output)?);
            let mut sink = SubmissionWriter::new(file, max_z)?;
            let source = CsvItemSource::from_path(&input)?;
            let summary = packer.pack(source, &mut sink)?;
            sink.into_inner()?.flush()?;

            print_summary(&summary);
            println!("Submission saved to: {}", output.display());
        }

        Commands::Measure { input, config } => {
            let packer = LayerPacker::new(config.build())?;
            let source = CsvItemSource::from_path(&input)?;
            let summary = packer.pack(source, &mut NullSink)?;
            print_summary(&summary);
        }
    }

    Ok(())
}
