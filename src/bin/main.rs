//! seqsvm command line interface
//!
//! Evaluates spectrum kernels over sequence files: single pairs, full
//! matrices, and expansion scores against a weighted reference set.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use seqsvm::core::Result;
use seqsvm::{
    KernelError, KernelMatrix, MemorySequenceStore, SequenceKernel, SequenceStats, SequenceStore,
    SpectrumKernel, SpectrumMode, WeightedIndex,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "seqsvm")]
#[command(about = "Spectrum kernels over sorted symbol sequences")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the kernel for one pair of sequences
    Pair(PairArgs),
    /// Precompute the full kernel matrix
    Matrix(MatrixArgs),
    /// Score sequences against a weighted reference set
    Score(ScoreArgs),
    /// Display sequence store statistics
    Info(InfoArgs),
}

#[derive(Args)]
struct PairArgs {
    /// Sequence file (symbol lines, or DNA lines with --dna)
    #[arg(long)]
    data: PathBuf,

    /// Treat input as DNA lines and extract k-mers of this length
    #[arg(long, value_name = "K")]
    dna: Option<usize>,

    /// Counting mode
    #[arg(short, long, default_value = "multiplicity")]
    mode: CliMode,

    /// Apply sqrt-diagonal normalization
    #[arg(short, long)]
    normalize: bool,

    /// Left sequence index
    lhs: usize,

    /// Right sequence index
    rhs: usize,
}

#[derive(Args)]
struct MatrixArgs {
    /// Sequence file (symbol lines, or DNA lines with --dna)
    #[arg(long)]
    data: PathBuf,

    /// Treat input as DNA lines and extract k-mers of this length
    #[arg(long, value_name = "K")]
    dna: Option<usize>,

    /// Counting mode
    #[arg(short, long, default_value = "multiplicity")]
    mode: CliMode,

    /// Apply sqrt-diagonal normalization
    #[arg(short, long)]
    normalize: bool,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Reference sequence file (symbol lines, or DNA lines with --dna)
    #[arg(long)]
    data: PathBuf,

    /// Treat input as DNA lines and extract k-mers of this length
    #[arg(long, value_name = "K")]
    dna: Option<usize>,

    /// JSON file with weighted reference entries: [{"index": 0, "weight": 1.0}, ...]
    #[arg(short, long)]
    weights: PathBuf,

    /// Query sequence file (defaults to the reference file)
    #[arg(short, long)]
    queries: Option<PathBuf>,

    /// Counting mode
    #[arg(short, long, default_value = "multiplicity")]
    mode: CliMode,

    /// Apply sqrt-diagonal normalization to the query side
    #[arg(short, long)]
    normalize: bool,

    /// Output file (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct InfoArgs {
    /// Sequence file (symbol lines, or DNA lines with --dna)
    #[arg(long)]
    data: PathBuf,

    /// Treat input as DNA lines and extract k-mers of this length
    #[arg(long, value_name = "K")]
    dna: Option<usize>,

    /// Show per-sequence statistics
    #[arg(long)]
    detailed: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliMode {
    /// Count each shared symbol once
    #[value(name = "presence")]
    Presence,
    /// Weight each shared symbol by its run lengths
    #[value(name = "multiplicity")]
    Multiplicity,
}

impl From<CliMode> for SpectrumMode {
    fn from(cli_mode: CliMode) -> Self {
        match cli_mode {
            CliMode::Presence => SpectrumMode::Presence,
            CliMode::Multiplicity => SpectrumMode::Multiplicity,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Pair(args) => pair_command(args),
        Commands::Matrix(args) => matrix_command(args),
        Commands::Score(args) => score_command(args),
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_store(path: &Path, dna: Option<usize>) -> Result<MemorySequenceStore> {
    match dna {
        Some(k) => MemorySequenceStore::from_dna_file(path, k),
        None => MemorySequenceStore::from_file(path),
    }
}

fn build_kernel(
    lhs: Arc<MemorySequenceStore>,
    rhs: Arc<MemorySequenceStore>,
    mode: SpectrumMode,
    normalize: bool,
) -> SpectrumKernel<MemorySequenceStore> {
    let kernel = SpectrumKernel::with_pair(lhs, rhs, mode);
    if normalize {
        kernel.sqrt_diag_normalized()
    } else {
        kernel
    }
}

fn pair_command(args: PairArgs) -> Result<()> {
    let store = Arc::new(load_store(&args.data, args.dna)?);
    let kernel = build_kernel(Arc::clone(&store), store, args.mode.into(), args.normalize);

    let value = kernel.evaluate_pair(args.lhs, args.rhs)?;
    println!("{value:.6}");
    Ok(())
}

fn matrix_command(args: MatrixArgs) -> Result<()> {
    let store = Arc::new(load_store(&args.data, args.dna)?);
    let kernel = build_kernel(Arc::clone(&store), store, args.mode.into(), args.normalize);

    info!("computing {0}x{0} kernel matrix", kernel.num_lhs());
    let matrix = kernel.precompute();

    if let Some(output_path) = args.output {
        let file = File::create(&output_path)?;
        write_matrix(BufWriter::new(file), &matrix)?;
        info!("matrix saved to {output_path:?}");
    } else {
        let stdout = io::stdout();
        write_matrix(stdout.lock(), &matrix)?;
    }
    Ok(())
}

fn write_matrix<W: Write>(mut writer: W, matrix: &KernelMatrix) -> Result<()> {
    for row in 0..matrix.rows() {
        let mut line = String::new();
        for col in 0..matrix.cols() {
            if col > 0 {
                line.push('\t');
            }
            line.push_str(&format!("{:.6}", matrix.get(row, col)));
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn score_command(args: ScoreArgs) -> Result<()> {
    let references = Arc::new(load_store(&args.data, args.dna)?);
    let queries = match &args.queries {
        Some(path) => Arc::new(load_store(path, args.dna)?),
        None => Arc::clone(&references),
    };
    let entries = load_weights(&args.weights)?;
    if entries.is_empty() {
        warn!("empty reference set; all scores are zero");
    }

    let mut kernel = build_kernel(references, queries, args.mode.into(), args.normalize);
    kernel.build_linear_expansion(&entries)?;
    info!(
        "expansion ready: {} dictionary symbols",
        kernel.expansion().dictionary().len()
    );

    if let Some(output_path) = args.output {
        let file = File::create(&output_path)?;
        write_scores(BufWriter::new(file), &kernel)?;
        info!("scores saved to {output_path:?}");
    } else {
        let stdout = io::stdout();
        write_scores(stdout.lock(), &kernel)?;
    }
    Ok(())
}

fn write_scores<W: Write>(
    mut writer: W,
    kernel: &SpectrumKernel<MemorySequenceStore>,
) -> Result<()> {
    writeln!(writer, "# Expansion scores for {} queries", kernel.num_rhs())?;
    writeln!(writer, "# Format: query_index score")?;
    for q in 0..kernel.num_rhs() {
        let score = kernel.evaluate_against_expansion(q)?;
        writeln!(writer, "{q} {score:.6}")?;
    }
    Ok(())
}

fn load_weights(path: &Path) -> Result<Vec<WeightedIndex>> {
    let file = File::open(path)?;
    let entries = parse_weights(BufReader::new(file))?;
    info!("loaded {} weighted references from {path:?}", entries.len());
    Ok(entries)
}

fn parse_weights<R: Read>(reader: R) -> Result<Vec<WeightedIndex>> {
    serde_json::from_reader(reader).map_err(|e| KernelError::SerializationError(e.to_string()))
}

fn info_command(args: InfoArgs) -> Result<()> {
    let store = load_store(&args.data, args.dna)?;
    let summary = seqsvm::utils::stats::summarize(&store);

    println!("=== Sequence Store ===");
    println!("Sequences:     {}", summary.sequences);
    println!("Total symbols: {}", summary.total_symbols);
    println!("Min length:    {}", summary.min_len);
    println!("Max length:    {}", summary.max_len);
    println!("Mean length:   {:.1}", summary.mean_len);

    if args.detailed {
        println!("\nPer-sequence statistics:");
        let n_show = store.len().min(10);
        for i in 0..n_show {
            let stats = SequenceStats::compute(store.sequence(i));
            println!(
                "  {i}: len={} distinct={} longest_run={}",
                stats.len, stats.distinct_symbols, stats.longest_run
            );
        }
        if store.len() > n_show {
            println!("  ... ({} more)", store.len() - n_show);
        }
    }

    Ok(())
}
