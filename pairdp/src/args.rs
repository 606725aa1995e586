use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use libpairdp::align::SubstitutionMatrix;

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Compute the edit distance between two sequences")]
    Edit(EditArgs),
    #[command(about = "Count the optimal edit alignments of two sequences, modulo 134217727")]
    Count(RunArgs),
    #[command(about = "Compute the edit distance and one optimal alignment of two sequences")]
    Trace(TraceArgs),
    #[command(about = "Compute the global alignment score of two sequences with a substitution matrix")]
    Global(GlobalArgs),
    #[command(about = "Find a longest common subsequence of two sequences")]
    Lcs(RunArgs),
    #[command(about = "Find a longest increasing and a longest decreasing subsequence of a permutation")]
    Lis(RunArgs),
    #[command(about = "Find the positions of the second sequence as a subsequence of the first")]
    Sseq(RunArgs),
}

impl SubCommands {
    pub fn run_args(&self) -> &RunArgs {
        match self {
            SubCommands::Edit(args) => &args.run_args,
            SubCommands::Trace(args) => &args.run_args,
            SubCommands::Global(args) => &args.run_args,
            SubCommands::Count(args)
            | SubCommands::Lcs(args)
            | SubCommands::Lis(args)
            | SubCommands::Sseq(args) => args,
        }
    }
}

#[derive(Parser)]
#[command(name = "pairdp")]
#[command(
    about = "Pairwise sequence dynamic programming: edit distance, alignment counting, traceback, and global alignment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Log more detail; repeat for more (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

impl CommonArgs {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Input file
    #[arg(value_name = "INPUT")]
    pub input_path: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Where to write the result, instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Allow pairdp to overwrite files
    #[arg(long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,

    /// Write the result as JSON
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub input_args: InputArgs,

    /// Arguments that control output options
    #[command(flatten)]
    pub output_args: OutputArgs,

    /// Arguments that are common across all pairdp subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[command(flatten)]
    pub run_args: RunArgs,

    /// Write the filled alignment table to this path
    #[arg(long = "dump-table", value_name = "PATH")]
    pub dump_table_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    #[command(flatten)]
    pub run_args: RunArgs,

    /// Write the alignment with a middle line marking identical residues
    #[arg(long = "pretty", default_value_t = false)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    #[command(flatten)]
    pub run_args: RunArgs,

    /// The linear gap penalty
    #[arg(
        short = 'g',
        long = "gap",
        default_value_t = SubstitutionMatrix::DEFAULT_GAP_PENALTY,
        value_name = "N"
    )]
    pub gap_penalty: i64,

    /// A substitution matrix file to use instead of BLOSUM62
    #[arg(short = 'm', long = "matrix", value_name = "PATH")]
    pub matrix_path: Option<PathBuf>,

    /// Also write one optimal alignment
    #[arg(long = "alignment", default_value_t = false)]
    pub alignment: bool,

    /// Write the filled alignment table to this path
    #[arg(long = "dump-table", value_name = "PATH")]
    pub dump_table_path: Option<PathBuf>,
}
