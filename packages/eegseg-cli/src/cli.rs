use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eegseg",
    version,
    about = "EEG segment export and acquisition renumbering tool",
    long_about = "Cut EEGLAB recordings into fixed-length segments (one MAT file per recording,\n\
                  one CSV per segment) and renumber 'Acquisition N' files to 1..K.\n\
                  Subjects live under <base-dir>/<subject>/; see `eegseg config` for the layout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Segment every recording of each subject and export MAT + CSV files
    Segment(SegmentArgs),
    /// Renumber acquisition files to a contiguous 1..K sequence
    Rename(RenameArgs),
    /// Show header information for a recording file
    Inspect(InspectArgs),
    /// Print the effective configuration as JSON
    Config(ConfigArgs),
}

/// Where the subjects are and which ones to process.
#[derive(Args, Clone, Default)]
pub struct ProjectArgs {
    /// JSON configuration file
    #[arg(long, env = "EEGSEG_CONFIG")]
    pub config: Option<String>,

    /// Folder containing one sub-folder per subject
    #[arg(long, env = "EEGSEG_BASE_DIR")]
    pub base_dir: Option<String>,

    /// Subject folder names, processed in the order given
    #[arg(long, num_args = 1..)]
    pub subjects: Vec<String>,
}

#[derive(Args)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Segment duration in seconds
    #[arg(long)]
    pub segment_seconds: Option<f64>,

    /// Samples kept from the start of each recording
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Amplitude multiplier applied to volt-valued data
    #[arg(long)]
    pub scale: Option<f64>,

    /// Decimal places in CSV output
    #[arg(long)]
    pub precision: Option<usize>,

    /// Suffix for MAT variable and file names (<stem>_<tag>)
    #[arg(long)]
    pub mat_tag: Option<String>,

    /// Input folder name under each subject
    #[arg(long)]
    pub input_dir: Option<String>,

    /// MAT output folder name under each subject
    #[arg(long)]
    pub mat_dir: Option<String>,

    /// CSV output root folder name under each subject
    #[arg(long)]
    pub csv_dir: Option<String>,

    /// Write CSV segments into folders that already exist
    #[arg(long, default_value_t = false)]
    pub force: bool,

    /// Move on to the next subject when one fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Print the export report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the JSON report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct RenameArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Rename inside this folder only, ignoring subjects
    #[arg(long)]
    pub folder: Option<String>,

    /// Acquisition folder name under each subject
    #[arg(long)]
    pub acquisition_dir: Option<String>,

    /// Show what would be renamed without touching any file
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Move on to the next folder when one fails
    #[arg(long, default_value_t = false)]
    pub continue_on_error: bool,

    /// Print the rename report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the JSON report to a file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Suppress progress messages on stderr
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Recording file (.set)
    #[arg(long)]
    pub file: String,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}
