use std::path::PathBuf;

use clap::Parser;

/// Front desk CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "front-desk",
    version,
    about = "Queue hospital patients and assign them to available doctors"
)]
pub struct Cli {
    /// Roster JSON file with doctors and patient arrivals
    #[arg(long)]
    pub roster: Option<PathBuf>,

    /// Move patients with no available doctor to the back of the queue
    /// instead of dropping them
    #[arg(long)]
    pub requeue_unmatched: bool,
}
