use clap::Parser;

/// Tune a drifting waveform until it locks onto the hidden signal.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Day to play; days past 4 reuse the last template with heavier interference
    #[arg(value_name = "DAY", default_value_t = 1, allow_negative_numbers = true)]
    pub level: i32,
}
