use clap::Parser;

/// Klondike solitaire in the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "klondike", version, about, long_about = None)]
pub struct Config {
    /// Seed for a reproducible deal; a random one is picked and logged otherwise
    #[arg(long, env = "KLONDIKE_SEED")]
    pub seed: Option<u64>,

    /// Show suits as C D H S instead of symbols
    #[arg(long, env = "KLONDIKE_ASCII")]
    pub ascii: bool,

    /// Disable coloured output
    #[arg(long, env = "KLONDIKE_NO_COLOR")]
    pub no_color: bool,

    /// Keep earlier boards on screen instead of clearing before each one
    #[arg(long, env = "KLONDIKE_NO_CLEAR")]
    pub no_clear: bool,
}

impl Config {
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
