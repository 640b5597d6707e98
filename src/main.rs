use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use segsnake::game::GameConfig;
use segsnake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "segsnake")]
#[command(version, about = "Terminal snake with a turn-log body representation")]
struct Cli {
    /// Board width in cells
    #[arg(long, default_value = "40")]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value = "20")]
    height: usize,

    /// Starting tick delay in milliseconds
    #[arg(long, default_value = "100")]
    delay: u64,

    /// Where the high score is kept
    #[arg(long, default_value = "segsnake_highscore.json")]
    score_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig {
        grid_width: cli.width,
        grid_height: cli.height,
        initial_delay_ms: cli.delay,
        ..GameConfig::default()
    };

    let mut mode = HumanMode::new(config, cli.score_file);
    mode.run().await
}
