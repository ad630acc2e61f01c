#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, CliPlayer, Difficulty, GameEngine, GameError, GameRecorder, GameStatus, Headless,
    JsonLinesRecorder, TerminalRenderer,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "std")]
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, default_value_t = Difficulty::Medium, help = "easy, medium, hard or nightmare")]
        difficulty: Difficulty,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Place your fleet randomly instead of ship by ship")]
        auto_place: bool,
        #[arg(long, default_value = "player", help = "Name the game is recorded under")]
        name: String,
        #[arg(long, help = "Append the game summary as a JSON line to this file")]
        record: Option<PathBuf>,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            seed,
            auto_place,
            name,
            record,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            let mut rng = SmallRng::seed_from_u64(seed);
            log::info!("starting {} game with seed {}", difficulty, seed);

            let mut engine = GameEngine::new(difficulty).with_seed(seed);
            engine
                .deploy_computer_fleet(&mut rng)
                .map_err(|e| anyhow::anyhow!(e))?;

            let mut player = CliPlayer::stdin();
            if auto_place {
                engine
                    .player_board_mut()
                    .auto_place_fleet(&mut rng)
                    .map_err(|e| anyhow::anyhow!(e))?;
            } else {
                player.place_fleet(engine.player_board_mut(), &mut rng)?;
            }

            println!("Opponent difficulty: {}", difficulty);
            let mut renderer = TerminalRenderer::new();
            let mut recorder: Box<dyn GameRecorder> = match record {
                Some(path) => {
                    let recorder = JsonLinesRecorder::new(path, name);
                    let past = recorder.history(recorder.player())?;
                    if !past.is_empty() {
                        let wins = past.iter().filter(|r| r.game.status == GameStatus::Won).count();
                        println!(
                            "Welcome back, {}: {} wins in {} recorded games",
                            recorder.player(),
                            wins,
                            past.len()
                        );
                    }
                    Box::new(recorder)
                }
                None => Box::new(Headless),
            };

            match engine.run(&mut player, &mut renderer, recorder.as_mut(), &mut rng) {
                Ok(summary) => renderer.finish(&summary),
                Err(GameError::Resigned) => {
                    let summary = engine.summary();
                    recorder.record(&summary);
                    renderer.finish(&summary);
                }
                Err(e) => return Err(anyhow::anyhow!(e)),
            }
        }
    }

    Ok(())
}
