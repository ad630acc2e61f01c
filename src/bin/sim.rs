use broadside::{AutoPlayer, Difficulty, GameEngine, Headless};
use rand::{rngs::SmallRng, SeedableRng};

/// Play one unattended game: the computer at the requested difficulty against
/// a medium auto-player, then print the summary as JSON.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <difficulty> <seed>", args[0]);
        std::process::exit(1);
    }
    let difficulty: Difficulty = args[1].parse()?;
    let seed: u64 = args[2].parse()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(difficulty).with_seed(seed);
    engine
        .deploy_computer_fleet(&mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    engine
        .player_board_mut()
        .auto_place_fleet(&mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut player = AutoPlayer::new(
        Difficulty::Medium,
        SmallRng::seed_from_u64(seed.wrapping_add(1)),
    );
    let summary = engine
        .run(&mut player, &mut Headless, &mut Headless, &mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
