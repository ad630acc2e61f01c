use broadside::{
    footprint, AttackResult, Board, BoardError, Orientation, BOARD_SIZE, NUM_SHIPS,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};

const N: usize = BOARD_SIZE as usize;

fn random_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    board.auto_place_fleet(&mut rng).unwrap();
    let attacks = rng.random_range(0..N * N / 2);
    for _ in 0..attacks {
        let r = rng.random_range(0..N);
        let c = rng.random_range(0..N);
        let _ = board.resolve_attack(r, c);
    }
    board
}

fn orientation(vertical: bool) -> Orientation {
    if vertical {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn collision_matches_chebyshev_neighbourhood(
        seed in any::<u64>(),
        row in 0..N,
        col in 0..N,
        vertical in any::<bool>(),
        size in 1usize..=4,
    ) {
        let board = random_board(seed);
        let o = orientation(vertical);
        let expected = footprint(row, col, o, size)
            .filter(|&(r, c)| r < N && c < N)
            .any(|(r, c)| {
                board
                    .ship_map()
                    .iter_set_bits()
                    .any(|(sr, sc)| sr.abs_diff(r) <= 1 && sc.abs_diff(c) <= 1)
            });
        prop_assert_eq!(board.collides_or_adjacent(row, col, o, size), expected);
    }

    #[test]
    fn attack_idempotent(seed in any::<u64>(), row in 0..N, col in 0..N) {
        let mut board = random_board(seed);
        let _ = board.resolve_attack(row, col);
        let (hits, misses, wreckage) = (board.hits(), board.misses(), board.wreckage());
        let afloat = board.ships_afloat();

        prop_assert_eq!(board.resolve_attack(row, col), Err(BoardError::AlreadyAttacked));
        prop_assert_eq!(board.hits(), hits);
        prop_assert_eq!(board.misses(), misses);
        prop_assert_eq!(board.wreckage(), wreckage);
        prop_assert_eq!(board.ships_afloat(), afloat);
    }

    #[test]
    fn every_ship_sinks_exactly_once(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        board.auto_place_fleet(&mut rng).unwrap();

        let mut cells: Vec<(usize, usize)> =
            (0..N).flat_map(|r| (0..N).map(move |c| (r, c))).collect();
        cells.shuffle(&mut rng);

        let mut sunk = 0;
        for (r, c) in cells {
            let expect_ship = board.ship_at(r, c).is_some();
            let result = board.resolve_attack(r, c).unwrap();
            prop_assert_eq!(result.is_hit(), expect_ship);
            if result == AttackResult::Sunk {
                sunk += 1;
            }
            for ship in board.ships() {
                prop_assert!(ship.hit_count() <= ship.size());
            }
            prop_assert_eq!(board.ships_afloat(), NUM_SHIPS - sunk);
        }

        prop_assert_eq!(sunk, NUM_SHIPS);
        prop_assert!(board.is_fleet_destroyed());
        prop_assert_eq!(board.wreckage(), board.ship_map());
    }
}
