#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use std::io::Cursor;

    use broadside::{
        parse_coord, parse_placement, Board, CliPlayer, Orientation, TargetInput, TargetPrompt,
        NUM_SHIPS,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn player(input: &str) -> CliPlayer<Cursor<Vec<u8>>> {
        CliPlayer::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("A1"), Ok((0, 0)));
        assert_eq!(parse_coord("j10"), Ok((9, 9)));
        assert_eq!(parse_coord(" C4 "), Ok((3, 2)));
        assert!(parse_coord("").is_err());
        assert!(parse_coord("A").is_err());
        assert!(parse_coord("K1").is_err());
        assert!(parse_coord("A0").is_err());
        assert!(parse_coord("A11").is_err());
        assert!(parse_coord("4C").is_err());
    }

    #[test]
    fn test_parse_placement() {
        assert_eq!(parse_placement("B3 v"), Ok((2, 1, Orientation::Vertical)));
        assert_eq!(parse_placement("B3 H"), Ok((2, 1, Orientation::Horizontal)));
        assert_eq!(parse_placement("B3"), Ok((2, 1, Orientation::Horizontal)));
        assert!(parse_placement("B3 x").is_err());
        assert!(parse_placement("").is_err());
    }

    #[test]
    fn test_select_target() {
        let board = Board::new();
        let mut cli = player("Z9\nc4\nquit\n");
        assert_eq!(cli.select_target(&board), TargetInput::Invalid);
        assert_eq!(cli.select_target(&board), TargetInput::Coordinate(3, 2));
        assert_eq!(cli.select_target(&board), TargetInput::Resign);
    }

    #[test]
    fn test_closed_input_resigns() {
        let board = Board::new();
        let mut cli = player("");
        assert_eq!(cli.select_target(&board), TargetInput::Resign);
    }

    #[test]
    fn test_place_fleet_manual_then_auto() {
        let mut rng = SmallRng::seed_from_u64(12345);
        let mut board = Board::revealed();
        // second line touches the first ship and is asked again
        let mut cli = player("A1 H\nA2 H\nA3 v\n\n");
        cli.place_fleet(&mut board, &mut rng).unwrap();

        assert!(board.is_fully_placed());
        assert_eq!(board.ships().count(), NUM_SHIPS);
        assert_eq!(board.ship_at(0, 0).unwrap().size(), 2);
        let frigate = board.ship_at(2, 0).unwrap();
        assert_eq!(frigate.origin(), (2, 0));
        assert_eq!(frigate.orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_place_fleet_input_closed() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut board = Board::revealed();
        let mut cli = player("A1 H\n");
        assert!(cli.place_fleet(&mut board, &mut rng).is_err());
        assert!(board.is_placed(0));
        assert!(!board.is_fully_placed());
    }

    #[test]
    fn test_reproducible_rng() {
        // Same seed, same automatic layout after the same manual input
        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);
        let mut b1 = Board::revealed();
        let mut b2 = Board::revealed();
        player("\n").place_fleet(&mut b1, &mut rng1).unwrap();
        player("\n").place_fleet(&mut b2, &mut rng2).unwrap();
        assert_eq!(b1.ship_map(), b2.ship_map());
    }
}
