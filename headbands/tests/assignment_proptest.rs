/// Property-based tests for roster and assignment invariants using proptest
use headbands::{Game, GameError, Player, RoleDealer, RoleToken};
use proptest::prelude::*;
use std::collections::HashSet;

// Player ids from a small alphabet so duplicate joins are common
fn player_ids_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-f]", 0..20)
}

// Role pool with unique ids
fn role_pool_strategy(max: usize) -> impl Strategy<Value = Vec<RoleToken>> {
    prop::collection::hash_set("[A-Z]{1,3}", 0..=max)
        .prop_map(|ids| ids.into_iter().map(RoleToken::new).collect())
}

fn first_occurrences(ids: &[String]) -> Vec<Player> {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .map(|id| Player::new(id.as_str()))
        .collect()
}

proptest! {
    #[test]
    fn test_roster_keeps_first_insertion_order(ids in player_ids_strategy()) {
        let mut game = Game::new(Vec::new());
        for id in &ids {
            prop_assert!(game.add_player(Player::new(id.as_str())));
        }

        prop_assert_eq!(game.get_players(), first_occurrences(&ids));
    }

    #[test]
    fn test_removing_stranger_changes_nothing(ids in player_ids_strategy()) {
        let mut game = Game::new(Vec::new());
        for id in &ids {
            game.add_player(Player::new(id.as_str()));
        }
        let before = game.get_players();

        prop_assert!(!game.remove_player(&Player::new("stranger")));
        prop_assert_eq!(game.get_players(), before);
    }

    #[test]
    fn test_start_outcome(
        ids in player_ids_strategy(),
        pool in role_pool_strategy(8),
        seed in any::<u64>(),
    ) {
        let mut game = Game::with_dealer(pool.clone(), RoleDealer::seeded(seed));
        for id in &ids {
            game.add_player(Player::new(id.as_str()));
        }
        let roster = game.get_players();

        match game.start() {
            Ok(()) => {
                prop_assert!(roster.len() >= 2);
                prop_assert!(roster.len() <= pool.len());

                let assignment = game.assignment();
                prop_assert_eq!(assignment.len(), roster.len());
                let roles: HashSet<_> = assignment.roles().collect();
                prop_assert_eq!(roles.len(), roster.len());
                for player in &roster {
                    let role = game.get_role(player).unwrap();
                    prop_assert!(pool.contains(role));
                }
            }
            Err(GameError::InsufficientPlayers { players }) => {
                prop_assert!(roster.len() < 2);
                prop_assert_eq!(players, roster.len());
                prop_assert!(game.assignment().is_empty());
            }
            Err(GameError::InsufficientRoles { players, roles }) => {
                prop_assert!(players > roles);
                prop_assert_eq!(roles, pool.len());
                prop_assert!(game.assignment().is_empty());
                prop_assert_eq!(game.get_players(), roster);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn test_board_hides_only_self(
        n_players in 2usize..8,
        extra_roles in 0usize..4,
        seed in any::<u64>(),
    ) {
        let pool = (0..n_players + extra_roles)
            .map(|i| RoleToken::new(format!("role{i}")))
            .collect();
        let mut game = Game::with_dealer(pool, RoleDealer::seeded(seed));
        for i in 0..n_players {
            game.add_player(Player::new(format!("p{i}")));
        }
        game.start().unwrap();

        for player in game.get_players() {
            let board = game.get_board(&player).unwrap();
            prop_assert!(!board.contains(&player));
            prop_assert_eq!(board.len(), n_players - 1);
            for (other, role) in board.iter() {
                prop_assert_eq!(game.get_role(other).unwrap(), role);
            }
        }
    }
}
