mod support;

use analysis::events::{Affiliation, GamePhase};
use analysis::registry::Registry;
use analysis::side::{Side, SideResolver};
use analysis::ResolveError;
use pretty_assertions::assert_eq;
use support::*;

#[test]
fn registers_on_first_sight() {
    let sides = SideResolver::new();
    let mut registry = Registry::new(&sides);

    let player = registry.resolve(&t(1), &sides).unwrap().clone();
    assert_eq!(1, player.steam_id);
    assert_eq!("player-1", player.name);
    assert_eq!(Side::First, player.side);

    registry.resolve(&ct(2), &sides).unwrap();

    assert_eq!(vec![1], registry.team(Side::First).players);
    assert_eq!(vec![2], registry.team(Side::Second).players);
    assert_eq!(2, registry.len());
}

#[test]
fn returns_cached_player() {
    let sides = SideResolver::new();
    let mut registry = Registry::new(&sides);

    registry.resolve(&t(1), &sides).unwrap();

    let mut renamed = ct(1);
    renamed.name = "someone else".to_owned();
    let player = registry.resolve(&renamed, &sides).unwrap();

    assert_eq!("player-1", player.name);
    assert_eq!(Side::First, player.side);
    assert_eq!(1, registry.len());
    assert!(registry.team(Side::Second).players.is_empty());
}

#[test]
fn bots_are_not_players() {
    let sides = SideResolver::new();
    let mut registry = Registry::new(&sides);

    assert_eq!(
        Err(ResolveError::NotAPlayer(7)),
        registry.resolve(&bot(7, Affiliation::Terrorists), &sides).cloned()
    );
    assert!(registry.is_empty());
}

#[test]
fn spectators_have_no_side() {
    let sides = SideResolver::new();
    let mut registry = Registry::new(&sides);

    assert_eq!(
        Err(ResolveError::NoSide {
            steam_id: 3,
            affiliation: Affiliation::Spectators
        }),
        registry
            .resolve(&player(3, Affiliation::Spectators), &sides)
            .cloned()
    );
    assert_eq!(Err(ResolveError::Unknown(3)), registry.get(3).cloned());
}

#[test]
fn uses_current_side_mapping() {
    let mut sides = SideResolver::new();
    sides.phase_changed(GamePhase::TeamSideSwitch);
    let mut registry = Registry::new(&sides);

    let player = registry.resolve(&ct(4), &sides).unwrap();
    assert_eq!(Side::First, player.side);
    assert_eq!(
        Affiliation::CounterTerrorists,
        registry.team(Side::First).affiliation
    );
}

#[test]
fn reset_rebuilds_roster() {
    let sides = SideResolver::new();
    let mut registry = Registry::new(&sides);
    registry.resolve(&t(1), &sides).unwrap();
    registry.resolve(&ct(2), &sides).unwrap();

    registry.reset(&[t(3), ct(4), bot(5, Affiliation::Terrorists)], &sides);

    assert!(registry.get(1).is_err());
    assert_eq!(vec![3], registry.team(Side::First).players);
    assert_eq!(vec![4], registry.team(Side::Second).players);
    assert_eq!(
        vec![3, 4],
        registry.players().map(|p| p.steam_id).collect::<Vec<_>>()
    );
}
