use wattshift::{
    catalog::ItemKey,
    commands,
    grid::{TileId, HOME_TILE},
    world::World,
};

fn fresh_world() -> World {
    World::new(1.0)
}

fn mission_completed(world: &World, key: &str) -> bool {
    world
        .missions()
        .iter()
        .find(|m| m.key == key)
        .map(|m| m.completed)
        .unwrap_or(false)
}

#[test]
fn coal_placement_commits_the_purchase() {
    let mut world = fresh_world();
    assert!(commands::purchase(&mut world, ItemKey::Coal));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    let home = world.grid().tile(HOME_TILE).unwrap();
    assert_eq!(home.entity, Some(ItemKey::Coal));
    assert_eq!(world.owned().count(ItemKey::Coal), 1);
    assert_eq!(world.pollution().rate_per_sec, 0.4);
    assert_eq!(world.pending_placement(), None);
    assert_eq!(world.just_placed(), Some(HOME_TILE));
    assert!(mission_completed(&world, "first-steps"));
    assert_eq!(world.resources().coins, 10.0);
}

#[test]
fn coal_rejects_every_tile_but_an_empty_home() {
    let mut world = fresh_world();
    assert!(commands::purchase(&mut world, ItemKey::Coal));

    let corner = TileId { x: 0, y: 0 };
    assert!(!commands::place_on_tile(&mut world, corner));
    assert_eq!(world.pending_placement(), Some(ItemKey::Coal));
    assert_eq!(world.grid().tile(corner).unwrap().entity, None);
    assert_eq!(world.owned().count(ItemKey::Coal), 0);
}

#[test]
fn pellet_replaces_coal_and_unlocks_renewables() {
    let mut world = fresh_world();
    assert!(commands::purchase(&mut world, ItemKey::Coal));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    world.resources_mut().coins = 10.0;
    assert!(commands::purchase(&mut world, ItemKey::Pellet));
    assert_eq!(world.resources().coins, 0.0);
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    assert_eq!(world.owned().count(ItemKey::Coal), 0);
    assert_eq!(world.owned().count(ItemKey::Pellet), 1);
    let home = world.grid().tile(HOME_TILE).unwrap();
    assert_eq!(home.entity, Some(ItemKey::Pellet));
    assert!(world.renewables_unlocked());
    assert!((world.pollution().rate_per_sec - 0.15).abs() < 1e-9);
    assert!((world.base_rates().sun - 1.0 / 12.0).abs() < 1e-12);
    assert!((world.base_rates().wind - 1.0 / 16.0).abs() < 1e-12);
    assert!((world.base_rates().water - 1.0 / 18.0).abs() < 1e-12);
    assert_eq!(world.base_rates().coins, 0.03);
    assert!(mission_completed(&world, "eco-choice"));
}

#[test]
fn gas_completes_the_heating_chain() {
    let mut world = fresh_world();
    assert!(commands::purchase(&mut world, ItemKey::Coal));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));
    world.resources_mut().coins = 100.0;
    assert!(commands::purchase(&mut world, ItemKey::Pellet));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    world.base_rates_mut().coins = 0.2;
    assert!(commands::purchase(&mut world, ItemKey::Gas));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    assert_eq!(world.owned().count(ItemKey::Pellet), 0);
    assert_eq!(world.owned().count(ItemKey::Gas), 1);
    assert_eq!(world.grid().home_entity(), Some(ItemKey::Gas));
    assert!((world.pollution().rate_per_sec - 0.05).abs() < 1e-9);
    // The gas boiler caps the coin trickle.
    assert_eq!(world.base_rates().coins, 0.03);
}

#[test]
fn forest_plants_on_any_empty_tile_and_cleans_air() {
    let mut world = fresh_world();
    commands::add_pollution_instant(&mut world, 50.0);
    world.resources_mut().coins = 15.0;
    world.resources_mut().water = 20.0;

    assert!(commands::purchase(&mut world, ItemKey::Forest));
    // Purchase already counts and rewards; the tile click is the visual
    // commit.
    assert_eq!(world.owned().count(ItemKey::Forest), 1);
    assert!(mission_completed(&world, "green-lungs"));
    assert_eq!(world.pollution().level, 20.0);
    assert_eq!(world.pollution().rate_per_sec, -0.5);

    let spot = TileId { x: 2, y: 4 };
    assert!(commands::place_on_tile(&mut world, spot));
    assert_eq!(world.grid().tile(spot).unwrap().entity, Some(ItemKey::Forest));
    assert!(!commands::place_on_tile(&mut world, spot));
}

#[test]
fn occupied_home_rejects_general_items() {
    let mut world = fresh_world();
    assert!(commands::purchase(&mut world, ItemKey::Coal));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    world.resources_mut().coins = 15.0;
    world.resources_mut().water = 20.0;
    assert!(commands::purchase(&mut world, ItemKey::Forest));
    assert!(!commands::place_on_tile(&mut world, HOME_TILE));
    assert_eq!(world.pending_placement(), Some(ItemKey::Forest));
}

#[test]
fn empty_home_accepts_a_general_item_and_blocks_coal_after() {
    let mut world = fresh_world();
    world.resources_mut().coins = 15.0;
    world.resources_mut().water = 20.0;
    assert!(commands::purchase(&mut world, ItemKey::Forest));
    assert!(commands::place_on_tile(&mut world, HOME_TILE));

    assert!(commands::purchase(&mut world, ItemKey::Coal));
    assert!(!commands::place_on_tile(&mut world, HOME_TILE));
    assert_eq!(world.owned().count(ItemKey::Coal), 0);
}

#[test]
fn placement_without_pending_is_a_no_op() {
    let mut world = fresh_world();
    assert!(!commands::place_on_tile(&mut world, HOME_TILE));
    assert_eq!(world.grid().tile(HOME_TILE).unwrap().entity, None);
}
