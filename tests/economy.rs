use wattshift::{
    catalog::ItemKey,
    clock::WeatherKind,
    commands,
    engine::{System, SystemContext},
    grid::HOME_TILE,
    rng::RngManager,
    systems::{EconomySystem, PollutionSystem},
    world::World,
};

fn run_economy(world: &mut World, ticks: u64) {
    let mut rng = RngManager::new(1);
    let mut economy = EconomySystem::new();
    for _ in 0..ticks {
        let ctx = SystemContext {
            tick: world.tick(),
            dt_secs: world.dt_secs(),
            scenario_name: "test",
        };
        economy
            .run(&ctx, world, &mut rng.stream("economy"))
            .unwrap();
        world.advance_time();
    }
}

fn unlock_renewables(world: &mut World) {
    assert!(commands::purchase(world, ItemKey::Coal));
    assert!(commands::place_on_tile(world, HOME_TILE));
    world.resources_mut().coins = 10.0;
    assert!(commands::purchase(world, ItemKey::Pellet));
    assert!(commands::place_on_tile(world, HOME_TILE));
}

#[test]
fn renewables_gate_blocks_green_production_but_not_coins() {
    let mut world = World::new(1.0);
    world.base_rates_mut().sun = 1.0;
    world.base_rates_mut().water = 1.0;
    world.base_rates_mut().wind = 1.0;
    world.base_rates_mut().coins = 0.05;

    run_economy(&mut world, 1);

    assert_eq!(world.resources().sun, 0.0);
    assert_eq!(world.resources().water, 0.0);
    assert_eq!(world.resources().wind, 0.0);
    assert_eq!(world.effective_rates().sun, 0.0);
    assert_eq!(world.effective_rates().wind, 0.0);
    assert!((world.resources().coins - 0.05).abs() < 1e-12);
}

#[test]
fn daylight_doubles_sun_and_night_shifts_to_wind() {
    let mut world = World::new(1.0);
    unlock_renewables(&mut world);
    world.base_rates_mut().sun = 1.0;
    world.base_rates_mut().water = 1.0;
    world.base_rates_mut().wind = 1.0;
    world.base_rates_mut().coins = 0.0;
    let start = *world.resources();

    run_economy(&mut world, 1);
    assert!((world.resources().sun - (start.sun + 2.0)).abs() < 1e-9);
    assert!((world.resources().water - (start.water + 1.0)).abs() < 1e-9);
    assert!((world.resources().wind - (start.wind + 1.0)).abs() < 1e-9);

    while world.is_day() {
        world.advance_time();
    }
    let at_dusk = *world.resources();
    run_economy(&mut world, 1);
    assert_eq!(world.resources().sun, at_dusk.sun);
    assert!((world.resources().wind - (at_dusk.wind + 1.2)).abs() < 1e-9);
    assert!((world.resources().water - (at_dusk.water + 1.0)).abs() < 1e-9);
}

#[test]
fn frost_halts_all_production() {
    let mut world = World::new(1.0);
    unlock_renewables(&mut world);
    world.base_rates_mut().sun = 1.0;
    world.base_rates_mut().water = 1.0;
    world.base_rates_mut().wind = 1.0;
    world.base_rates_mut().coins = 0.5;
    world.force_weather(WeatherKind::Frost, 50.0);
    let before = *world.resources();

    run_economy(&mut world, 5);

    assert_eq!(world.resources().sun, before.sun);
    assert_eq!(world.resources().water, before.water);
    assert_eq!(world.resources().wind, before.wind);
    assert_eq!(world.resources().coins, before.coins);
    assert_eq!(world.effective_rates().coins, 0.0);
}

#[test]
fn resources_clamp_at_zero_under_negative_rates() {
    let mut world = World::new(1.0);
    world.resources_mut().coins = 1.0;
    world.base_rates_mut().coins = -5.0;

    run_economy(&mut world, 1);
    assert_eq!(world.resources().coins, 0.0);
    run_economy(&mut world, 3);
    assert_eq!(world.resources().coins, 0.0);
}

#[test]
fn pollution_level_stays_within_bounds() {
    let mut rng = RngManager::new(1);
    let mut pollution = PollutionSystem::new();
    let mut world = World::new(1.0);
    commands::add_pollution_instant(&mut world, 2.0);
    world.pollution_mut().rate_per_sec = -3.0;

    let ctx = SystemContext {
        tick: 0,
        dt_secs: 1.0,
        scenario_name: "test",
    };
    pollution
        .run(&ctx, &mut world, &mut rng.stream("pollution"))
        .unwrap();
    assert_eq!(world.pollution().level, 0.0);

    world.pollution_mut().rate_per_sec = 300.0;
    pollution
        .run(&ctx, &mut world, &mut rng.stream("pollution"))
        .unwrap();
    assert_eq!(world.pollution().level, 100.0);
}
