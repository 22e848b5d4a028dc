use std::path::PathBuf;

use wattshift::{
    clock::WeatherKind,
    engine::{Engine, EngineBuilder, EngineSettings},
    scenario::ScenarioLoader,
    systems::{
        BookkeepingSystem, EconomySystem, PollutionSystem, ScheduleSystem, WeatherSystem,
    },
    world::World,
};

fn build_engine(seed: u64) -> Engine {
    let settings = EngineSettings {
        scenario_name: "weather_tests".into(),
        seed,
        snapshot_interval_ticks: 0,
        snapshot_dir: PathBuf::from("snapshots_weather_tests"),
    };
    EngineBuilder::new(settings)
        .with_system(WeatherSystem::new())
        .with_system(ScheduleSystem::new())
        .with_system(EconomySystem::new())
        .with_system(PollutionSystem::new())
        .with_system(BookkeepingSystem::new())
        .build()
}

#[test]
fn no_event_before_the_first_roll_window() {
    let mut engine = build_engine(3);
    let mut world = World::new(1.0);
    for _ in 0..29 {
        engine.tick(&mut world).unwrap();
    }
    assert_eq!(world.weather().kind, WeatherKind::None);
}

#[test]
fn events_start_on_roll_ticks_and_sunny_needs_daylight() {
    let mut engine = build_engine(42);
    let mut world = World::new(1.0);
    let mut previous = WeatherKind::None;
    let mut started = 0;

    for _ in 0..2_000 {
        let day_before = world.is_day();
        engine.tick(&mut world).unwrap();
        let event = world.weather().clone();
        if previous == WeatherKind::None && event.kind != WeatherKind::None {
            started += 1;
            assert_eq!(world.tick() % 30, 0, "events only start on roll ticks");
            if event.kind == WeatherKind::Sunny {
                assert!(day_before, "sunny spells cannot start at night");
            }
            let expected = if event.kind == WeatherKind::Frost {
                30.0
            } else {
                25.0
            };
            assert_eq!(event.duration_secs, expected);
        }
        previous = event.kind;
    }

    assert!(started > 0, "two thousand ticks should see some weather");
}

#[test]
fn forced_event_counts_down_and_clears() {
    let mut engine = build_engine(3);
    let mut world = World::new(1.0);
    world.force_weather(WeatherKind::Clouds, 3.0);

    engine.tick(&mut world).unwrap();
    assert_eq!(world.weather().kind, WeatherKind::Clouds);
    engine.tick(&mut world).unwrap();
    assert_eq!(world.weather().kind, WeatherKind::Clouds);
    engine.tick(&mut world).unwrap();
    assert_eq!(world.weather().kind, WeatherKind::None);
}

#[test]
fn same_seed_replays_the_same_story() {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    let scenario = loader.load("scenarios/fresh_start.yaml").unwrap();

    let mut world_a = scenario.build_world();
    let mut engine_a = build_engine(scenario.seed);
    engine_a.run(&mut world_a, 500).unwrap();

    let mut world_b = scenario.build_world();
    let mut engine_b = build_engine(scenario.seed);
    engine_b.run(&mut world_b, 500).unwrap();

    assert_eq!(world_a.weather().kind, world_b.weather().kind);
    assert_eq!(
        world_a.weather().remaining_secs,
        world_b.weather().remaining_secs
    );
    assert_eq!(world_a.resources().coins, world_b.resources().coins);
}
