//! HTTP surface for the browser client: a read-only state feed (JSON +
//! SSE) and the command routes the presentation layer uses to act on the
//! session. The simulation advances on a real-time interval task that is
//! explicitly aborted at shutdown so no tick can outlive the session.

use std::{
    convert::Infallible,
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::broadcast, time::MissedTickBehavior};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};
use tracing::{info, warn};

use crate::{
    catalog::ItemKey,
    commands,
    engine::{Engine, EngineBuilder, EngineSettings},
    grid::TileId,
    scenario::Scenario,
    systems::{
        BookkeepingSystem, EconomySystem, PollutionSystem, ScheduleSystem, WeatherSystem,
    },
    world::{World, WorldSnapshot},
};

#[derive(Clone, Serialize)]
pub struct StateEnvelope {
    pub scenario: String,
    pub frame: WorldSnapshot,
}

#[derive(Clone, Copy, Serialize)]
pub struct CommandOutcome {
    pub accepted: bool,
}

struct Session {
    engine: Engine,
    world: World,
}

#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    broadcaster: broadcast::Sender<String>,
}

pub struct WebServerConfig {
    pub scenario: Scenario,
    pub snapshot_interval: u64,
    pub snapshot_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

pub async fn run(config: WebServerConfig) -> Result<()> {
    let WebServerConfig {
        scenario,
        snapshot_interval,
        snapshot_dir,
        host,
        port,
    } = config;

    let world = scenario.build_world();
    let dt_secs = scenario.dt_secs;
    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval,
        snapshot_dir,
    };
    let engine = EngineBuilder::new(settings)
        .with_system(WeatherSystem::new())
        .with_system(ScheduleSystem::new())
        .with_system(EconomySystem::new())
        .with_system(PollutionSystem::new())
        .with_system(BookkeepingSystem::new())
        .build();

    let session = Arc::new(Mutex::new(Session { engine, world }));
    let (tx, _) = broadcast::channel::<String>(512);

    let ticker = tokio::spawn(tick_loop(session.clone(), tx.clone(), dt_secs));

    let state = AppState {
        session,
        broadcaster: tx,
    };

    let router = Router::new()
        .route("/api/state", get(latest_state))
        .route("/api/events", get(stream_events))
        .route("/api/purchase/:item", post(purchase))
        .route("/api/place/:tile", post(place))
        .route("/api/cancel", post(cancel))
        .route("/api/story/coins", post(story_coins))
        .route("/api/story/pollution", post(story_pollution))
        .route("/api/story/discount", post(story_discount))
        .with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    info!(%addr, scenario = %scenario.name, "session live");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The session is over; stop the tick source before dropping it.
    ticker.abort();
    info!("session closed");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}

async fn tick_loop(
    session: Arc<Mutex<Session>>,
    tx: broadcast::Sender<String>,
    dt_secs: f64,
) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(dt_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        let frame = {
            let mut guard = session.lock().expect("session lock poisoned");
            let Session { engine, world } = &mut *guard;
            match engine.tick(world) {
                Ok(()) => engine.snapshot(world),
                Err(err) => {
                    warn!(error = %err, "tick failed");
                    continue;
                }
            }
        };
        if let Ok(payload) = serde_json::to_string(&frame) {
            let _ = tx.send(payload);
        }
    }
}

fn with_session<T>(state: &AppState, apply: impl FnOnce(&mut Engine, &mut World) -> T) -> T {
    let mut guard = state.session.lock().expect("session lock poisoned");
    let Session { engine, world } = &mut *guard;
    let value = apply(engine, world);
    let frame = engine.snapshot(world);
    if let Ok(payload) = serde_json::to_string(&frame) {
        let _ = state.broadcaster.send(payload);
    }
    value
}

async fn latest_state(State(state): State<AppState>) -> Json<StateEnvelope> {
    let guard = state.session.lock().expect("session lock poisoned");
    let frame = guard.engine.snapshot(&guard.world);
    Json(StateEnvelope {
        scenario: guard.engine.scenario_name().to_string(),
        frame,
    })
}

async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.broadcaster.subscribe();
    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(payload) => Some(Ok(Event::default().data(payload))),
        Err(_) => None,
    });
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(2))
            .text("keep-alive"),
    )
}

async fn purchase(
    State(state): State<AppState>,
    Path(item): Path<String>,
) -> Json<CommandOutcome> {
    let accepted = match item.parse::<ItemKey>() {
        Ok(key) => with_session(&state, |_, world| commands::purchase(world, key)),
        Err(()) => false,
    };
    Json(CommandOutcome { accepted })
}

async fn place(State(state): State<AppState>, Path(tile): Path<String>) -> Json<CommandOutcome> {
    let accepted = match tile.parse::<TileId>() {
        Ok(id) => with_session(&state, |_, world| commands::place_on_tile(world, id)),
        Err(()) => false,
    };
    Json(CommandOutcome { accepted })
}

async fn cancel(State(state): State<AppState>) -> Json<CommandOutcome> {
    with_session(&state, |_, world| commands::cancel_pending_placement(world));
    Json(CommandOutcome { accepted: true })
}

#[derive(Deserialize)]
struct CoinsBody {
    amount: f64,
}

async fn story_coins(
    State(state): State<AppState>,
    Json(body): Json<CoinsBody>,
) -> Json<CommandOutcome> {
    with_session(&state, |_, world| commands::grant_coins(world, body.amount));
    Json(CommandOutcome { accepted: true })
}

#[derive(Deserialize)]
struct PollutionBody {
    delta: f64,
}

async fn story_pollution(
    State(state): State<AppState>,
    Json(body): Json<PollutionBody>,
) -> Json<CommandOutcome> {
    with_session(&state, |_, world| {
        commands::add_pollution_instant(world, body.delta)
    });
    Json(CommandOutcome { accepted: true })
}

#[derive(Deserialize)]
struct DiscountBody {
    pct: f64,
    seconds: f64,
}

async fn story_discount(
    State(state): State<AppState>,
    Json(body): Json<DiscountBody>,
) -> Json<CommandOutcome> {
    with_session(&state, |_, world| {
        commands::set_global_discount(world, body.pct, body.seconds)
    });
    Json(CommandOutcome { accepted: true })
}
