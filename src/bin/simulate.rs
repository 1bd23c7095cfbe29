use chrono::{DateTime, Utc};
use clap::Parser;
use maze_chase_engine::config::GameConfig;
use maze_chase_engine::constants::{DEFAULT_MAZE_COLS, DEFAULT_MAZE_ROWS, TICK_MS};
use maze_chase_engine::engine::GameEngine;
use maze_chase_engine::error::{ConfigError, EngineError, MazeError};
use maze_chase_engine::maze::{Maze, MazeModel};
use maze_chase_engine::types::{
    BehaviorVariant, CellKind, Direction, GameEvent, GameSummary, HunterMode, Position,
    SeekerView, Snapshot,
};
use rand::rngs::StdRng;
use rand::{Rng as _, SeedableRng};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    seed: Option<u32>,
    /// ASCII layout file; the generated lattice maze is used when omitted.
    #[arg(long)]
    maze: Option<PathBuf>,
    /// JSON overrides for the game configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 60 * 60 * 5)]
    ticks: u64,
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,
    /// Comma-separated hunter roster, e.g. `aggressive,ambush`.
    #[arg(long, value_delimiter = ',', value_parser = parse_variant)]
    hunters: Vec<BehaviorVariant>,
    /// Turn queued before the first tick.
    #[arg(long, value_parser = parse_direction)]
    first_turn: Option<Direction>,
    #[arg(long)]
    run_id: Option<String>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
    /// Print the final board to stdout.
    #[arg(long)]
    render: bool,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error("failed to read maze file {}: {source}", path.display())]
    ReadMaze { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Clone, Debug, Serialize)]
struct AnomalyRecord {
    tick: u64,
    message: String,
}

#[derive(Clone, Debug, Default)]
struct RunOutcome {
    ticks_run: u64,
    anomalies: Vec<String>,
    anomaly_records: Vec<AnomalyRecord>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    run_id: String,
    seed: u32,
    started_at: String,
    finished_at: String,
    ticks_run: u64,
    tick_ms: u64,
    anomaly_count: usize,
    anomalies: Vec<String>,
    game: GameSummary,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StructuredLogLine {
    timestamp_ms: i64,
    level: String,
    event: String,
    run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tick: Option<u64>,
    details: Value,
}

/// Drives the seeker like a lazy player: keeps going straight in corridors,
/// and at junctions turns toward an adjacent item or a random open way.
struct Autopilot {
    rng: StdRng,
}

impl Autopilot {
    fn new(seed: u32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(u64::from(seed)),
        }
    }

    fn choose(&mut self, maze: &Maze, seeker: &SeekerView) -> Option<Direction> {
        let options = maze.valid_directions(seeker.position);
        let reverse = seeker.direction.opposite();
        let forward: Vec<Direction> = options
            .iter()
            .copied()
            .filter(|dir| *dir != reverse)
            .collect();
        let ahead_open = forward.contains(&seeker.direction);
        if ahead_open && forward.len() == 1 {
            return None;
        }
        if forward.is_empty() {
            return options.first().copied();
        }

        let baited = forward.iter().copied().find(|dir| {
            matches!(
                maze.cell_kind(seeker.position.step(*dir)),
                CellKind::Dot | CellKind::PowerItem
            )
        });
        if baited.is_some() {
            return baited;
        }
        let idx = self.rng.random_range(0..forward.len());
        Some(forward[idx])
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    let started_at = Utc::now();
    let run_id = cli
        .run_id
        .clone()
        .unwrap_or_else(|| default_run_id(seed, started_at.timestamp_millis()));

    let mut engine = match build_engine(&cli, seed) {
        Ok(engine) => engine,
        Err(error) => {
            emit_log(
                "error",
                "setup_failed",
                &run_id,
                Some(seed),
                None,
                json!({ "error": error.to_string() }),
            );
            std::process::exit(2);
        }
    };

    if let Some(dir) = cli.first_turn {
        engine.queue_direction(dir);
    }

    let (cols, rows) = engine.maze().dimensions();
    emit_log(
        "info",
        "run_started",
        &run_id,
        Some(seed),
        None,
        json!({
            "ticks": cli.ticks,
            "tickMs": cli.tick_ms,
            "cols": cols,
            "rows": rows,
            "hunters": engine.snapshot().hunters.len(),
            "roster": engine.config().hunter_variants,
            "dots": engine.maze().dots().count(),
            "powerItems": engine.maze().power_items().count(),
        }),
    );

    let mut autopilot = Autopilot::new(seed);
    let outcome = run_simulation(&mut engine, &mut autopilot, cli.ticks, cli.tick_ms);
    for anomaly in &outcome.anomaly_records {
        emit_log(
            "warn",
            "anomaly_detected",
            &run_id,
            Some(seed),
            Some(anomaly.tick),
            json!({ "message": anomaly.message }),
        );
    }

    let summary = build_run_summary(
        run_id.clone(),
        seed,
        started_at,
        Utc::now(),
        cli.tick_ms,
        &outcome,
        engine.summary(),
    );
    match serde_json::to_string(&summary.game) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::warn!(%error, "game summary did not serialize"),
    }
    if cli.render {
        println!("{}", render_board(&engine));
    }

    let mut summary_out_written: Option<String> = None;
    if let Some(path) = cli.summary_out.as_ref() {
        if let Err(error) = write_summary(path, &summary) {
            emit_log(
                "error",
                "summary_write_failed",
                &run_id,
                Some(seed),
                None,
                json!({
                    "path": path.to_string_lossy(),
                    "error": error.to_string(),
                }),
            );
            std::process::exit(2);
        }
        summary_out_written = Some(path.to_string_lossy().to_string());
    }

    emit_log(
        "info",
        "run_finished",
        &run_id,
        Some(seed),
        Some(outcome.ticks_run),
        json!({
            "score": summary.game.score,
            "level": summary.game.level,
            "gameOver": summary.game.game_over,
            "anomalyCount": summary.anomaly_count,
            "summaryOut": summary_out_written,
        }),
    );

    if !outcome.anomalies.is_empty() {
        std::process::exit(1);
    }
}

fn build_engine(cli: &Cli, seed: u32) -> Result<GameEngine, SetupError> {
    let maze = match cli.maze.as_ref() {
        Some(path) => {
            let layout =
                std::fs::read_to_string(path).map_err(|source| SetupError::ReadMaze {
                    path: path.clone(),
                    source,
                })?;
            Maze::parse(&layout)?
        }
        None => Maze::generate(DEFAULT_MAZE_COLS, DEFAULT_MAZE_ROWS)?,
    };
    let mut config = match cli.config.as_ref() {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if !cli.hunters.is_empty() {
        config.hunter_variants = cli.hunters.clone();
    }
    Ok(GameEngine::new(maze, config, seed)?)
}

fn parse_variant(raw: &str) -> Result<BehaviorVariant, String> {
    BehaviorVariant::parse(&raw.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("unknown hunter variant `{raw}`"))
}

fn parse_direction(raw: &str) -> Result<Direction, String> {
    Direction::parse(&raw.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("unknown direction `{raw}`"))
}

fn run_simulation(
    engine: &mut GameEngine,
    autopilot: &mut Autopilot,
    max_ticks: u64,
    tick_ms: u64,
) -> RunOutcome {
    let mut outcome = RunOutcome::default();
    let mut anomaly_seen = HashSet::new();
    let mut previous_modes = hunter_modes(&engine.snapshot());

    while outcome.ticks_run < max_ticks && !engine.is_over() {
        let before = engine.snapshot();
        if let Some(dir) = autopilot.choose(engine.maze(), &before.seeker) {
            engine.queue_direction(dir);
        }
        engine.tick(tick_ms);
        outcome.ticks_run += 1;

        let events = engine.drain_events();
        let snapshot = engine.snapshot();
        for message in
            collect_snapshot_anomalies(&snapshot, engine.maze(), &previous_modes, &events)
        {
            push_anomaly(
                &mut outcome.anomalies,
                &mut outcome.anomaly_records,
                &mut anomaly_seen,
                outcome.ticks_run,
                message,
            );
        }
        previous_modes = hunter_modes(&snapshot);
    }
    outcome
}

fn hunter_modes(snapshot: &Snapshot) -> Vec<HunterMode> {
    snapshot.hunters.iter().map(|hunter| hunter.mode).collect()
}

fn collect_snapshot_anomalies(
    snapshot: &Snapshot,
    maze: &impl MazeModel,
    previous_modes: &[HunterMode],
    events: &[GameEvent],
) -> Vec<String> {
    let mut anomalies = Vec::new();
    if !maze.is_walkable(snapshot.seeker.position) {
        anomalies.push(format!(
            "seeker off the floor at {:?}",
            snapshot.seeker.position
        ));
    }
    if !is_fraction(snapshot.seeker.power_fraction) {
        anomalies.push(format!(
            "power fraction out of range: {}",
            snapshot.seeker.power_fraction
        ));
    }
    if snapshot.remaining_items != maze.remaining_item_count() {
        anomalies.push(format!(
            "item count mismatch: snapshot {} maze {}",
            snapshot.remaining_items,
            maze.remaining_item_count()
        ));
    }

    for hunter in &snapshot.hunters {
        if !maze.is_walkable(hunter.position) {
            anomalies.push(format!(
                "hunter {} off the floor at {:?}",
                hunter.id, hunter.position
            ));
        }
        if !is_fraction(hunter.frightened_fraction) {
            anomalies.push(format!(
                "hunter {} frightened fraction out of range: {}",
                hunter.id, hunter.frightened_fraction
            ));
        }
        let was_eaten = previous_modes
            .get(hunter.id)
            .is_some_and(|mode| *mode == HunterMode::Eaten);
        let captured = events.iter().any(|event| {
            matches!(event, GameEvent::HunterCaptured { hunter_id, .. } if *hunter_id == hunter.id)
        });
        if hunter.mode == HunterMode::Eaten && !was_eaten && !captured {
            anomalies.push(format!("hunter {} eaten without a capture", hunter.id));
        }
    }
    anomalies
}

fn is_fraction(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

fn push_anomaly(
    anomalies: &mut Vec<String>,
    anomaly_records: &mut Vec<AnomalyRecord>,
    anomaly_seen: &mut HashSet<String>,
    tick: u64,
    message: String,
) {
    anomaly_records.push(AnomalyRecord {
        tick,
        message: message.clone(),
    });
    if anomaly_seen.insert(message.clone()) {
        anomalies.push(message);
    }
}

fn default_run_id(seed: u32, timestamp_ms: i64) -> String {
    format!("sim-{seed}-{timestamp_ms}")
}

fn build_run_summary(
    run_id: String,
    seed: u32,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    tick_ms: u64,
    outcome: &RunOutcome,
    game: GameSummary,
) -> RunSummary {
    RunSummary {
        run_id,
        seed,
        started_at: started_at.to_rfc3339(),
        finished_at: finished_at.to_rfc3339(),
        ticks_run: outcome.ticks_run,
        tick_ms,
        anomaly_count: outcome.anomaly_records.len(),
        anomalies: outcome.anomalies.clone(),
        game,
    }
}

fn render_board(engine: &GameEngine) -> String {
    let snapshot = engine.snapshot();
    let mut overlays: Vec<(Position, char)> = snapshot
        .hunters
        .iter()
        .map(|hunter| {
            let glyph = match hunter.mode {
                HunterMode::Scatter | HunterMode::Chase => 'G',
                HunterMode::Frightened => 'g',
                HunterMode::Eaten => '"',
            };
            (hunter.position, glyph)
        })
        .collect();
    overlays.push((snapshot.seeker.position, 'P'));
    format!(
        "{}\nscore {} lives {} level {}",
        engine.maze().render_ascii(&overlays),
        snapshot.score,
        snapshot.lives,
        snapshot.level
    )
}

fn emit_log(
    level: &str,
    event: &str,
    run_id: &str,
    seed: Option<u32>,
    tick: Option<u64>,
    details: Value,
) {
    let log_line = StructuredLogLine {
        timestamp_ms: Utc::now().timestamp_millis(),
        level: level.to_string(),
        event: event.to_string(),
        run_id: run_id.to_string(),
        seed,
        tick,
        details,
    };
    match serde_json::to_string(&log_line) {
        Ok(line) => eprintln!("{line}"),
        Err(error) => tracing::warn!(%error, "structured log did not serialize"),
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
    std::fs::write(path, summary_text)
}
