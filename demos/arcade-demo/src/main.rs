//! MANO Arcade Demo
//!
//! Runs one minigame headless against a scripted player:
//! - Loads a session config (JSON path as first argument, defaults otherwise)
//! - Paces the script at the configured tick interval
//! - Prints the HUD and every score as it happens
//! - Stops the session through its handle after a time limit
//!
//! Usage: `arcade-demo [config.json] [seconds]`

use std::time::Duration;

use mano_core::{FrameTime, GameKind, GestureLabel, Point2, RenderCommand};
use mano_games::Game;
use mano_runtime::{
    telemetry, ChannelScoreSink, GameSession, RenderSink, ScoreEvent, ScoreSink, ScoreTally,
    SessionConfig,
};
use mano_test::{ScriptedDetector, ScriptedSource, Timeline};
use tracing::info;

/// Prints HUD text every few frames
struct TerminalRenderSink {
    every: u64,
    frames: u64,
}

impl RenderSink for TerminalRenderSink {
    fn render(&mut self, timestamp: FrameTime, commands: &[RenderCommand]) {
        self.frames += 1;
        if self.frames % self.every != 0 {
            return;
        }
        let hud: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        println!("  [{:>7}] {}", timestamp.to_string(), hud.join(" | "));
    }
}

/// Keeps the running total and forwards every event
struct DemoScores {
    tally: ScoreTally,
    channel: ChannelScoreSink,
}

impl ScoreSink for DemoScores {
    fn on_score(&mut self, event: ScoreEvent) {
        self.tally.on_score(event);
        self.channel.on_score(event);
    }
}

/// A scripted player that knows roughly what each game wants
fn script(kind: GameKind, config: &SessionConfig, seconds: u64) -> Timeline {
    let mut timeline = Timeline::new(config.canvas, config.tick_interval()).with_jitter(0.02, 1);
    let (w, h) = (config.canvas.width, config.canvas.height);
    let center = config.canvas.center();

    while timeline.now().as_millis() < seconds * 1_000 {
        timeline = match kind {
            GameKind::PoseMatch | GameKind::SequenceRecallGestures => {
                let mut t = timeline;
                for label in GestureLabel::PLAYABLE {
                    t = t.pose(label, Duration::from_millis(400));
                }
                t
            }
            GameKind::DirectionalSwipe => timeline
                .drag(center, center.offset(150.0, 0.0), 8)
                .idle(Duration::from_millis(200))
                .drag(center, center.offset(0.0, -150.0), 8)
                .idle(Duration::from_millis(200))
                .drag(center, center.offset(-150.0, 0.0), 8)
                .idle(Duration::from_millis(200))
                .drag(center, center.offset(0.0, 150.0), 8)
                .idle(Duration::from_millis(200)),
            GameKind::ShapeTrace => {
                let r = 0.3 * config.canvas.min_side();
                let ring: Vec<Point2> = (0..48)
                    .map(|i| {
                        let a = i as f32 / 48.0 * std::f32::consts::TAU;
                        center.offset(r * a.cos(), r * a.sin())
                    })
                    .collect();
                timeline.sweep(&ring)
            }
            GameKind::ReactionTarget | GameKind::SequenceRecallBalls => {
                // raster scan across the canvas
                let mut t = timeline;
                for row in 1..6 {
                    let y = h * row as f32 / 6.0;
                    t = t.drag(Point2::new(0.05 * w, y), Point2::new(0.95 * w, y), 20);
                }
                t
            }
        };
    }
    timeline
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SessionConfig::from_path(&path)?,
        None => SessionConfig::default(),
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    telemetry::init(&config.log)?;

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              MANO Arcade Demo - scripted player            ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!("  game: {}   preset: {:?}   time limit: {}s", config.game, config.preset, seconds);
    println!();

    let game = match config.seed {
        Some(seed) => Game::with_config(config.game_config(), seed),
        None => Game::from_entropy(config.game_config()),
    };

    // script a little longer than the limit so the handle, not the source, ends the run
    let timeline = script(config.game, &config, seconds + 2);
    let source = ScriptedSource::from_timeline(&timeline)
        .paced(config.tick_interval())
        .live_clock();
    let detector = ScriptedDetector::with_latency(Duration::from_millis(5));

    let tally = ScoreTally::new();
    let (channel, mut score_rx) = ChannelScoreSink::channel();
    let scores = DemoScores {
        tally: tally.clone(),
        channel,
    };
    let render = TerminalRenderSink {
        every: 15,
        frames: 0,
    };

    let mut session = GameSession::new(game, source, detector, scores, render);
    let handle = session.handle();

    let printer = tokio::spawn(async move {
        let mut total = 0u64;
        while let Some(event) = score_rx.recv().await {
            total += u64::from(event.delta);
            println!("  ★ +{} at {} (total {})", event.delta, event.timestamp, total);
        }
    });

    let stopper = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(seconds)).await;
        info!("time limit reached, stopping session");
        handle.stop();
    });

    let report = session.run().await?;
    stopper.abort();
    drop(session);
    printer.await?;

    println!();
    println!("  ended: {:?}", report.end);
    println!(
        "  ticks: {} (with hand {:.0}%), detector failures: {}",
        report.stats.ticks,
        report.stats.hand_ratio() * 100.0,
        report.stats.detector_failures
    );
    println!("  score events: {}", report.stats.score_events);
    if let Some(submission) = tally.submission() {
        println!("  POST /scores {}", serde_json::to_string(&submission)?);
    }

    Ok(())
}
