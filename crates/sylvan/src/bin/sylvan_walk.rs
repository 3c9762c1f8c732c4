//! # SYLVAN Walk
//!
//! Headless walk through the world: right for N spans, then back to the
//! start, jumping now and then. Prints what the session generated.
//!
//! ```bash
//! # Defaults, 10 spans
//! RUST_LOG=debug sylvan_walk
//!
//! # Custom world, 25 spans
//! sylvan_walk world.toml 25
//! ```

use std::process::ExitCode;

use sylvan::{Session, SessionError, SessionResult, TickReport};
use sylvan_procedural::WorldConfig;

/// Frame time of the simulated walk.
const FRAME_SECS: f32 = 1.0 / 60.0;

/// Viewpoint advance per frame.
const WALK_SPEED: f32 = 6.0;

/// Frames between jumps.
const JUMP_EVERY: u32 = 90;

const DEFAULT_SPANS: u32 = 10;

#[derive(Default)]
struct Tally {
    frames: u32,
    jumps: u32,
    fruit: u32,
    evicted: usize,
    respawned: usize,
}

impl Tally {
    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.evicted += report.evicted;
        self.respawned += report.respawned;
    }
}

fn parse_args() -> SessionResult<(WorldConfig, u32)> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => WorldConfig::from_file(&path)?,
        None => WorldConfig::default(),
    };
    let spans = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|_| SessionError::Usage(format!("span count `{raw}` is not a number")))?,
        None => DEFAULT_SPANS,
    };
    Ok((config, spans))
}

/// Walks toward `target`, jumping and eating fruit on the way.
fn walk_to(session: &mut Session, target: f32, tally: &mut Tally) {
    let mut x = session.avatar().0;
    let step = if target >= x { WALK_SPEED } else { -WALK_SPEED };
    while (target - x).abs() > WALK_SPEED {
        x += step;
        let report = session.tick(x, FRAME_SECS);
        tally.record(&report);

        if tally.frames % JUMP_EVERY == 0 && session.jump() {
            tally.jumps += 1;
        }
        let (ax, ay) = session.avatar();
        let cell = session.config().cell_size;
        if session.touch(ax, ay - cell * 4.0) {
            tally.fruit += 1;
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn run() -> SessionResult<()> {
    let (config, spans) = parse_args()?;
    let mut session = Session::new(config)?;
    let start = session.avatar().0;
    let mut tally = Tally::default();

    log::info!("walking {spans} spans right and back");
    let far = start + session.window().span_width() * spans as f32;
    walk_to(&mut session, far, &mut tally);
    walk_to(&mut session, start, &mut tally);

    let stats = session.stats();
    println!("frames            {}", tally.frames);
    println!("host time         {:.1}s", session.clock());
    println!("spans generated   {}", stats.spans_generated);
    println!("spans evicted     {}", stats.spans_evicted);
    println!("entities created  {}", stats.entities_created);
    println!("entities live     {}", stats.live_entities());
    println!("entities evicted  {}", tally.evicted);
    println!("jumps             {}", tally.jumps);
    println!("raindrops falling {}", session.rain().drops().len());
    println!("fruit eaten       {}", tally.fruit);
    println!("fruit respawned   {}", tally.respawned);
    println!("energy            {:.0}", session.energy().value());

    session.shutdown();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
