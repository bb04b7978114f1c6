//! Flappy Sim entry point
//!
//! Headless demo: the autopilot plays a seeded session for a fixed number of
//! ticks and the final snapshot is printed as JSON.
//!
//! Usage: `flappy-sim [tuning.json] [seed] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_sim::sim::{FixedStep, GamePhase, Session, TickInput};
    use flappy_sim::{Tuning, view};

    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first().filter(|a| a.as_str() != "-") {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0x5eed);
    let ticks: u32 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let mut session = match Session::new(tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Session initialized with seed: {}", seed);

    let mut stepper = match FixedStep::new(session.tuning().dt()) {
        Ok(stepper) => stepper,
        Err(e) => {
            log::error!("Invalid timestep: {}", e);
            std::process::exit(1);
        }
    };
    let mut input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut runs = 0u32;
    let mut best = 0u32;
    let mut last_phase = session.phase;
    for _ in 0..ticks {
        stepper.advance(&mut session, &mut input, stepper.dt());

        if session.phase != last_phase && session.phase == GamePhase::GameOver {
            runs += 1;
            best = best.max(session.score);
            log::info!("Run {} ended with score {}", runs, session.score);
        }
        last_phase = session.phase;
    }
    best = best.max(session.score);

    log::info!(
        "Finished {} ticks: {} completed run(s), best score {}",
        ticks,
        runs,
        best
    );
    if let Some(text) = view::banner(session.phase, session.score) {
        log::info!("{}", text.replace('\n', " | "));
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library is driven by the embedding page
}
