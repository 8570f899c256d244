//! Terminal driver for the Hatchling pet engine.
//!
//! Wires the pet store to the system clock, a file-backed repository, and
//! a line-oriented command reader, then runs the pet loop until `quit` or
//! end of input.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hatchling-config.yaml`
//! 2. Initialize structured logging (tracing) to stderr
//! 3. Restore the saved pet, or hatch a new one
//! 4. Seed the interaction RNG
//! 5. Start the terminal reader thread
//! 6. Run the pet loop
//! 7. Log the result

mod display;
mod error;
mod input;

use std::io::BufRead as _;
use std::path::Path;

use hatchling_core::{
    Clock, Command, FileStore, HatchlingConfig, PetRepository, SystemClock, run_pet_loop,
};
use hatchling_pet::{ActionOutcome, PetStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::display::TerminalObserver;
use crate::error::EngineError;
use crate::input::Input;

/// Path of the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "hatchling-config.yaml";

/// Commands buffered between the reader and the loop.
const COMMAND_BUFFER: usize = 32;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the pet loop fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().await?;
    Ok(())
}

async fn run() -> Result<(), EngineError> {
    // 1. Load configuration.
    let HatchlingConfig {
        pet: rules,
        runtime,
        storage,
        logging,
    } = HatchlingConfig::load_or_default(Path::new(CONFIG_PATH))?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // 3. Restore or hatch.
    let clock = SystemClock;
    let mut repository = PetRepository::new(FileStore::new(storage.directory), storage.key);
    info!(
        storage_dir = %repository.store().directory().display(),
        update_interval_ms = runtime.update_interval_ms,
        seeded = runtime.seed.is_some(),
        "hatchling-engine starting"
    );
    let (state, was_saved) = repository.load_or_initialize(&rules, clock.now_ms());
    if !was_saved {
        if let Err(e) = repository.save(&state) {
            warn!(error = %e, "failed to save newly hatched pet");
        }
    }
    info!(name = %state.name, level = state.level, restored = was_saved, "pet ready");

    let mut store = PetStore::from_state(state, rules);
    store.subscribe(Box::new(TerminalObserver));
    println!("{}", display::render_status(store.state()));
    println!("Type `help` for commands.");

    // 4. Seed the RNG.
    let mut rng = runtime
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    // 5. Start the reader. A plain thread so a blocked read never holds up
    //    runtime shutdown.
    let (sender, mut commands) = mpsc::channel(COMMAND_BUFFER);
    std::thread::Builder::new()
        .name("hatchling-stdin".to_owned())
        .spawn(move || {
            if let Err(e) = read_commands(&sender) {
                error!(error = %e, "terminal reader stopped");
            }
        })?;

    // 6. Run the pet loop.
    let summary = run_pet_loop(
        &mut store,
        &mut repository,
        &clock,
        &mut rng,
        runtime.update_interval_ms,
        &mut commands,
    )
    .await?;

    // 7. Log results.
    info!(
        reason = ?summary.reason,
        ticks = summary.ticks,
        commands = summary.commands,
        failed_saves = summary.failed_saves,
        "hatchling-engine shutdown complete"
    );
    Ok(())
}

/// Whether the reader keeps going after a line.
enum Flow {
    Continue,
    Quit,
}

/// Read stdin until `quit` or end of input. Dropping the sender on return
/// closes the loop's channel.
fn read_commands(commands: &mpsc::Sender<Command>) -> Result<(), EngineError> {
    for line in std::io::stdin().lock().lines() {
        match handle_line(&line?, commands) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => return Ok(()),
            Err(EngineError::Input { source }) => println!("{source}"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn handle_line(line: &str, commands: &mpsc::Sender<Command>) -> Result<Flow, EngineError> {
    match input::parse_line(line)? {
        Input::Action(action) => {
            let (reply, response) = oneshot::channel();
            send(commands, Command::Dispatch {
                action,
                reply: Some(reply),
            })?;
            let Ok(transition) = response.blocking_recv() else {
                return Err(EngineError::LoopStopped);
            };
            if let Some(ActionOutcome::Skipped(reason)) = transition.outcome {
                println!("Nothing happened: {reason}.");
            }
        }
        Input::Hatch { name, species } => {
            send(commands, Command::Hatch {
                name,
                species,
                reply: None,
            })?;
        }
        Input::Status => {
            let (reply, response) = oneshot::channel();
            send(commands, Command::Status { reply })?;
            let Ok(state) = response.blocking_recv() else {
                return Err(EngineError::LoopStopped);
            };
            println!("{}", display::render_status(&state));
        }
        Input::Help => println!("{}", input::HELP),
        Input::Quit => {
            send(commands, Command::Shutdown)?;
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn send(commands: &mpsc::Sender<Command>, command: Command) -> Result<(), EngineError> {
    if commands.blocking_send(command).is_err() {
        return Err(EngineError::LoopStopped);
    }
    Ok(())
}
