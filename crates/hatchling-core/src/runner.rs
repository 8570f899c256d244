//! The pet loop.
//!
//! [`run_pet_loop`] owns the [`PetStore`] for the life of the program and
//! selects over three sources:
//!
//! - **Decay timer**: every `update_interval_ms` the store applies the
//!   decay accumulated since the last update. The first tick fires
//!   immediately, catching up on time spent offline.
//! - **Commands**: actions, hatching, and status requests from the driver.
//! - **Play timer**: a one-shot sleep until the running play session ends.
//!
//! Every transition that changed the pet is persisted. Persistence is
//! best-effort: a failed save is logged and the loop carries on, and the
//! next successful save overwrites it.

use std::time::Duration;

use hatchling_pet::{PetError, PetStore, Transition};
use hatchling_types::{PetAction, PetState};
use rand::Rng;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::persistence::{KeyValueStore, PetRepository};

/// Errors that end the pet loop.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A store transition failed.
    #[error("pet transition failed: {source}")]
    Pet {
        /// The underlying pet error.
        #[from]
        source: PetError,
    },
}

/// A request sent to the running loop.
#[derive(Debug)]
pub enum Command {
    /// Dispatch an action. The transition is sent back if `reply` is set.
    Dispatch {
        /// The action to run.
        action: PetAction,
        /// Where to send the result.
        reply: Option<oneshot::Sender<Transition>>,
    },
    /// Hatch a new pet, replacing the current one.
    Hatch {
        /// Name for the new pet; default when unset or blank.
        name: Option<String>,
        /// Species for the new pet; default when unset or blank.
        species: Option<String>,
        /// Where to send the result.
        reply: Option<oneshot::Sender<Transition>>,
    },
    /// Send back a copy of the current pet.
    Status {
        /// Where to send the snapshot.
        reply: oneshot::Sender<PetState>,
    },
    /// Save and stop.
    Shutdown,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A [`Command::Shutdown`] was received.
    Shutdown,
    /// Every command sender was dropped.
    ChannelClosed,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Why the loop stopped.
    pub reason: StopReason,
    /// Decay ticks processed.
    pub ticks: u64,
    /// Commands processed.
    pub commands: u64,
    /// Saves that failed.
    pub failed_saves: u64,
}

/// Drive the pet until shutdown or until the command channel closes.
///
/// # Arguments
///
/// * `store` - The pet store; observers should be subscribed beforehand
/// * `repository` - Where snapshots are saved after each change
/// * `clock` - Source of the current time
/// * `rng` - Randomness for interactions
/// * `update_interval_ms` - Milliseconds between decay ticks
/// * `commands` - Incoming requests
///
/// # Errors
///
/// Returns [`RunnerError`] if a transition fails unrecoverably. The pet is
/// saved before the error is returned.
pub async fn run_pet_loop<S: KeyValueStore>(
    store: &mut PetStore,
    repository: &mut PetRepository<S>,
    clock: &impl Clock,
    rng: &mut impl Rng,
    update_interval_ms: u64,
    commands: &mut mpsc::Receiver<Command>,
) -> Result<RunSummary, RunnerError> {
    let mut summary = RunSummary {
        reason: StopReason::ChannelClosed,
        ticks: 0,
        commands: 0,
        failed_saves: 0,
    };

    let mut interval = tokio::time::interval(Duration::from_millis(update_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        name = %store.state().name,
        level = store.state().level,
        update_interval_ms,
        "pet loop starting"
    );

    let result = loop {
        let play_timer = play_timer(store.play_ends_at(), clock.now_ms());

        let step = tokio::select! {
            _ = interval.tick() => {
                summary.ticks = summary.ticks.saturating_add(1);
                store.update_state(clock.now_ms()).map(Some)
            }
            () = play_timer => {
                // The timer measured the session; never expire earlier than its end.
                let now = store.play_ends_at().map_or(clock.now_ms(), |end| end.max(clock.now_ms()));
                store.expire_play(now).map(Some)
            }
            command = commands.recv() => match command {
                None => break Ok(()),
                Some(Command::Shutdown) => {
                    summary.reason = StopReason::Shutdown;
                    break Ok(());
                }
                Some(command) => {
                    summary.commands = summary.commands.saturating_add(1);
                    handle_command(store, command, clock.now_ms(), rng)
                }
            },
        };

        match step {
            Ok(Some(transition)) if transition.changed() => {
                persist(repository, store.state(), &mut summary);
            }
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };

    persist(repository, store.state(), &mut summary);

    match result {
        Ok(()) => {
            info!(
                reason = ?summary.reason,
                ticks = summary.ticks,
                commands = summary.commands,
                failed_saves = summary.failed_saves,
                "pet loop stopped"
            );
            Ok(summary)
        }
        Err(e) => Err(e.into()),
    }
}

/// Run one command. Returns the transition when the pet may have changed.
fn handle_command(
    store: &mut PetStore,
    command: Command,
    now: i64,
    rng: &mut impl Rng,
) -> Result<Option<Transition>, PetError> {
    match command {
        Command::Dispatch { action, reply } => {
            let transition = store.dispatch(&action, now, rng)?;
            respond(reply, transition.clone());
            Ok(Some(transition))
        }
        Command::Hatch {
            name,
            species,
            reply,
        } => {
            let transition = store.initialize(name.as_deref(), species.as_deref(), now)?;
            respond(reply, transition.clone());
            Ok(Some(transition))
        }
        Command::Status { reply } => {
            if reply.send(store.state().clone()).is_err() {
                debug!("status requester went away");
            }
            Ok(None)
        }
        // Handled by the loop before dispatch.
        Command::Shutdown => Ok(None),
    }
}

fn respond(reply: Option<oneshot::Sender<Transition>>, transition: Transition) {
    if let Some(reply) = reply {
        if reply.send(transition).is_err() {
            debug!("command requester went away");
        }
    }
}

/// Sleep until the play session ends; never completes when none is running.
async fn play_timer(ends_at: Option<i64>, now: i64) {
    match ends_at {
        Some(end) => {
            let remaining = u64::try_from(end.saturating_sub(now)).unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(remaining)).await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn persist<S: KeyValueStore>(
    repository: &mut PetRepository<S>,
    state: &PetState,
    summary: &mut RunSummary,
) {
    if let Err(e) = repository.save(state) {
        summary.failed_saves = summary.failed_saves.saturating_add(1);
        warn!(error = %e, "failed to save pet, will retry on next change");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::arithmetic_side_effects)]
mod tests {
    use hatchling_pet::{ActionOutcome, PetRules};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::clock::ManualClock;
    use crate::persistence::{MemoryStore, PersistError};

    const T0: i64 = 1_700_000_000_000;
    const MINUTE: u64 = 60_000;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, PersistError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
            Err(std::io::Error::other("disk full").into())
        }
        fn remove(&mut self, _key: &str) -> Result<(), PersistError> {
            Ok(())
        }
    }

    async fn request_status(tx: &mpsc::Sender<Command>) -> PetState {
        let (reply, rx) = oneshot::channel();
        tx.send(Command::Status { reply }).await.unwrap();
        rx.await.unwrap()
    }

    async fn dispatch(tx: &mpsc::Sender<Command>, action: PetAction) -> Transition {
        let (reply, rx) = oneshot::channel();
        tx.send(Command::Dispatch {
            action,
            reply: Some(reply),
        })
        .await
        .unwrap();
        rx.await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_apply_decay_and_persist() {
        let clock = ManualClock::new(T0);
        let mut store = PetStore::new(PetRules::default(), T0);
        let mut repository = PetRepository::new(MemoryStore::new(), "pet-storage");
        let mut rng = SmallRng::seed_from_u64(1);
        let (tx, mut rx) = mpsc::channel(8);

        let driver = async {
            let fed = dispatch(&tx, PetAction::Feed).await;
            assert_eq!(fed.outcome, Some(ActionOutcome::Applied));

            clock.advance(i64::try_from(10 * MINUTE).unwrap());
            tokio::time::sleep(Duration::from_millis(MINUTE + 1_000)).await;

            let pet = request_status(&tx).await;
            assert!((pet.vitals.hunger - (70.0 - 10.0 * 0.97)).abs() < 1e-9);
            drop(tx);
        };

        let (summary, ()) = tokio::join!(
            run_pet_loop(&mut store, &mut repository, &clock, &mut rng, MINUTE, &mut rx),
            driver
        );
        let summary = summary.unwrap();
        assert_eq!(summary.reason, StopReason::ChannelClosed);
        assert!(summary.ticks >= 2);
        assert_eq!(summary.failed_saves, 0);

        let saved = repository.load(&PetRules::default(), T0).unwrap().unwrap();
        assert_eq!(&saved, store.state());
    }

    #[tokio::test(start_paused = true)]
    async fn play_session_ends_on_its_own() {
        let clock = ManualClock::new(T0);
        let mut store = PetStore::new(PetRules::default(), T0);
        let mut repository = PetRepository::new(MemoryStore::new(), "pet-storage");
        let mut rng = SmallRng::seed_from_u64(2);
        let (tx, mut rx) = mpsc::channel(8);

        let driver = async {
            let _ = dispatch(&tx, PetAction::Play).await;
            assert!(request_status(&tx).await.is_playing);
            tokio::time::sleep(Duration::from_millis(4_000)).await;
            assert!(!request_status(&tx).await.is_playing);
            tx.send(Command::Shutdown).await.unwrap();
        };

        let (summary, ()) = tokio::join!(
            run_pet_loop(&mut store, &mut repository, &clock, &mut rng, MINUTE, &mut rx),
            driver
        );
        assert_eq!(summary.unwrap().reason, StopReason::Shutdown);
    }

    #[tokio::test(start_paused = true)]
    async fn hatch_replaces_the_pet() {
        let clock = ManualClock::new(T0);
        let mut store = PetStore::new(PetRules::default(), T0);
        let mut repository = PetRepository::new(MemoryStore::new(), "pet-storage");
        let mut rng = SmallRng::seed_from_u64(3);
        let (tx, mut rx) = mpsc::channel(8);

        let driver = async {
            let _ = dispatch(&tx, PetAction::Clean).await;
            let (reply, done) = oneshot::channel();
            tx.send(Command::Hatch {
                name: Some(String::from("Nori")),
                species: None,
                reply: Some(reply),
            })
            .await
            .unwrap();
            let _ = done.await.unwrap();
            tx.send(Command::Shutdown).await.unwrap();
        };

        let (summary, ()) = tokio::join!(
            run_pet_loop(&mut store, &mut repository, &clock, &mut rng, MINUTE, &mut rx),
            driver
        );
        assert_eq!(summary.unwrap().commands, 2);
        let saved = repository.load(&PetRules::default(), T0).unwrap().unwrap();
        assert_eq!(saved.name, "Nori");
        assert_eq!(saved.experience, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_saves_do_not_stop_the_loop() {
        let clock = ManualClock::new(T0);
        let mut store = PetStore::new(PetRules::default(), T0);
        let mut repository = PetRepository::new(BrokenStore, "pet-storage");
        let mut rng = SmallRng::seed_from_u64(4);
        let (tx, mut rx) = mpsc::channel(8);

        let driver = async {
            let _ = dispatch(&tx, PetAction::Feed).await;
            let second = dispatch(&tx, PetAction::Feed).await;
            assert_eq!(second.outcome, Some(ActionOutcome::Applied));
            drop(tx);
        };

        let (summary, ()) = tokio::join!(
            run_pet_loop(&mut store, &mut repository, &clock, &mut rng, MINUTE, &mut rx),
            driver
        );
        let summary = summary.unwrap();
        assert!(summary.failed_saves >= 2);
        // initialize, feed, achievement, feed
        assert_eq!(store.state().actions.len(), 4);
    }
}
