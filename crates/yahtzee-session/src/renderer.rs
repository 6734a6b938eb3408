//! The dice renderer boundary.
//!
//! The session never produces face values itself. It issues a
//! [`RollRequest`] and later receives a [`RollOutcome`] carrying the same
//! request id. A renderer may need time to start up and may fail; both are
//! reported through [`RendererEvent`].
//!
//! Two renderers ship with the crate: [`RandomRenderer`] rolls with a seeded
//! RNG and can simulate latency, [`ScriptedRenderer`] replays fixed faces.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use yahtzee_core::dice::{DICE_PER_ROLL, FACES};
use yahtzee_core::{Die, DieId};

/// Correlates a roll request with its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// What the renderer is asked to roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollKind {
    /// Clear the tray and roll five new dice.
    Fresh,
    /// Remove and reroll only these dice.
    Reroll {
        /// Ids of the unlocked dice to replace.
        replace: Vec<DieId>,
    },
}

/// A request sent to the dice renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    /// Correlation id.
    pub id: RequestId,
    /// Fresh roll or partial reroll.
    pub kind: RollKind,
}

impl RollRequest {
    /// How many dice the renderer must return.
    pub fn dice_needed(&self) -> usize {
        match &self.kind {
            RollKind::Fresh => DICE_PER_ROLL,
            RollKind::Reroll { replace } => replace.len(),
        }
    }
}

/// Newly rolled dice for a request. Holds only the dice that were rolled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The request this answers.
    pub request: RequestId,
    /// The new dice.
    pub dice: Vec<Die>,
}

/// Renderer readiness as tracked by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RendererStatus {
    /// Still loading; rolls are refused.
    #[default]
    Initializing,
    /// Accepting rolls.
    Ready,
    /// Failed with a message; rolls are refused until it reports ready.
    Failed(String),
}

impl RendererStatus {
    /// Whether rolls can be requested.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The failure message, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Something the renderer reports back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RendererEvent {
    /// Finished initializing (or recovered).
    Ready,
    /// Initialization or a roll failed.
    Failed(String),
    /// A requested roll landed.
    Rolled(RollOutcome),
}

/// A source of dice rolls.
///
/// `submit` never blocks; results are picked up by calling `poll` until it
/// returns `None`. Each `poll` call is one tick of renderer time.
pub trait DiceRenderer {
    /// Queue a roll.
    fn submit(&mut self, request: RollRequest);

    /// Advance one tick and return the next event, if one is due.
    fn poll(&mut self) -> Option<RendererEvent>;
}

/// A scheduled event and the ticks left until it fires.
#[derive(Debug)]
struct Scheduled {
    ticks: u32,
    event: RendererEvent,
}

#[derive(Debug, Default)]
struct Schedule {
    queue: VecDeque<Scheduled>,
}

impl Schedule {
    fn push(&mut self, ticks: u32, event: RendererEvent) {
        self.queue.push_back(Scheduled { ticks, event });
    }

    /// Events fire in submission order, each after its own delay.
    fn tick(&mut self) -> Option<RendererEvent> {
        let head = self.queue.front_mut()?;
        if head.ticks > 0 {
            head.ticks -= 1;
            return None;
        }
        self.queue.pop_front().map(|s| s.event)
    }
}

/// Rolls fair dice from a seeded RNG.
///
/// Every rolled die gets a fresh id, mirroring a renderer that removes the
/// old dice from the tray before rolling replacements.
#[derive(Debug)]
pub struct RandomRenderer {
    rng: StdRng,
    latency: u32,
    next_id: u32,
    schedule: Schedule,
}

impl RandomRenderer {
    /// Create a renderer that is ready immediately and rolls instantly.
    pub fn new(seed: u64) -> Self {
        Self::with_latency(seed, 0, 0)
    }

    /// Create a renderer that becomes ready after `startup` ticks and takes
    /// `latency` ticks per roll.
    pub fn with_latency(seed: u64, startup: u32, latency: u32) -> Self {
        let mut schedule = Schedule::default();
        schedule.push(startup, RendererEvent::Ready);
        Self {
            rng: StdRng::seed_from_u64(seed),
            latency,
            next_id: 1,
            schedule,
        }
    }

    fn roll_die(&mut self) -> Die {
        let id = DieId(self.next_id);
        self.next_id += 1;
        Die {
            id,
            value: self.rng.random_range(1..=FACES),
        }
    }
}

impl DiceRenderer for RandomRenderer {
    fn submit(&mut self, request: RollRequest) {
        let dice = (0..request.dice_needed()).map(|_| self.roll_die()).collect();
        let outcome = RollOutcome {
            request: request.id,
            dice,
        };
        self.schedule.push(self.latency, RendererEvent::Rolled(outcome));
    }

    fn poll(&mut self) -> Option<RendererEvent> {
        self.schedule.tick()
    }
}

/// Replays pre-set faces, one queued hand per request.
///
/// A reroll of `n` dice takes the first `n` faces of the next hand. When the
/// script runs dry the renderer reports a failure.
#[derive(Debug)]
pub struct ScriptedRenderer {
    hands: VecDeque<Vec<u8>>,
    next_id: u32,
    schedule: Schedule,
}

impl ScriptedRenderer {
    /// Create a ready renderer that will replay `hands` in order.
    pub fn new<I>(hands: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let mut schedule = Schedule::default();
        schedule.push(0, RendererEvent::Ready);
        Self {
            hands: hands.into_iter().collect(),
            next_id: 1,
            schedule,
        }
    }

    /// Create a renderer whose initialization fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let mut schedule = Schedule::default();
        schedule.push(0, RendererEvent::Failed(message.into()));
        Self {
            hands: VecDeque::new(),
            next_id: 1,
            schedule,
        }
    }

    /// Queue another hand.
    pub fn push_hand(&mut self, faces: Vec<u8>) {
        self.hands.push_back(faces);
    }

    /// Queue a recovery signal.
    pub fn recover(&mut self) {
        self.schedule.push(0, RendererEvent::Ready);
    }

    /// Hands not yet consumed.
    pub fn remaining(&self) -> usize {
        self.hands.len()
    }
}

impl DiceRenderer for ScriptedRenderer {
    fn submit(&mut self, request: RollRequest) {
        let Some(hand) = self.hands.pop_front() else {
            self.schedule.push(0, RendererEvent::Failed("dice script exhausted".to_string()));
            return;
        };
        let dice = hand
            .into_iter()
            .take(request.dice_needed())
            .map(|value| {
                let id = DieId(self.next_id);
                self.next_id += 1;
                Die { id, value }
            })
            .collect();
        self.schedule.push(
            0,
            RendererEvent::Rolled(RollOutcome {
                request: request.id,
                dice,
            }),
        );
    }

    fn poll(&mut self) -> Option<RendererEvent> {
        self.schedule.tick()
    }
}
