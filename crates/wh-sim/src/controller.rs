//! The `Controller` trait — whatever chooses the robots' actions.
//!
//! The simulator only defines dynamics; learning agents, scripted planners,
//! and test harnesses all plug in here.

use wh_core::SimRng;

use crate::{ACTION_COUNT, Action, Warehouse};

/// Chooses one action per robot for the coming tick.
///
/// Returning fewer actions than there are robots leaves the rest idle;
/// extra actions are ignored.
pub trait Controller {
    fn actions(&mut self, warehouse: &Warehouse) -> Vec<Action>;
}

/// A controller that never issues an action.
pub struct IdleController;

impl Controller for IdleController {
    fn actions(&mut self, _warehouse: &Warehouse) -> Vec<Action> {
        vec![]
    }
}

/// Uniformly random actions from a seeded RNG.
pub struct RandomController {
    rng: SimRng,
}

impl RandomController {
    pub fn new(seed: u64) -> Self {
        Self { rng: SimRng::new(seed) }
    }
}

impl Controller for RandomController {
    fn actions(&mut self, warehouse: &Warehouse) -> Vec<Action> {
        (0..warehouse.robots().len())
            .map(|_| Action::ALL[self.rng.gen_range(0..ACTION_COUNT)])
            .collect()
    }
}

/// Replays a fixed sequence of action vectors, then goes idle.
pub struct ScriptedController {
    script: std::vec::IntoIter<Vec<Action>>,
}

impl ScriptedController {
    pub fn new(script: Vec<Vec<Action>>) -> Self {
        Self { script: script.into_iter() }
    }
}

impl Controller for ScriptedController {
    fn actions(&mut self, _warehouse: &Warehouse) -> Vec<Action> {
        self.script.next().unwrap_or_default()
    }
}
