use std::sync::{Arc, RwLock};

use crate::{
    Error,
    goal::{CommissionGoal, GoalStore, get_progress},
};

/// Holds the current commission goal and writes changes through to a [GoalStore].
#[derive(Debug, Clone)]
pub struct GoalTracker {
    store: Arc<dyn GoalStore>,
    goal: Arc<RwLock<Option<CommissionGoal>>>,
}

impl GoalTracker {
    /// Load the saved goal from `store`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(store: Arc<dyn GoalStore>) -> Result<Self, Error> {
        let goal = store.load()?;

        match goal {
            Some(goal) => tracing::info!("loaded commission goal of {goal}"),
            None => tracing::info!("no commission goal has been set"),
        }

        Ok(Self {
            store,
            goal: Arc::new(RwLock::new(goal)),
        })
    }

    /// The current goal, if one has been set.
    pub fn goal(&self) -> Option<CommissionGoal> {
        match self.goal.read() {
            Ok(goal) => *goal,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Save a new goal.
    ///
    /// # Errors
    /// Returns [Error::InvalidGoal] if `value` is not a finite, positive number,
    /// or a store error if the goal could not be saved. The current goal is
    /// left unchanged on error.
    pub fn set_goal(&self, value: f64) -> Result<CommissionGoal, Error> {
        let goal = CommissionGoal::new(value)?;
        self.replace(Some(goal))?;

        Ok(goal)
    }

    /// Remove the current goal.
    pub fn clear_goal(&self) -> Result<(), Error> {
        self.replace(None)
    }

    /// The percentage of the goal reached by `current_total`, or `None` if
    /// no goal has been set.
    pub fn progress(&self, current_total: f64) -> Option<f64> {
        self.goal()
            .map(|goal| get_progress(current_total, goal.value()))
    }

    fn replace(&self, goal: Option<CommissionGoal>) -> Result<(), Error> {
        self.store
            .save(goal)
            .inspect_err(|error| tracing::error!("could not save commission goal: {error}"))?;

        match self.goal.write() {
            Ok(mut current) => *current = goal,
            Err(poisoned) => *poisoned.into_inner() = goal,
        }

        Ok(())
    }
}
