//! The monthly commission goal: validation, persistence, progress and the
//! dashboard widget for setting it.

mod domain;
mod endpoint;
mod store;
mod tracker;

pub use domain::{CommissionGoal, get_progress};
pub use endpoint::{clear_goal_endpoint, goal_widget, set_goal_endpoint};
pub use store::{GoalStore, SQLiteGoalStore, create_setting_table};
pub use tracker::GoalTracker;
