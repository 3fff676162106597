//! Goal Adventure core crate.
//!
//! Turns a goal's daily / weekly / monthly task groups into levels on a winding
//! path: snake-grid layout with a smoothed curve, per-group star ratings,
//! single-predecessor unlock gating, and a generation-counted animator that walks
//! the avatar to its earned level. `TaskActionCoordinator` ties status toggles to
//! the persistence layer; `web::WebAdventure` is the browser surface.

use wasm_bindgen::prelude::*;

pub mod animator;
pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod gate;
pub mod goal;
pub mod layout;
pub mod level;
pub mod tracker;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animator::{AgentState, Animator, Clock};
pub use config::AdventureConfig;
pub use coordinator::{
    GoalProvider, Notification, NotificationSink, StatusUpdate, TaskActionCoordinator,
    TaskStatusMutator, UpdateOutcome, UserContext,
};
pub use engine::{DerivedState, GoalAdventure, LevelView};
pub use error::{Error, Result};
pub use gate::{OverallProgress, is_level_unlocked, overall_progress};
pub use goal::{Goal, TaskGroup, TaskType};
pub use layout::{PathPosition, SmoothPath, Viewport};
pub use level::{Level, build_levels};
pub use tracker::{CompletionCount, TaskStateMap, star_rating};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
