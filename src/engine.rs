//! Adventure facade: the derived state of one loaded goal plus the avatar.
//!
//! Derived state (levels, task map, path) is always rebuilt into a fresh
//! `DerivedState` and swapped in whole, so readers never see a half-built map.
//! Recomputation is explicit: callers hand every new goal document to
//! [`GoalAdventure::load_goal`].

use serde::Serialize;
use tracing::{debug, info};

use crate::animator::{AgentState, Animator};
use crate::config::{AdventureConfig, DEFAULT_VIEWPORT};
use crate::error::Result;
use crate::gate::{OverallProgress, is_level_unlocked, overall_progress};
use crate::goal::{Goal, TaskType};
use crate::layout::{
    GridSpec, Jitter, PathPosition, SmoothPath, Viewport, generate_grid_positions,
    smooth_path,
};
use crate::level::{Level, build_levels, completed_levels};
use crate::tracker::{CompletionCount, TaskStateMap};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedState {
    pub goal: Option<Goal>,
    pub levels: Vec<Level>,
    pub task_states: TaskStateMap,
    pub positions: Vec<PathPosition>,
    pub path: SmoothPath,
}

/// One row per level, everything the presentation layer needs to draw it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub index: usize,
    pub label: String,
    pub source_type: TaskType,
    pub source_index: usize,
    pub status: bool,
    pub unlocked: bool,
    pub stars: u8,
    pub completion: CompletionCount,
    pub position: Option<PathPosition>,
    pub is_current: bool,
}

pub struct GoalAdventure {
    config: AdventureConfig,
    viewport: Viewport,
    state: DerivedState,
    animator: Animator,
    jitter: Box<dyn Jitter + Send>,
    initial_animation_complete: bool,
}

impl GoalAdventure {
    pub fn new(config: AdventureConfig) -> Result<Self> {
        Self::with_viewport(config, DEFAULT_VIEWPORT)
    }

    /// `environment` is the ambient viewport; an explicit one in the config wins.
    pub fn with_viewport(config: AdventureConfig, environment: Viewport) -> Result<Self> {
        config.validate()?;
        let viewport = config.viewport_or(environment);
        let animator = Animator::new(config.timing.clone(), config.default_position);
        Ok(Self {
            viewport,
            animator,
            jitter: default_jitter(&config),
            config,
            state: DerivedState::default(),
            initial_animation_complete: false,
        })
    }

    /// Replaces the path jitter source (e.g. `ZeroJitter` for stable output).
    pub fn set_jitter(&mut self, jitter: Box<dyn Jitter + Send>) {
        self.jitter = jitter;
    }

    /// Rebuilds all derived state from `goal`. The initial replay runs the first
    /// time a goal identity is seen; re-loading the same goal (e.g. after a
    /// mutation) keeps the avatar where it is.
    pub fn load_goal(&mut self, goal: Option<Goal>, now_ms: f64) {
        let same_goal = match (&self.state.goal, &goal) {
            (Some(old), Some(new)) => old.same_identity(new),
            _ => false,
        };
        if !same_goal {
            self.initial_animation_complete = false;
        }

        let levels = build_levels(goal.as_ref());
        let task_states = TaskStateMap::initialize(goal.as_ref());
        let (positions, path) = self.layout(levels.len());
        info!(
            goal = goal.as_ref().map(|g| g.id.as_str()).unwrap_or("<none>"),
            levels = levels.len(),
            completed = completed_levels(&levels),
            "goal loaded"
        );
        let has_goal = goal.is_some();
        self.state = DerivedState {
            goal,
            levels,
            task_states,
            positions,
            path,
        };

        if !has_goal {
            self.animator.replay(0, &[], now_ms);
        } else if !self.initial_animation_complete {
            let target = completed_levels(&self.state.levels)
                .min(self.state.levels.len().saturating_sub(1));
            self.animator.replay(target, &self.state.positions, now_ms);
            self.initial_animation_complete = true;
        }
    }

    /// Forces the next `load_goal` to replay from the start of the path.
    pub fn reset_initial_animation(&mut self) {
        self.initial_animation_complete = false;
    }

    /// New ambient viewport; regenerates the layout if it changed.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        let viewport = self.config.viewport_or(viewport);
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        let (positions, path) = self.layout(self.state.levels.len());
        self.state.positions = positions;
        self.state.path = path;
    }

    fn layout(&mut self, level_count: usize) -> (Vec<PathPosition>, SmoothPath) {
        let spec = GridSpec::for_level_count(level_count, &self.config.layout, self.viewport);
        let mut positions = generate_grid_positions(&spec);
        positions.truncate(level_count);
        let path = smooth_path(&positions, self.jitter.as_mut(), &self.config.jitter);
        debug!(level_count, viewport = ?self.viewport, "layout regenerated");
        (positions, path)
    }

    /// Mode B: hop toward the first incomplete level after a completion.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.animator.advance(
            completed_levels(&self.state.levels),
            self.state.levels.len(),
            &self.state.positions,
            now_ms,
        )
    }

    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.animator.tick(now_ms)
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.animator.next_deadline()
    }

    pub fn config(&self) -> &AdventureConfig {
        &self.config
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.state.goal.as_ref()
    }

    pub fn state(&self) -> &DerivedState {
        &self.state
    }

    pub fn levels(&self) -> &[Level] {
        &self.state.levels
    }

    pub fn path_positions(&self) -> &[PathPosition] {
        &self.state.positions
    }

    pub fn path(&self) -> &SmoothPath {
        &self.state.path
    }

    pub fn task_states(&self) -> &TaskStateMap {
        &self.state.task_states
    }

    pub fn agent_state(&self) -> &AgentState {
        self.animator.agent()
    }

    pub fn initial_animation_complete(&self) -> bool {
        self.initial_animation_complete
    }

    pub fn completion_count(&self, task_type: TaskType, group_index: usize) -> CompletionCount {
        self.state.task_states.completion_count(task_type, group_index)
    }

    pub fn is_task_completed(&self, task_type: TaskType, group_index: usize, task_index: usize) -> bool {
        self.state.task_states.is_task_completed(task_type, group_index, task_index)
    }

    pub fn star_rating(&self, task_type: TaskType, group_index: usize) -> u8 {
        self.state.task_states.star_rating(task_type, group_index)
    }

    pub fn is_unlocked(&self, index: usize) -> bool {
        is_level_unlocked(index, &self.state.levels)
    }

    pub fn overall_progress(&self) -> OverallProgress {
        overall_progress(&self.state.levels)
    }

    pub fn should_celebrate(&self) -> bool {
        self.overall_progress().should_celebrate()
    }

    pub fn level_views(&self) -> Vec<LevelView> {
        let current = self.animator.agent().current_level_index;
        self.state
            .levels
            .iter()
            .enumerate()
            .map(|(index, level)| LevelView {
                index,
                label: level.label(),
                source_type: level.source_type,
                source_index: level.source_index,
                status: level.status,
                unlocked: self.is_unlocked(index),
                stars: self.star_rating(level.source_type, level.source_index),
                completion: self.completion_count(level.source_type, level.source_index),
                position: self.state.positions.get(index).copied(),
                is_current: index == current,
            })
            .collect()
    }
}

#[cfg(feature = "rng")]
fn default_jitter(_config: &AdventureConfig) -> Box<dyn Jitter + Send> {
    Box::new(crate::layout::OsJitter)
}

#[cfg(not(feature = "rng"))]
fn default_jitter(config: &AdventureConfig) -> Box<dyn Jitter + Send> {
    Box::new(crate::layout::LcgJitter::new(config.jitter.seed))
}
