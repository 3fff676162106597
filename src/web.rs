//! Browser bindings for the dashboard (wasm32 only).
//!
//! JS owns the frame loop: it calls `tick()` from `requestAnimationFrame` and
//! reads the serialized views back. Network calls stay on the JS side; after a
//! successful toggle it hands the re-fetched goal to `loadGoalJson` and calls
//! `advance()`.

use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::animator::Clock;
use crate::config::{AdventureConfig, DEFAULT_VIEWPORT};
use crate::engine::GoalAdventure;
use crate::error::Error;
use crate::goal::{Goal, TaskType};
use crate::layout::Viewport;

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Inner size of the browser window, if there is one.
pub fn window_viewport() -> Option<Viewport> {
    let win = window()?;
    let width = win.inner_width().ok()?.as_f64()?;
    let height = win.inner_height().ok()?.as_f64()?;
    Some(Viewport { width, height })
}

/// `performance.now()` of the current window; 0 in a worker without one.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_ms(&self) -> f64 {
        performance_now()
    }
}

fn js_err(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(js_name = starRating)]
pub fn star_rating_js(completed: u32, total: u32) -> u8 {
    crate::tracker::star_rating(completed as usize, total as usize)
}

#[wasm_bindgen]
pub struct WebAdventure {
    inner: GoalAdventure,
}

#[wasm_bindgen]
impl WebAdventure {
    /// `config_json` may be omitted for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebAdventure, JsValue> {
        let config = match config_json {
            Some(json) => AdventureConfig::from_json(&json).map_err(js_err)?,
            None => AdventureConfig::default(),
        };
        let viewport = window_viewport().unwrap_or(DEFAULT_VIEWPORT);
        let inner = GoalAdventure::with_viewport(config, viewport).map_err(js_err)?;
        Ok(WebAdventure { inner })
    }

    #[wasm_bindgen(js_name = loadGoalJson)]
    pub fn load_goal_json(&mut self, json: &str) -> Result<(), JsValue> {
        let goal = Goal::from_json(json).map_err(js_err)?;
        self.inner.load_goal(Some(goal), performance_now());
        Ok(())
    }

    #[wasm_bindgen(js_name = clearGoal)]
    pub fn clear_goal(&mut self) {
        self.inner.load_goal(None, performance_now());
    }

    /// Re-reads the window size (call from a resize listener).
    pub fn resize(&mut self) {
        if let Some(viewport) = window_viewport() {
            self.inner.set_viewport(viewport);
        }
    }

    /// Returns true when the agent moved and a redraw is due.
    pub fn tick(&mut self) -> bool {
        self.inner.tick(performance_now())
    }

    pub fn advance(&mut self) -> bool {
        self.inner.advance(performance_now())
    }

    #[wasm_bindgen(js_name = isUnlocked)]
    pub fn is_unlocked(&self, index: usize) -> bool {
        self.inner.is_unlocked(index)
    }

    #[wasm_bindgen(js_name = starRating)]
    pub fn star_rating(&self, task_type: &str, group_index: usize) -> Result<u8, JsValue> {
        let task_type: TaskType = task_type.parse().map_err(js_err)?;
        Ok(self.inner.star_rating(task_type, group_index))
    }

    #[wasm_bindgen(js_name = shouldCelebrate)]
    pub fn should_celebrate(&self) -> bool {
        self.inner.should_celebrate()
    }

    #[wasm_bindgen(js_name = pathSvg)]
    pub fn path_svg(&self) -> String {
        self.inner.path().to_svg()
    }

    #[wasm_bindgen(js_name = agentJson)]
    pub fn agent_json(&self) -> Result<String, JsValue> {
        to_json(self.inner.agent_state())
    }

    #[wasm_bindgen(js_name = levelViewsJson)]
    pub fn level_views_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.level_views())
    }

    #[wasm_bindgen(js_name = progressJson)]
    pub fn progress_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.overall_progress())
    }

    #[wasm_bindgen(js_name = taskStatesJson)]
    pub fn task_states_json(&self) -> Result<String, JsValue> {
        to_json(self.inner.task_states())
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| js_err(e.into()))
}
