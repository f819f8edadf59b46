//! Structured trace records written to the browser console.
//!
//! One JSON object per player action. Outside wasm the records are built and
//! dropped so native test runs stay quiet.

use serde::Serialize;

use super::error::{Denial, Verdict};
use super::state::Scene;

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent<'a> {
    Navigate { from: Scene, to: Scene },
    NavigateDenied { from: Scene, target: usize, reason: Denial },
    Redirect { to: Scene },
    RedirectDropped { from: Scene, to: Scene, reason: Denial },
    Inspect { clue: &'a str, first_time: bool },
    UnknownClue { clue: &'a str },
    SelectSuspect { name: &'a str },
    Accusation { suspect: Option<&'a str>, verdict: Verdict },
    Reset,
}

impl TraceEvent<'_> {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn is_warning(&self) -> bool {
        matches!(
            self,
            TraceEvent::NavigateDenied { .. }
                | TraceEvent::RedirectDropped { .. }
                | TraceEvent::UnknownClue { .. }
        )
    }
}

pub fn to_json(event: &TraceEvent) -> String {
    serde_json::to_string(event)
        .unwrap_or_else(|e| format!("{{\"event\":\"unserializable\",\"error\":\"{e}\"}}"))
}

#[cfg(target_arch = "wasm32")]
pub fn emit(event: &TraceEvent) {
    let line = format!("O Caso Maloney: {}", to_json(event));
    if event.is_warning() {
        web_sys::console::warn_1(&line.into());
    } else {
        web_sys::console::log_1(&line.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit(_event: &TraceEvent) {}
