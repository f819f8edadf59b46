//! O Caso Maloney — pure game logic (no rendering / IO).
//!
//! The rule functions ([`resolve_inspection`], [`judge`], [`reset`] and
//! [`can_transition`](super::graph::can_transition)) only look at
//! [`Progress`]. The `request_*` operations wrap them for the view: they apply
//! the decision to [`DetectiveState`], queue modal/toast output and emit a
//! trace record.

use serde::Serialize;

use super::error::{ActionError, Denial, Verdict};
use super::graph::{can_transition, edges_from, Guard};
use super::state::{
    clue_info, clues_in, Clue, ClueKind, DetectiveState, PendingRedirect, Progress, Scene,
    CULPRIT, NARRATIVE_START, REDIRECT_DELAY_TICKS,
};
use super::trace::{emit, TraceEvent};

// ── Inspection ───────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    KeyAcquired,
    DocumentAcquired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inspection {
    pub clue: &'static Clue,
    pub first_time: bool,
    /// `(title, text)` for the modal; `None` when the result is a redirect.
    pub display: Option<(&'static str, &'static str)>,
    pub effects: Vec<Effect>,
    pub auto_navigate: Option<Scene>,
}

/// Inspect a clue, collecting it the first time.
///
/// Unknown ids leave `progress` untouched. Re-inspecting a collected clue never
/// re-fires its effects; re-inspecting the newspaper once it has been read
/// sends the player back to the newspaper pages instead of the object text.
pub fn resolve_inspection(clue_id: &str, progress: &mut Progress) -> Result<Inspection, ActionError> {
    let clue = clue_info(clue_id).ok_or_else(|| ActionError::UnknownClue(clue_id.to_string()))?;

    if progress.has_clue(clue.id) {
        if clue.grants_final_document && progress.has_final_document {
            return Ok(Inspection {
                clue,
                first_time: false,
                display: None,
                effects: Vec::new(),
                auto_navigate: Some(NARRATIVE_START),
            });
        }
        return Ok(Inspection {
            clue,
            first_time: false,
            display: Some((clue.title, clue.text)),
            effects: Vec::new(),
            auto_navigate: None,
        });
    }

    progress.clues.push(clue.id);
    let mut effects = Vec::new();
    let mut auto_navigate = None;

    if clue.grants_key {
        progress.has_key = true;
        effects.push(Effect::KeyAcquired);
    }
    if clue.grants_final_document {
        progress.has_final_document = true;
        effects.push(Effect::DocumentAcquired);
        auto_navigate = Some(NARRATIVE_START);
    } else if clue.is_final {
        progress.has_final_document = true;
    }

    let display = match auto_navigate {
        Some(_) => None,
        None => Some((clue.title, clue.text)),
    };

    Ok(Inspection {
        clue,
        first_time: true,
        display,
        effects,
        auto_navigate,
    })
}

// ── Accusation ───────────────────────────────────────────────

pub fn judge(suspect: Option<&str>, progress: &Progress) -> Verdict {
    match suspect {
        None => Verdict::NoSuspectChosen,
        Some(_) if !progress.has_final_document => Verdict::DocumentNotFound,
        Some(name) if name == CULPRIT => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}

// ── Reset ────────────────────────────────────────────────────

pub fn reset() -> Progress {
    Progress::new()
}

// ── Scene choices ────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceKind {
    Inspect(&'static str),
    Go(Scene),
}

#[derive(Clone, Debug)]
pub struct Choice {
    pub label: String,
    pub kind: ChoiceKind,
    /// False when the action would currently be refused (drawn dimmed).
    pub available: bool,
}

/// Hotspots then doors of the current scene, in display order.
pub fn scene_choices(progress: &Progress) -> Vec<Choice> {
    let scene = progress.scene();
    let mut choices: Vec<Choice> = clues_in(scene)
        .map(|clue| {
            let label = if progress.has_clue(clue.id) {
                format!("{} (visto)", clue.hotspot)
            } else {
                clue.hotspot.to_string()
            };
            Choice {
                label,
                kind: ChoiceKind::Inspect(clue.id),
                available: true,
            }
        })
        .collect();

    for edge in edges_from(scene) {
        let label = match edge.guard {
            Some(Guard::HasKey) if progress.has_key() => format!("{} (destrancada)", edge.label),
            Some(Guard::HasKey) => format!("{} (trancada)", edge.label),
            _ => edge.label.to_string(),
        };
        choices.push(Choice {
            label,
            kind: ChoiceKind::Go(edge.to),
            available: can_transition(scene, edge.to, progress).is_ok(),
        });
    }
    choices
}

/// Run the `index`-th choice of the current scene.
pub fn execute_choice(state: &mut DetectiveState, index: usize) -> bool {
    let choices = scene_choices(&state.progress);
    let Some(choice) = choices.get(index) else {
        return false;
    };
    match choice.kind {
        ChoiceKind::Inspect(id) => {
            let _ = request_inspect(state, id);
        }
        ChoiceKind::Go(scene) => {
            let _ = request_navigate(state, scene.index());
        }
    }
    true
}

// ── Controller operations ────────────────────────────────────

/// Move to `target_index` if the scene graph allows it.
///
/// A refused move only raises a toast with the reason.
pub fn request_navigate(state: &mut DetectiveState, target_index: usize) -> Result<Scene, ActionError> {
    let from = state.progress.scene;
    let decision = Scene::from_index(target_index)
        .ok_or(Denial::NoPath)
        .and_then(|target| can_transition(from, target, &state.progress).map(|()| target));

    match decision {
        Ok(target) => {
            enter_scene(state, target);
            if from != target {
                state.pending_redirect = None;
                emit(&TraceEvent::Navigate { from, to: target });
            }
            Ok(target)
        }
        Err(reason) => {
            state.flash(reason.message());
            emit(&TraceEvent::NavigateDenied {
                from,
                target: target_index,
                reason,
            });
            Err(ActionError::InvalidTransition(reason))
        }
    }
}

fn enter_scene(state: &mut DetectiveState, target: Scene) {
    if state.progress.scene == target {
        return;
    }
    state.progress.scene = target;
    state.add_log(&format!("Estás em: {}", target.name()), false);
}

pub fn request_inspect(state: &mut DetectiveState, clue_id: &str) -> Result<Inspection, ActionError> {
    let inspection = match resolve_inspection(clue_id, &mut state.progress) {
        Ok(inspection) => inspection,
        Err(err) => {
            emit(&TraceEvent::UnknownClue { clue: clue_id });
            return Err(err);
        }
    };
    emit(&TraceEvent::Inspect {
        clue: inspection.clue.id,
        first_time: inspection.first_time,
    });

    if inspection.first_time {
        let text = format!(
            "Pista recolhida: {} — {}",
            inspection.clue.title,
            inspection.clue.kind.label()
        );
        state.add_log(&text, inspection.clue.kind == ClueKind::Real);
    }
    for effect in &inspection.effects {
        match effect {
            Effect::KeyAcquired => {
                state.flash("Recolheste a chave!");
                state.add_log("Tens a chave do quarto.", true);
            }
            Effect::DocumentAcquired => {
                state.flash("Encontraste o jornal!");
                state.add_log("Encontraste o jornal.", true);
            }
        }
    }
    if let Some((title, text)) = inspection.display {
        state.show_modal(title, text);
    }
    if let Some(target) = inspection.auto_navigate {
        if inspection.first_time {
            state.pending_redirect = Some(PendingRedirect {
                target,
                ticks_left: REDIRECT_DELAY_TICKS,
            });
        } else {
            follow_redirect(state, target);
        }
    }
    Ok(inspection)
}

pub fn select_suspect(state: &mut DetectiveState, name: &str) {
    state.progress.suspect = Some(name.to_string());
    emit(&TraceEvent::SelectSuspect { name });
}

/// Judge the selected suspect and show the verdict.
///
/// Only `Correct` / `Incorrect` are `Ok`; the other verdicts mean the
/// accusation could not be made yet.
pub fn submit_accusation(state: &mut DetectiveState) -> Result<Verdict, ActionError> {
    let verdict = judge(state.progress.suspect(), &state.progress);
    emit(&TraceEvent::Accusation {
        suspect: state.progress.suspect(),
        verdict,
    });
    state.show_modal(verdict.title(), verdict.message());

    match verdict {
        Verdict::Correct => {
            if !state.case_closed {
                state.case_closed = true;
                state.add_log("Caso encerrado.", true);
            }
            Ok(verdict)
        }
        Verdict::Incorrect => {
            state.add_log("A acusação não convenceu ninguém.", false);
            Ok(verdict)
        }
        Verdict::NoSuspectChosen | Verdict::DocumentNotFound => {
            Err(ActionError::InvalidAccusationState(verdict))
        }
    }
}

pub fn reset_game(state: &mut DetectiveState) {
    state.progress = reset();
    state.modal = None;
    state.toast = None;
    state.pending_redirect = None;
    state.case_closed = false;
    state.add_log("O caso foi reaberto desde o início.", true);
    emit(&TraceEvent::Reset);
}

// ── Tick ─────────────────────────────────────────────────────

/// Count down the toast and any pending redirect.
pub fn tick(state: &mut DetectiveState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }

    if let Some(toast) = &mut state.toast {
        toast.ticks_left = toast.ticks_left.saturating_sub(delta_ticks);
        if toast.ticks_left == 0 {
            state.toast = None;
        }
    }

    if let Some(redirect) = state.pending_redirect {
        if redirect.ticks_left <= delta_ticks {
            follow_redirect(state, redirect.target);
        } else {
            state.pending_redirect = Some(PendingRedirect {
                ticks_left: redirect.ticks_left - delta_ticks,
                ..redirect
            });
        }
    }
}

/// Story-driven move. Still checked against the graph; a redirect that is no
/// longer legal from where the player now stands is dropped.
///
/// Consumes any pending redirect and leaves an open modal alone.
fn follow_redirect(state: &mut DetectiveState, target: Scene) {
    state.pending_redirect = None;
    let from = state.progress.scene;
    match can_transition(from, target, &state.progress) {
        Ok(()) => {
            enter_scene(state, target);
            emit(&TraceEvent::Redirect { to: target });
        }
        Err(reason) => {
            emit(&TraceEvent::RedirectDropped {
                from,
                to: target,
                reason,
            });
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::detective::state::CLUES;
    use proptest::prelude::*;

    fn arb_clue_id() -> impl Strategy<Value = &'static str> {
        (0..CLUES.len()).prop_map(|i| CLUES[i].id)
    }

    proptest! {
        #[test]
        fn prop_unknown_ids_never_mutate(
            seen in proptest::collection::vec(arb_clue_id(), 0..6),
            id in "[a-z]{1,12}",
        ) {
            prop_assume!(clue_info(&id).is_none());
            let mut p = Progress::new();
            for known in &seen {
                resolve_inspection(known, &mut p).unwrap();
            }
            let before = p.clone();
            prop_assert!(resolve_inspection(&id, &mut p).is_err());
            prop_assert_eq!(p, before);
        }

        #[test]
        fn prop_flags_track_collected_clues(
            ids in proptest::collection::vec(arb_clue_id(), 0..20),
        ) {
            let mut p = Progress::new();
            for id in &ids {
                resolve_inspection(id, &mut p).unwrap();
            }
            let collected: Vec<&Clue> = p.clues().iter().filter_map(|id| clue_info(id)).collect();
            prop_assert_eq!(p.has_key(), collected.iter().any(|c| c.grants_key));
            prop_assert_eq!(
                p.has_final_document(),
                collected.iter().any(|c| c.grants_final_document || c.is_final)
            );
        }

        #[test]
        fn prop_collected_set_grows_without_duplicates(
            ids in proptest::collection::vec(arb_clue_id(), 0..20),
        ) {
            let mut p = Progress::new();
            let mut prev_len = 0;
            for id in &ids {
                resolve_inspection(id, &mut p).unwrap();
                prop_assert!(p.clues().len() >= prev_len);
                prop_assert!(p.has_clue(id));
                prev_len = p.clues().len();
            }
            let mut sorted = p.clues().to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), p.clues().len());
        }

        #[test]
        fn prop_second_inspection_has_no_effects(id in arb_clue_id()) {
            let mut p = Progress::new();
            resolve_inspection(id, &mut p).unwrap();
            let snapshot = p.clone();
            let again = resolve_inspection(id, &mut p).unwrap();
            prop_assert!(!again.first_time);
            prop_assert!(again.effects.is_empty());
            prop_assert_eq!(p, snapshot);
        }
    }
}
