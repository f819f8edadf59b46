//! O Caso Maloney — point-and-click detective game.
//!
//! Keys: [1]-[9] hotspots and doors of the current room, [A]-[D] suspects,
//! [X] accuse, [R] start over, [0]/Esc close the open text.

pub mod actions;
pub mod error;
pub mod graph;
pub mod logic;
pub mod render;
pub mod state;
pub mod trace;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent};

use actions::*;
use state::{DetectiveState, ALL_SCENES, SUSPECTS};

pub struct DetectiveGame {
    state: DetectiveState,
}

impl DetectiveGame {
    pub fn new() -> Self {
        Self {
            state: DetectiveState::new(),
        }
    }
}

impl Game for DetectiveGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.state.modal.is_some() {
            return handle_modal_input(&mut self.state, event);
        }
        match event {
            InputEvent::Key(ch) => handle_key(&mut self.state, *ch),
            InputEvent::Click(id) => handle_click(&mut self.state, *id),
            InputEvent::Back => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }

    fn view_key(&self) -> usize {
        self.state.progress.scene().index()
    }
}

// ── Modal ───────────────────────────────────────────────────

fn handle_modal_input(state: &mut DetectiveState, event: &InputEvent) -> bool {
    let close = match event {
        InputEvent::Back => true,
        InputEvent::Key(ch) => matches!(ch, '0' | '-' | ' '),
        InputEvent::Click(MODAL_BODY) => return true,
        InputEvent::Click(id) => *id == CLOSE_MODAL,
    };
    if close {
        state.modal = None;
    }
    close
}

// ── Room ────────────────────────────────────────────────────

fn handle_key(state: &mut DetectiveState, ch: char) -> bool {
    match ch {
        '1'..='9' => {
            let idx = (ch as u32 - '1' as u32) as usize;
            logic::execute_choice(state, idx)
        }
        'a'..='d' | 'A'..='D' => {
            let idx = (ch.to_ascii_lowercase() as u32 - 'a' as u32) as usize;
            select_suspect_at(state, idx)
        }
        'x' | 'X' => {
            let _ = logic::submit_accusation(state);
            true
        }
        'r' | 'R' => {
            logic::reset_game(state);
            true
        }
        _ => false,
    }
}

fn handle_click(state: &mut DetectiveState, id: u16) -> bool {
    let scene_count = ALL_SCENES.len() as u16;
    if (NAV_BASE..NAV_BASE + scene_count).contains(&id) {
        let _ = logic::request_navigate(state, (id - NAV_BASE) as usize);
        return true;
    }
    if (CHOICE_BASE..CHOICE_BASE + 20).contains(&id) {
        return logic::execute_choice(state, (id - CHOICE_BASE) as usize);
    }
    if (SUSPECT_BASE..SUSPECT_BASE + SUSPECTS.len() as u16).contains(&id) {
        return select_suspect_at(state, (id - SUSPECT_BASE) as usize);
    }
    match id {
        SUBMIT_ACCUSATION => {
            let _ = logic::submit_accusation(state);
            true
        }
        RESET_GAME => {
            logic::reset_game(state);
            true
        }
        _ => false,
    }
}

fn select_suspect_at(state: &mut DetectiveState, idx: usize) -> bool {
    match SUSPECTS.get(idx) {
        Some(name) => {
            logic::select_suspect(state, name);
            true
        }
        None => false,
    }
}

// ── Tests ───────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use error::Verdict;
    use state::{Scene, CULPRIT, REDIRECT_DELAY_TICKS};

    fn key(g: &mut DetectiveGame, ch: char) -> bool {
        g.handle_input(&InputEvent::Key(ch))
    }

    fn click(g: &mut DetectiveGame, id: u16) -> bool {
        g.handle_input(&InputEvent::Click(id))
    }

    #[test]
    fn walk_in_with_number_keys() {
        let mut g = DetectiveGame::new();
        assert!(key(&mut g, '1')); // enter the house
        assert_eq!(g.state.progress.scene(), Scene::Hall);
        assert!(key(&mut g, '2')); // coat is [1], living room is [2]
        assert_eq!(g.state.progress.scene(), Scene::LivingRoom);
        assert_eq!(g.view_key(), Scene::LivingRoom.index());
    }

    #[test]
    fn modal_swallows_input_until_closed() {
        let mut g = DetectiveGame::new();
        key(&mut g, '1');
        key(&mut g, '1'); // inspect coat
        assert!(g.state.modal.is_some());

        // room keys are ignored while the text is open
        assert!(!key(&mut g, '2'));
        assert_eq!(g.state.progress.scene(), Scene::Hall);

        assert!(g.handle_input(&InputEvent::Back));
        assert!(g.state.modal.is_none());
        assert!(!g.handle_input(&InputEvent::Back));
    }

    #[test]
    fn modal_closes_on_click() {
        let mut g = DetectiveGame::new();
        key(&mut g, 'x');
        assert!(g.state.modal.is_some());
        assert!(!click(&mut g, NAV_BASE));
        assert!(click(&mut g, MODAL_BODY));
        assert!(g.state.modal.is_some());
        assert!(click(&mut g, CLOSE_MODAL));
        assert!(g.state.modal.is_none());
    }

    #[test]
    fn scene_bar_click_requests_navigation() {
        let mut g = DetectiveGame::new();
        assert!(click(&mut g, NAV_BASE + Scene::Hall.index() as u16));
        assert_eq!(g.state.progress.scene(), Scene::Hall);

        // consumed even when refused, the refusal is shown as a toast
        assert!(click(&mut g, NAV_BASE + Scene::Bedroom.index() as u16));
        assert_eq!(g.state.progress.scene(), Scene::Hall);
        assert!(g.state.toast.is_some());
    }

    #[test]
    fn choice_click_out_of_range() {
        let mut g = DetectiveGame::new();
        assert!(!click(&mut g, CHOICE_BASE + 5));
        assert!(click(&mut g, CHOICE_BASE));
        assert_eq!(g.state.progress.scene(), Scene::Hall);
    }

    #[test]
    fn suspects_by_key_and_click() {
        let mut g = DetectiveGame::new();
        assert!(key(&mut g, 'b'));
        assert_eq!(g.state.progress.suspect(), Some(SUSPECTS[1]));
        assert!(click(&mut g, SUSPECT_BASE));
        assert_eq!(g.state.progress.suspect(), Some(CULPRIT));
        assert!(!click(&mut g, SUSPECT_BASE + SUSPECTS.len() as u16));
        assert!(!key(&mut g, 'e'));
    }

    #[test]
    fn full_playthrough() {
        let mut g = DetectiveGame::new();
        click(&mut g, NAV_BASE + 1); // hall
        click(&mut g, NAV_BASE + 2); // living room
        click(&mut g, NAV_BASE + 3); // kitchen
        key(&mut g, '2'); // leg of lamb
        assert!(g.state.progress.has_key());
        g.handle_input(&InputEvent::Back);

        click(&mut g, NAV_BASE + 2);
        click(&mut g, NAV_BASE + 4); // bedroom
        assert_eq!(g.state.progress.scene(), Scene::Bedroom);
        key(&mut g, '1'); // newspaper
        assert!(g.state.progress.has_final_document());
        g.tick(REDIRECT_DELAY_TICKS);
        assert_eq!(g.state.progress.scene(), Scene::NewspaperFront);

        key(&mut g, '1'); // turn page
        key(&mut g, '2'); // classifieds [1], turn page [2]
        assert_eq!(g.state.progress.scene(), Scene::NewspaperBack);
        key(&mut g, '1'); // confession
        g.handle_input(&InputEvent::Back);

        key(&mut g, 'c'); // Vizinha
        key(&mut g, 'x');
        assert_eq!(
            logic::judge(g.state.progress.suspect(), &g.state.progress),
            Verdict::Incorrect
        );
        g.handle_input(&InputEvent::Back);

        key(&mut g, 'a');
        key(&mut g, 'x');
        assert!(g.state.case_closed);
    }

    #[test]
    fn reset_key() {
        let mut g = DetectiveGame::new();
        key(&mut g, '1');
        assert!(click(&mut g, RESET_GAME));
        assert_eq!(g.state.progress.scene(), Scene::Exterior);
        key(&mut g, '1');
        assert!(key(&mut g, 'r'));
        assert_eq!(g.state.progress.scene(), Scene::Exterior);
    }

    #[test]
    fn unknown_keys_ignored() {
        let mut g = DetectiveGame::new();
        assert!(!key(&mut g, 'z'));
        assert!(!click(&mut g, 999));
    }
}
