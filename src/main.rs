mod games;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use games::detective::state::TICKS_PER_SEC;
use games::detective::DetectiveGame;
use games::Game;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tachyonfx::{fx, Effect, Interpolation};
use time::FrameClock;

/// Length of the fade played when the player lands in another scene.
const SCENE_FADE_MS: u32 = 350;

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_y = mouse_y as f64 - rect.top();
    let click_x = mouse_x as f64 - rect.left();

    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    Some((col, row))
}

/// Milliseconds from `performance.now()`, or the wall clock when unavailable.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Per-frame bookkeeping owned by the render callback.
struct FrameLoop {
    clock: FrameClock,
    /// View the last transition was started for.
    shown_view: usize,
    transition: Option<Effect>,
}

fn scene_fade() -> Effect {
    fx::coalesce((SCENE_FADE_MS, Interpolation::QuadOut))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let detective: Box<dyn Game> = Box::new(DetectiveGame::new());
    let game = Rc::new(RefCell::new(detective));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            // ratzilla 0.3 reports the click already converted to a grid cell.
            let (col, row) = (mouse_event.col, mouse_event.row);
            let matched = cs.hit_test(col, row);
            drop(cs);

            if let Some(action_id) = matched {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Esc | KeyCode::Backspace => InputEvent::Back,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    let frame_loop = RefCell::new(FrameLoop {
        clock: FrameClock::new(TICKS_PER_SEC),
        shown_view: game.borrow().view_key(),
        transition: None,
    });

    terminal.draw_web(move |f| {
        let mut fl = frame_loop.borrow_mut();
        let step = fl.clock.advance(now_ms());
        let mut g = game.borrow_mut();
        if step.ticks > 0 {
            g.tick(step.ticks);
        }

        let size = f.area();
        click_state.borrow_mut().begin_frame(size.width, size.height);
        g.render(f, size, &click_state);

        let view = g.view_key();
        if view != fl.shown_view {
            fl.shown_view = view;
            fl.transition = Some(scene_fade());
        }
        let finished = match &mut fl.transition {
            Some(effect) => {
                effect.process(
                    tachyonfx::Duration::from_millis(step.delta_ms),
                    f.buffer_mut(),
                    size,
                );
                effect.done()
            }
            None => false,
        };
        if finished {
            fl.transition = None;
        }
    });

    Ok(())
}
