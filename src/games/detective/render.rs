//! O Caso Maloney rendering.
//!
//! Layout: title + scene bar + (room | case panel + log) + toast line.
//! Narrow screens stack the case panel under the room. Text popups are drawn
//! last, over everything, with a backdrop that closes them.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::graph::{can_transition, edges_from};
use super::logic::scene_choices;
use super::state::{clue_info, DetectiveState, Modal, Scene, ALL_SCENES, SUSPECTS};

pub fn render(
    state: &DetectiveState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = borders_for(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(state, f, chunks[0], borders);
    render_scene_bar(state, f, chunks[1], borders, is_narrow, click_state);

    let body = if is_narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(chunks[2])
    };
    render_room(state, f, body[0], borders, click_state);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(if is_narrow { 4 } else { 7 })])
        .split(body[1]);
    render_case_panel(state, f, side[0], borders, click_state);
    render_log(state, f, side[1], borders);

    render_toast(state, f, chunks[3]);

    if let Some(modal) = &state.modal {
        render_modal(modal, f, area, click_state);
    }
}

fn borders_for(area_width: u16) -> Borders {
    if is_narrow_layout(area_width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

// ── Title ───────────────────────────────────────────────────

fn render_title(state: &DetectiveState, f: &mut Frame, area: Rect, borders: Borders) {
    let (title, style) = if state.case_closed {
        (
            "\u{2605} Caso encerrado \u{2605}",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "O Caso Maloney",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, style)))
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

// ── Scene bar ───────────────────────────────────────────────

/// All scenes on wide screens; only the current one and its exits when narrow.
fn render_scene_bar(
    state: &DetectiveState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let current = state.progress.scene();
    let scenes: Vec<Scene> = if is_narrow {
        std::iter::once(current)
            .chain(edges_from(current).map(|e| e.to))
            .collect()
    } else {
        ALL_SCENES.to_vec()
    };

    let mut bar = TabBar::new("\u{2502}");
    for scene in scenes {
        let style = if scene == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if can_transition(current, scene, &state.progress).is_ok() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        bar = bar.tab(scene.name(), style, NAV_BASE + scene.index() as u16);
    }

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

// ── Room ────────────────────────────────────────────────────

fn render_room(
    state: &DetectiveState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let scene = state.progress.scene();
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(" {}", scene.description()),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " \u{2500}".to_string() + &"\u{2500}".repeat(14),
        Style::default().fg(Color::DarkGray),
    )));

    for (i, choice) in scene_choices(&state.progress).iter().enumerate() {
        if choice.available {
            push_choice(&mut cl, i, &choice.label);
        } else {
            push_choice_dim(&mut cl, i, &choice.label);
        }
    }

    if state.pending_redirect.is_some() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            " A abrir o jornal\u{2026}",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )));
    }

    let title_style = if scene.is_narrative() {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(format!(" {} ", scene.name()), title_style));

    register_list(&cl, &block, area, click_state);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

// ── Case panel ──────────────────────────────────────────────

fn render_case_panel(
    state: &DetectiveState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let progress = &state.progress;
    let label = Style::default().fg(Color::Gray);
    let mut cl = ClickableList::new();

    cl.push(Line::from(vec![
        Span::styled(" Local: ", label),
        Span::styled(progress.scene().name(), Style::default().fg(Color::White)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Chave: ", label),
        yes_no(progress.has_key()),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Jornal: ", label),
        if progress.has_final_document() {
            Span::styled("encontrado", Style::default().fg(Color::Green))
        } else {
            Span::styled("por encontrar", Style::default().fg(Color::DarkGray))
        },
    ]));

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Pistas",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    if progress.clues().is_empty() {
        cl.push(Line::from(Span::styled(
            "  Nenhuma pista recolhida",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for clue in progress.clues().iter().filter_map(|id| clue_info(id)) {
        cl.push(Line::from(vec![
            Span::styled(format!("  \u{2022} {}", clue.title), Style::default().fg(Color::White)),
            Span::styled(
                format!(" \u{2014} {}", clue.kind.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        " Suspeitos",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for (i, name) in SUSPECTS.iter().enumerate() {
        let selected = progress.suspect() == Some(*name);
        push_suspect(&mut cl, i, name, selected);
    }

    cl.push(Line::from(""));
    push_button(&mut cl, 'X', "Acusar", Color::Red, SUBMIT_ACCUSATION);
    push_button(&mut cl, 'R', "Recome\u{00e7}ar", Color::DarkGray, RESET_GAME);

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Caso ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    register_list(&cl, &block, area, click_state);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn yes_no(value: bool) -> Span<'static> {
    if value {
        Span::styled("Sim", Style::default().fg(Color::Green))
    } else {
        Span::styled("N\u{00e3}o", Style::default().fg(Color::DarkGray))
    }
}

// ── Log ─────────────────────────────────────────────────────

fn render_log(state: &DetectiveState, f: &mut Frame, area: Rect, borders: Borders) {
    let max_lines = area.height.saturating_sub(2) as usize;
    let start = state.log.len().saturating_sub(max_lines);
    let lines: Vec<Line> = state.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" > {}", entry.text), style))
        })
        .collect();
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

// ── Toast ───────────────────────────────────────────────────

fn render_toast(state: &DetectiveState, f: &mut Frame, area: Rect) {
    let Some(toast) = &state.toast else {
        return;
    };
    let style = if toast.is_fading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(toast.text.as_str(), style)))
            .alignment(Alignment::Center),
        area,
    );
}

// ── Modal ───────────────────────────────────────────────────

fn render_modal(
    modal: &Modal,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let width = area.width.saturating_sub(4).min(60);
    let inner_width = width.saturating_sub(2);
    let text_rows = Paragraph::new(modal.text.as_str())
        .wrap(Wrap { trim: false })
        .line_count(inner_width) as u16;
    // borders + blank line + close hint
    let height = (text_rows + 4).min(area.height);
    let popup = centered(area, width, height);
    register_modal_targets(&mut click_state.borrow_mut(), area, popup);

    let mut cl = ClickableList::new();
    for line in modal.text.lines() {
        cl.push(Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::White),
        )));
    }
    cl.push(Line::from(""));
    push_close_hint(&mut cl);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            format!(" {} ", modal.title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Clear, popup);
    register_list(&cl, &block, popup, click_state);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

/// Backdrop closes, the popup body does not; the close hint row is added on
/// top of both by the popup's list.
fn register_modal_targets(cs: &mut ClickState, area: Rect, popup: Rect) {
    cs.add_area_target(area, CLOSE_MODAL);
    cs.add_area_target(popup, MODAL_BODY);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// ── List helpers ────────────────────────────────────────────

fn register_list(
    cl: &ClickableList,
    block: &Block,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let inner = block.inner(area);
    let top = inner.y - area.y;
    let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, top, bottom, 0, inner.width);
}

fn push_choice(cl: &mut ClickableList, index: usize, label: &str) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::White)),
        ]),
        CHOICE_BASE + index as u16,
    );
}

/// Refused choices stay clickable: selecting one explains why it is refused.
fn push_choice_dim(cl: &mut ClickableList, index: usize, label: &str) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", index + 1),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        CHOICE_BASE + index as u16,
    );
}

fn push_suspect(cl: &mut ClickableList, index: usize, name: &str, selected: bool) {
    let key = (b'a' + index as u8) as char;
    let (marker, style) = if selected {
        (
            "\u{25b6} ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(Color::White))
    };
    cl.push_clickable(
        Line::from(vec![
            Span::styled(format!(" [{}] ", key), Style::default().fg(Color::Cyan)),
            Span::styled(format!("{}{}", marker, name), style),
        ]),
        SUSPECT_BASE + index as u16,
    );
}

fn push_button(cl: &mut ClickableList, key: char, label: &str, color: Color, action_id: u16) {
    cl.push_clickable(
        Line::from(vec![
            Span::styled(
                format!(" [{}] ", key),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(label.to_string(), Style::default().fg(Color::White)),
        ]),
        action_id,
    );
}

fn push_close_hint(cl: &mut ClickableList) {
    cl.push_clickable(
        Line::from(Span::styled(
            " [0] Fechar",
            Style::default().fg(Color::DarkGray),
        )),
        CLOSE_MODAL,
    );
}
