//! Semantic action IDs for O Caso Maloney click targets.

// ── Scene tab bar (base + scene index) ─────────────────────────
pub const NAV_BASE: u16 = 10;

// ── Scene choices: hotspots and doors (base + 0-based index) ───
pub const CHOICE_BASE: u16 = 30;

// ── Suspects (base + index into SUSPECTS) ──────────────────────
pub const SUSPECT_BASE: u16 = 60;

// ── Case panel buttons ─────────────────────────────────────────
pub const SUBMIT_ACCUSATION: u16 = 80;
pub const RESET_GAME: u16 = 81;

// ── Modal ──────────────────────────────────────────────────────
pub const CLOSE_MODAL: u16 = 100;
/// Popup body: swallows clicks so only the backdrop closes the modal.
pub const MODAL_BODY: u16 = 101;
