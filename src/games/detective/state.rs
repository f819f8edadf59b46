//! O Caso Maloney — game state: static catalog data and progress, no logic.
//!
//! The clue catalog and scene table are `const` data. [`Progress`] holds the
//! facts of one playthrough; [`DetectiveState`] wraps it together with the
//! view-facing bits (modal, toast, pending redirect, log).

use serde::Serialize;

// ── Timing ────────────────────────────────────────────────────

/// Game ticks per real-time second fed by the frame clock.
pub const TICKS_PER_SEC: u32 = 10;
/// Delay between finding the newspaper and the automatic page turn.
pub const REDIRECT_DELAY_TICKS: u32 = 12;
/// Lifetime of a toast message (fully removed at 2.2s).
pub const TOAST_TICKS: u32 = 22;
/// Final stretch of a toast's lifetime during which it is drawn faded.
pub const TOAST_FADE_TICKS: u32 = 7;
/// Maximum number of entries kept in the in-game log.
pub const LOG_CAPACITY: usize = 50;

// ── Scenes ────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Scene {
    Exterior,
    Hall,
    /// Hub: every room except the hall opens off the living room.
    LivingRoom,
    Kitchen,
    /// Locked until the key is found.
    Bedroom,
    NewspaperFront,
    NewspaperInside,
    NewspaperBack,
}

pub const ALL_SCENES: [Scene; 8] = [
    Scene::Exterior,
    Scene::Hall,
    Scene::LivingRoom,
    Scene::Kitchen,
    Scene::Bedroom,
    Scene::NewspaperFront,
    Scene::NewspaperInside,
    Scene::NewspaperBack,
];

/// Scene the story redirects to once the newspaper is in hand.
pub const NARRATIVE_START: Scene = Scene::NewspaperFront;

impl Scene {
    /// Position in [`ALL_SCENES`]; the table follows declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Scene> {
        ALL_SCENES.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Scene::Exterior => "Exterior",
            Scene::Hall => "Hall",
            Scene::LivingRoom => "Sala",
            Scene::Kitchen => "Cozinha",
            Scene::Bedroom => "Quarto",
            Scene::NewspaperFront => "Jornal I",
            Scene::NewspaperInside => "Jornal II",
            Scene::NewspaperBack => "Jornal III",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Scene::Exterior => {
                "Uma casa silenciosa numa rua tranquila. As luzes da sala estão acesas \
                 e a porta da frente está entreaberta."
            }
            Scene::Hall => {
                "Um hall estreito. Um casaco de homem está pendurado no bengaleiro, \
                 ainda húmido da chuva."
            }
            Scene::LivingRoom => {
                "A sala onde Patrick Maloney foi encontrado. Uma poltrona, um copo \
                 esquecido e portas para a cozinha e para o quarto."
            }
            Scene::Kitchen => {
                "A cozinha cheira a assado. O forno ainda está quente e o frigorífico \
                 zumbe num canto."
            }
            Scene::Bedroom => {
                "Um quarto arrumado demais. Sobre a cama está um jornal dobrado."
            }
            Scene::NewspaperFront => {
                "PRIMEIRA PÁGINA — «Polícia morto em casa. Arma do crime desaparecida.» \
                 Os investigadores procuram um objecto pesado e rombo."
            }
            Scene::NewspaperInside => {
                "PÁGINA DOIS — Testemunhos dos vizinhos e um anúncio do merceeiro da \
                 esquina sobre carne de borrego."
            }
            Scene::NewspaperBack => {
                "ÚLTIMA PÁGINA — Nas margens, uma caligrafia apressada cobre o espaço \
                 em branco."
            }
        }
    }

    pub fn is_narrative(self) -> bool {
        matches!(
            self,
            Scene::NewspaperFront | Scene::NewspaperInside | Scene::NewspaperBack
        )
    }
}

// ── Clues ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClueKind {
    /// Relevant to the case.
    Real,
    /// Secondary, a decoy.
    Decoy,
}

impl ClueKind {
    pub fn label(self) -> &'static str {
        match self {
            ClueKind::Real => "relevante",
            ClueKind::Decoy => "secundária",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Clue {
    pub id: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub kind: ClueKind,
    /// Where the hotspot for this clue is drawn.
    pub scene: Scene,
    /// Hotspot label in the scene's choice list.
    pub hotspot: &'static str,
    pub grants_key: bool,
    pub grants_final_document: bool,
    pub is_final: bool,
}

impl Clue {
    const fn plain(
        id: &'static str,
        title: &'static str,
        text: &'static str,
        kind: ClueKind,
        scene: Scene,
        hotspot: &'static str,
    ) -> Clue {
        Clue {
            id,
            title,
            text,
            kind,
            scene,
            hotspot,
            grants_key: false,
            grants_final_document: false,
            is_final: false,
        }
    }
}

pub const CLUES: &[Clue] = &[
    Clue::plain(
        "coat",
        "Casaco do marido",
        "O casaco não mostra sinais de arrombamento nem luta. (relevante)",
        ClueKind::Real,
        Scene::Hall,
        "Examinar o casaco",
    ),
    Clue::plain(
        "chair",
        "Poltrona",
        "Fibras manchadas sugerem contacto com sangue. (relevante)",
        ClueKind::Real,
        Scene::LivingRoom,
        "Examinar a poltrona",
    ),
    Clue::plain(
        "whisky",
        "Copo de whisky",
        "O copo parece ter sido limpo; impressões removidas. (secundária)",
        ClueKind::Decoy,
        Scene::LivingRoom,
        "Examinar o copo de whisky",
    ),
    Clue::plain(
        "fridge",
        "Frigorífico",
        "Frigorífico aberto recentemente; restos de carne. (relevante)",
        ClueKind::Real,
        Scene::Kitchen,
        "Abrir o frigorífico",
    ),
    Clue {
        grants_key: true,
        ..Clue::plain(
            "leg",
            "Perna de borrego",
            "A perna de borrego tem uma chave presa — encontraste a chave.",
            ClueKind::Real,
            Scene::Kitchen,
            "Examinar a perna de borrego no forno",
        )
    },
    Clue::plain(
        "bench",
        "Bancada",
        "Bancada molhada; uma faca está em falta. (relevante)",
        ClueKind::Real,
        Scene::Kitchen,
        "Examinar a bancada",
    ),
    Clue {
        grants_final_document: true,
        ..Clue::plain(
            "newspaper",
            "Jornal",
            "Um jornal dobrado, com anotações a tinta nas margens.",
            ClueKind::Real,
            Scene::Bedroom,
            "Pegar no jornal",
        )
    },
    Clue::plain(
        "classifieds",
        "Anúncios",
        "O merceeiro anuncia borrego a bom preço. Nada de suspeito. (secundária)",
        ClueKind::Decoy,
        Scene::NewspaperInside,
        "Ler os anúncios",
    ),
    Clue {
        is_final: true,
        ..Clue::plain(
            "confession",
            "Confissão",
            "Encontras a confissão: a Esposa matou Patrick Maloney. Fim do caso.",
            ClueKind::Real,
            Scene::NewspaperBack,
            "Ler as anotações nas margens",
        )
    },
];

pub fn clue_info(id: &str) -> Option<&'static Clue> {
    CLUES.iter().find(|c| c.id == id)
}

pub fn clues_in(scene: Scene) -> impl Iterator<Item = &'static Clue> {
    CLUES.iter().filter(move |c| c.scene == scene)
}

// ── Suspects ──────────────────────────────────────────────────

/// The one name the accusation is checked against.
pub const CULPRIT: &str = "Esposa";

pub const SUSPECTS: &[&str] = &[CULPRIT, "Merceeiro", "Vizinha", "Inspector Noonan"];

// ── Progress ──────────────────────────────────────────────────

/// Facts of a single playthrough.
///
/// Fields are only writable inside the `detective` module so the flags can
/// never drift from the collected clues.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub(super) scene: Scene,
    pub(super) clues: Vec<&'static str>,
    pub(super) has_key: bool,
    pub(super) has_final_document: bool,
    pub(super) suspect: Option<String>,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            scene: Scene::Exterior,
            clues: Vec::new(),
            has_key: false,
            has_final_document: false,
            suspect: None,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Collected clue ids, in the order they were first found.
    pub fn clues(&self) -> &[&'static str] {
        &self.clues
    }

    pub fn has_clue(&self, id: &str) -> bool {
        self.clues.iter().any(|c| *c == id)
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn has_final_document(&self) -> bool {
        self.has_final_document
    }

    pub fn suspect(&self) -> Option<&str> {
        self.suspect.as_deref()
    }
}

// ── View-facing state ─────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Modal {
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub ticks_left: u32,
}

impl Toast {
    pub fn is_fading(&self) -> bool {
        self.ticks_left <= TOAST_FADE_TICKS
    }
}

/// A scene change that is already decided but shown after a delay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingRedirect {
    pub target: Scene,
    pub ticks_left: u32,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub struct DetectiveState {
    pub progress: Progress,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub pending_redirect: Option<PendingRedirect>,
    /// Set once an accusation has been judged correct.
    pub case_closed: bool,
    pub log: Vec<LogEntry>,
}

impl DetectiveState {
    pub fn new() -> Self {
        let mut state = Self {
            progress: Progress::new(),
            modal: None,
            toast: None,
            pending_redirect: None,
            case_closed: false,
            log: Vec::new(),
        };
        state.add_log("Patrick Maloney foi encontrado morto em casa.", true);
        state.add_log("Investiga a casa e descobre quem o matou.", false);
        state
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    pub fn flash(&mut self, text: &str) {
        self.toast = Some(Toast {
            text: text.to_string(),
            ticks_left: TOAST_TICKS,
        });
    }

    pub fn show_modal(&mut self, title: &str, text: &str) {
        self.modal = Some(Modal {
            title: title.to_string(),
            text: text.to_string(),
        });
    }
}
