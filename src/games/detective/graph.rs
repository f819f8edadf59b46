//! Scene graph and navigation rules.
//!
//! A fixed directed graph: the living room is the hub, the newspaper pages
//! form a forward-only chain that ends with a single edge back to the hub.

use super::error::Denial;
use super::state::{Progress, Scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    HasKey,
    HasFinalDocument,
}

impl Guard {
    fn check(self, progress: &Progress) -> Result<(), Denial> {
        match self {
            Guard::HasKey if !progress.has_key() => Err(Denial::MissingKey),
            Guard::HasFinalDocument if !progress.has_final_document() => {
                Err(Denial::MissingDocument)
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: Scene,
    pub to: Scene,
    pub guard: Option<Guard>,
    /// Door / button label shown in the `from` scene.
    pub label: &'static str,
}

const fn edge(from: Scene, to: Scene, label: &'static str) -> Edge {
    Edge { from, to, guard: None, label }
}

const fn guarded(from: Scene, to: Scene, guard: Guard, label: &'static str) -> Edge {
    Edge { from, to, guard: Some(guard), label }
}

pub const EDGES: &[Edge] = &[
    edge(Scene::Exterior, Scene::Hall, "Entrar em casa"),
    edge(Scene::Hall, Scene::LivingRoom, "Seguir para a sala"),
    edge(Scene::LivingRoom, Scene::Kitchen, "Ir para a cozinha"),
    guarded(Scene::LivingRoom, Scene::Bedroom, Guard::HasKey, "Porta para o Quarto"),
    guarded(
        Scene::LivingRoom,
        Scene::NewspaperFront,
        Guard::HasFinalDocument,
        "Reler o jornal",
    ),
    edge(Scene::Kitchen, Scene::LivingRoom, "Voltar à sala"),
    edge(Scene::Bedroom, Scene::LivingRoom, "Voltar à sala"),
    guarded(
        Scene::Bedroom,
        Scene::NewspaperFront,
        Guard::HasFinalDocument,
        "Ler o jornal",
    ),
    edge(Scene::NewspaperFront, Scene::NewspaperInside, "Virar a página"),
    edge(Scene::NewspaperInside, Scene::NewspaperBack, "Virar a página"),
    edge(Scene::NewspaperBack, Scene::LivingRoom, "Fechar o jornal"),
];

pub fn find_edge(from: Scene, to: Scene) -> Option<&'static Edge> {
    EDGES.iter().find(|e| e.from == from && e.to == to)
}

pub fn edges_from(scene: Scene) -> impl Iterator<Item = &'static Edge> {
    EDGES.iter().filter(move |e| e.from == scene)
}

/// Decide whether `current -> target` is allowed right now.
///
/// Pure: moving the player is a separate step for the caller.
pub fn can_transition(current: Scene, target: Scene, progress: &Progress) -> Result<(), Denial> {
    if current == target {
        return Ok(());
    }
    let edge = find_edge(current, target).ok_or(Denial::NoPath)?;
    match edge.guard {
        Some(guard) => guard.check(progress),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::detective::state::ALL_SCENES;

    fn with_flags(has_key: bool, has_final_document: bool) -> Progress {
        let mut p = Progress::new();
        p.has_key = has_key;
        p.has_final_document = has_final_document;
        p
    }

    #[test]
    fn self_transition_always_allowed() {
        let p = Progress::new();
        for scene in ALL_SCENES {
            assert_eq!(can_transition(scene, scene, &p), Ok(()));
        }
    }

    #[test]
    fn front_door_path() {
        let p = Progress::new();
        assert_eq!(can_transition(Scene::Exterior, Scene::Hall, &p), Ok(()));
        assert_eq!(can_transition(Scene::Hall, Scene::LivingRoom, &p), Ok(()));
        // no way back out
        assert_eq!(can_transition(Scene::Hall, Scene::Exterior, &p), Err(Denial::NoPath));
        assert_eq!(
            can_transition(Scene::LivingRoom, Scene::Hall, &p),
            Err(Denial::NoPath)
        );
    }

    #[test]
    fn bedroom_needs_key() {
        assert_eq!(
            can_transition(Scene::LivingRoom, Scene::Bedroom, &with_flags(false, false)),
            Err(Denial::MissingKey)
        );
        assert_eq!(
            can_transition(Scene::LivingRoom, Scene::Bedroom, &with_flags(true, false)),
            Ok(())
        );
    }

    #[test]
    fn bedroom_unreachable_from_kitchen_even_with_key() {
        assert_eq!(
            can_transition(Scene::Kitchen, Scene::Bedroom, &with_flags(true, true)),
            Err(Denial::NoPath)
        );
    }

    #[test]
    fn newspaper_needs_document() {
        for from in [Scene::LivingRoom, Scene::Bedroom] {
            assert_eq!(
                can_transition(from, Scene::NewspaperFront, &with_flags(true, false)),
                Err(Denial::MissingDocument)
            );
            assert_eq!(
                can_transition(from, Scene::NewspaperFront, &with_flags(true, true)),
                Ok(())
            );
        }
    }

    #[test]
    fn newspaper_chain_is_forward_only() {
        let p = with_flags(true, true);
        assert_eq!(
            can_transition(Scene::NewspaperFront, Scene::NewspaperInside, &p),
            Ok(())
        );
        assert_eq!(
            can_transition(Scene::NewspaperInside, Scene::NewspaperBack, &p),
            Ok(())
        );
        assert_eq!(
            can_transition(Scene::NewspaperInside, Scene::NewspaperFront, &p),
            Err(Denial::NoPath)
        );
        assert_eq!(
            can_transition(Scene::NewspaperFront, Scene::LivingRoom, &p),
            Err(Denial::NoPath)
        );
        assert_eq!(
            can_transition(Scene::NewspaperBack, Scene::LivingRoom, &p),
            Ok(())
        );
    }

    #[test]
    fn skipping_pages_has_no_path() {
        let p = with_flags(true, true);
        assert_eq!(
            can_transition(Scene::LivingRoom, Scene::NewspaperBack, &p),
            Err(Denial::NoPath)
        );
    }

    #[test]
    fn no_duplicate_edges() {
        for (i, a) in EDGES.iter().enumerate() {
            for b in &EDGES[i + 1..] {
                assert!(!(a.from == b.from && a.to == b.to), "duplicate edge {a:?}");
            }
        }
    }

    #[test]
    fn every_scene_has_an_exit() {
        for scene in ALL_SCENES {
            assert!(edges_from(scene).next().is_some(), "{scene:?} is a dead end");
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::games::detective::state::ALL_SCENES;
    use proptest::prelude::*;

    fn arb_scene() -> impl Strategy<Value = Scene> {
        (0..ALL_SCENES.len()).prop_map(|i| ALL_SCENES[i])
    }

    proptest! {
        #[test]
        fn prop_non_edges_have_no_path(
            from in arb_scene(),
            to in arb_scene(),
            has_key in any::<bool>(),
            has_doc in any::<bool>(),
        ) {
            prop_assume!(from != to);
            prop_assume!(find_edge(from, to).is_none());
            let mut p = Progress::new();
            p.has_key = has_key;
            p.has_final_document = has_doc;
            prop_assert_eq!(can_transition(from, to, &p), Err(Denial::NoPath));
        }

        #[test]
        fn prop_unguarded_edges_always_open(idx in 0..EDGES.len()) {
            let e = EDGES[idx];
            prop_assume!(e.guard.is_none());
            prop_assert_eq!(can_transition(e.from, e.to, &Progress::new()), Ok(()));
        }

        #[test]
        fn prop_guarded_edges_open_with_both_flags(idx in 0..EDGES.len()) {
            let e = EDGES[idx];
            let mut p = Progress::new();
            p.has_key = true;
            p.has_final_document = true;
            prop_assert_eq!(can_transition(e.from, e.to, &p), Ok(()));
        }
    }
}
