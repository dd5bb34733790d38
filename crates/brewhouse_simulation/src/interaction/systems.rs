//! Interaction systems (FixedUpdate)

use bevy::prelude::*;

use super::components::{Interactable, Interactor, ProbeCollider};
use super::events::{InteractionEvent, InteractionIntent, InteractionProbeDebug};
use super::probe::{find_nearest_interactable, Probe, ProbeCandidate};

/// Система scanner: ближайший interactable перед каждым Interactor
///
/// Interactor без Transform (нет позиции/ориентации) пропускается молча,
/// его цель не трогаем. Уведомлений scanner не шлёт: только dispatcher.
pub fn scan_for_interactables(
    mut interactors: Query<(Entity, &mut Interactor, Option<&Transform>)>,
    colliders: Query<(Entity, &Transform, &ProbeCollider, Option<&Interactable>)>,
    mut debug_events: EventWriter<InteractionProbeDebug>,
) {
    for (entity, mut interactor, transform) in interactors.iter_mut() {
        let Some(transform) = transform else {
            continue;
        };

        let origin = transform.translation;
        let forward = transform.forward();

        let candidates = colliders
            .iter()
            .map(|(candidate, candidate_transform, collider, interactable)| ProbeCandidate {
                entity: candidate,
                position: candidate_transform.translation,
                collider: *collider,
                kind: interactable.map(|interactable| interactable.kind),
            });

        let nearest =
            find_nearest_interactable(entity, origin, forward, &interactor.settings, candidates);

        // DerefMut только при реальной смене цели
        if interactor.current_target() != nearest {
            interactor.update_target(nearest);
        }

        if interactor.settings.show_debug {
            let probe = Probe::new(origin, forward, &interactor.settings);
            crate::logger::log(&format!(
                "🔍 {:?} probe {:?} → {:?}: target {:?}",
                entity,
                probe.origin,
                probe.end(),
                nearest
            ));
            debug_events.write(InteractionProbeDebug {
                interactor: entity,
                start: probe.origin,
                end: probe.end(),
                radius: probe.radius,
                target: nearest,
            });
        }
    }
}

/// Система dispatcher: обработка `InteractionIntent`
///
/// Interact без цели: no-op. Цель которая уже despawned сбрасывается
/// (weak reference пережила entity), уведомления не шлются.
pub fn process_interaction_intents(
    mut intents: EventReader<InteractionIntent>,
    mut interactors: Query<&mut Interactor>,
    entities: Query<()>,
    mut interaction_events: EventWriter<InteractionEvent>,
) {
    for intent in intents.read() {
        let interactor_entity = intent.interactor();
        let mut interactor = match interactors.get_mut(interactor_entity) {
            Ok(interactor) => interactor,
            Err(_) => {
                crate::logger::log_warning(&format!(
                    "InteractionIntent {:?}: entity {:?} has no Interactor",
                    intent, interactor_entity
                ));
                continue;
            }
        };

        match *intent {
            InteractionIntent::Interact { .. } => {
                let Some(target) = interactor.current_target() else {
                    continue;
                };

                if entities.get(target).is_err() {
                    crate::logger::log_warning(&format!(
                        "Interact: {:?} target {:?} no longer exists, clearing",
                        interactor_entity, target
                    ));
                    interactor.clear_interaction_target();
                    continue;
                }

                if let Some(target) = interactor.interact() {
                    crate::logger::log(&format!(
                        "🤝 {:?} interacts with {:?}",
                        interactor_entity, target
                    ));
                    interaction_events.write(InteractionEvent::Started {
                        interactor: interactor_entity,
                        target,
                    });
                    interaction_events.write(InteractionEvent::Ended {
                        interactor: interactor_entity,
                        target,
                    });
                }
            }

            InteractionIntent::SetTarget { target, .. } => {
                interactor.set_interaction_target(target);
            }

            InteractionIntent::ClearTarget { .. } => {
                interactor.clear_interaction_target();
            }
        }
    }
}
