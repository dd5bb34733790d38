//! Character systems: input routing + grab slot

use bevy::prelude::*;

use super::components::{Grabbable, Grabber, HeldBy};
use super::events::{GrabChanged, PlayerAction};
use crate::interaction::InteractionIntent;

/// Система: PlayerAction::Interact → InteractionIntent::Interact
pub fn route_player_actions(
    mut actions: EventReader<PlayerAction>,
    mut intents: EventWriter<InteractionIntent>,
) {
    for action in actions.read() {
        if let PlayerAction::Interact { actor } = *action {
            intents.write(InteractionIntent::Interact { interactor: actor });
        }
    }
}

/// Система: grab / release
///
/// GrabPressed: держит → отпускает, иначе берёт ближайший Grabbable у grab point.
/// GrabReleased: отпускает если держит.
pub fn process_grab_actions(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    mut grabbers: Query<(Option<&Transform>, &mut Grabber)>,
    grabbables: Query<(Entity, &Transform), (With<Grabbable>, Without<HeldBy>)>,
    mut grab_events: EventWriter<GrabChanged>,
) {
    for action in actions.read() {
        let actor = action.actor();

        let (transform, mut grabber) = match *action {
            PlayerAction::Interact { .. } => continue,
            PlayerAction::GrabPressed { .. } | PlayerAction::GrabReleased { .. } => {
                match grabbers.get_mut(actor) {
                    Ok(grabber) => grabber,
                    Err(_) => {
                        crate::logger::log_warning(&format!(
                            "{:?}: entity {:?} has no Grabber",
                            action, actor
                        ));
                        continue;
                    }
                }
            }
        };

        if grabber.is_holding() {
            release_held(&mut commands, actor, &mut grabber, &mut grab_events);
            continue;
        }

        if matches!(action, PlayerAction::GrabReleased { .. }) {
            continue;
        }

        // Без Transform нет grab point: молча пропускаем
        let Some(transform) = transform else {
            continue;
        };

        let candidates = grabbables
            .iter()
            .map(|(entity, candidate_transform)| (entity, candidate_transform.translation));

        if let Some(object) = grabber.pick(actor, transform, candidates) {
            grabber.hold(object);
            commands.entity(object).insert(HeldBy(actor));
            crate::logger::log(&format!("✋ {:?} grabbed {:?}", actor, object));
            grab_events.write(GrabChanged {
                actor,
                grabbed: Some(object),
                previous: None,
            });
        }
    }
}

fn release_held(
    commands: &mut Commands,
    actor: Entity,
    grabber: &mut Grabber,
    grab_events: &mut EventWriter<GrabChanged>,
) {
    let Some(held) = grabber.release() else {
        return;
    };

    // Предмет мог быть despawned пока был в руках
    if let Ok(mut held_commands) = commands.get_entity(held) {
        held_commands.remove::<HeldBy>();
    }

    crate::logger::log(&format!("✋ {:?} released {:?}", actor, held));
    grab_events.write(GrabChanged {
        actor,
        grabbed: None,
        previous: Some(held),
    });
}
