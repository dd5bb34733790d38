//! Interaction events
//!
//! **Inbound:** `InteractionIntent`: interact / override цели.
//! **Outbound:** `InteractionEvent` (Started → Ended, всегда парой и в этом порядке),
//! `InteractionProbeDebug`: визуализация probe для debug коллаборатора.

use bevy::prelude::*;

/// Intent от персонажа / UI / скриптов
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InteractionIntent {
    /// Взаимодействовать с текущей целью
    Interact { interactor: Entity },

    /// Принудительно задать цель (cut-scene, UI)
    SetTarget { interactor: Entity, target: Entity },

    /// Сбросить цель
    ClearTarget { interactor: Entity },
}

impl InteractionIntent {
    pub fn interactor(&self) -> Entity {
        match self {
            InteractionIntent::Interact { interactor }
            | InteractionIntent::SetTarget { interactor, .. }
            | InteractionIntent::ClearTarget { interactor } => *interactor,
        }
    }
}

/// Уведомления dispatcher'а
///
/// Подписчики `Started` решают что значит interact с конкретной целью
/// (например, какую команду отправить coffee machine).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    Started { interactor: Entity, target: Entity },
    Ended { interactor: Entity, target: Entity },
}

impl InteractionEvent {
    pub fn target(&self) -> Entity {
        match self {
            InteractionEvent::Started { target, .. } | InteractionEvent::Ended { target, .. } => {
                *target
            }
        }
    }
}

/// Debug: результат одного probe (пишется только при `show_debug`)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct InteractionProbeDebug {
    pub interactor: Entity,
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
    pub target: Option<Entity>,
}
