//! Character events
//!
//! `PlayerAction`: уже смапленный input (Interact / Grab pressed / Grab released).
//! `GrabChanged`: слот Grabber изменился.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Interact { actor: Entity },
    GrabPressed { actor: Entity },
    GrabReleased { actor: Entity },
}

impl PlayerAction {
    pub fn actor(&self) -> Entity {
        match self {
            PlayerAction::Interact { actor }
            | PlayerAction::GrabPressed { actor }
            | PlayerAction::GrabReleased { actor } => *actor,
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct GrabChanged {
    pub actor: Entity,
    /// Что теперь в руках (None: отпустил)
    pub grabbed: Option<Entity>,
    /// Что было в руках до изменения
    pub previous: Option<Entity>,
}
