//! Character wiring: player input → interaction + grab slot
//!
//! Персонаж = Transform + Interactor (scanner/dispatcher) + Grabber (один слот).
//! Device mapping остаётся хосту: он пишет уже смапленные `PlayerAction`.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::{
    Grabbable, Grabber, HeldBy, Player, DEFAULT_GRAB_OFFSET, DEFAULT_GRAB_REACH,
};
pub use events::{GrabChanged, PlayerAction};
pub use systems::{process_grab_actions, route_player_actions};

use crate::collision_layers::COLLISION_LAYER_ACTORS;
use crate::interaction::{Interactor, ProbeCollider};
use crate::SimulationSet;

/// Радиус коллайдера персонажа (для probe других interactors)
pub const CHARACTER_COLLIDER_RADIUS: f32 = 40.0;

/// Character Plugin
///
/// - SimulationSet::Input: route_player_actions (до scan/dispatch)
/// - SimulationSet::Dispatch: process_grab_actions (после dispatch interaction)
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerAction>()
            .add_event::<GrabChanged>()
            .register_type::<Grabber>()
            .register_type::<Grabbable>()
            .register_type::<HeldBy>();

        app.add_systems(
            FixedUpdate,
            (
                route_player_actions.in_set(SimulationSet::Input),
                process_grab_actions
                    .in_set(SimulationSet::Dispatch)
                    .after(crate::interaction::process_interaction_intents),
            ),
        );
    }
}

/// Bundle player character: interactor + grab slot + actor коллайдер
pub fn player_character_bundle(transform: Transform) -> impl Bundle {
    (
        transform,
        Player,
        Interactor::default(),
        Grabber::default(),
        ProbeCollider::new(CHARACTER_COLLIDER_RADIUS, COLLISION_LAYER_ACTORS),
    )
}
