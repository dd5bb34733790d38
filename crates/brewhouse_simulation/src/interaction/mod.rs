//! Interaction module (target scanner + dispatcher)
//!
//! Архитектура:
//! - Scanner: каждый шаг swept sphere probe вперёд от Interactor → ближайший
//!   распознанный `Interactable` → `Interactor::current_target`
//! - Dispatcher: `InteractionIntent::Interact` → Started → Ended вокруг текущей цели
//! - Цель: Entity handle, не владение; смена цели уведомлений не генерирует
//!
//! Hysteresis нет: цель на границе range мерцает так же как кандидат.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod probe;
pub mod systems;


pub use components::{
    Interactable, InteractableKind, Interactor, InteractorSettings, ProbeCollider,
    DEFAULT_INTERACTION_RANGE, DEFAULT_PROBE_RADIUS,
};
pub use events::{InteractionEvent, InteractionIntent, InteractionProbeDebug};
pub use probe::{find_nearest_interactable, Probe, ProbeCandidate, ProbeHit};
pub use systems::{process_interaction_intents, scan_for_interactables};

use crate::SimulationSet;

/// Interaction Plugin
///
/// - SimulationSet::Scan: scan_for_interactables
/// - SimulationSet::Dispatch: process_interaction_intents
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractionIntent>()
            .add_event::<InteractionEvent>()
            .add_event::<InteractionProbeDebug>()
            .register_type::<Interactable>()
            .register_type::<ProbeCollider>();

        app.add_systems(
            FixedUpdate,
            (
                scan_for_interactables.in_set(SimulationSet::Scan),
                process_interaction_intents.in_set(SimulationSet::Dispatch),
            ),
        );
    }
}
