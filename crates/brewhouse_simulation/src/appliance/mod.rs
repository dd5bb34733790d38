//! Appliance module (coffee machine)
//!
//! ECS ответственность:
//! - `CoffeeMachine` state machine + brew таймер
//! - Commands: `CoffeeMachineCommand` → guard → transition
//! - Events: `CoffeeMachineEvent` (StateChanged, Brewed)
//!
//! Что означает "interact" с машиной решают подписчики `InteractionEvent`,
//! сам модуль interaction про appliances ничего не знает.

use bevy::prelude::*;

pub mod coffee_machine;
pub mod events;
pub mod systems;


pub use coffee_machine::{CoffeeMachine, CoffeeState, DEFAULT_BREW_DURATION};
pub use events::{ApplianceCommand, CoffeeMachineCommand, CoffeeMachineEvent};
pub use systems::{apply_coffee_machine_commands, tick_coffee_machines};

use crate::interaction::{Interactable, InteractableKind, ProbeCollider};
use crate::SimulationSet;

/// Радиус коллайдера машины для interaction probe
pub const COFFEE_MACHINE_COLLIDER_RADIUS: f32 = 50.0;

/// Appliance Plugin
///
/// Порядок выполнения (SimulationSet::Appliance):
/// 1. apply_coffee_machine_commands: команды текущего шага
/// 2. tick_coffee_machines: таймер варки
pub struct AppliancePlugin;

impl Plugin for AppliancePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CoffeeMachineCommand>()
            .add_event::<CoffeeMachineEvent>()
            .register_type::<CoffeeState>()
            .register_type::<ApplianceCommand>();

        app.add_systems(
            FixedUpdate,
            (apply_coffee_machine_commands, tick_coffee_machines)
                .chain()
                .in_set(SimulationSet::Appliance),
        );
    }
}

/// Bundle coffee machine: state machine + interactable tag + коллайдер для probe
pub fn coffee_machine_bundle(position: Vec3, brew_duration: f32) -> impl Bundle {
    (
        Transform::from_translation(position),
        CoffeeMachine::new(brew_duration),
        Interactable::new(InteractableKind::CoffeeMachine),
        ProbeCollider::world_static(COFFEE_MACHINE_COLLIDER_RADIUS),
    )
}
