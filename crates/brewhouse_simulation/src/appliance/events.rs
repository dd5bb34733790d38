//! Appliance events
//!
//! **Inbound:** `CoffeeMachineCommand`: команда конкретной машине (от interaction
//! подписчиков, UI, скриптов).
//!
//! **Outbound:** `CoffeeMachineEvent`: зеркало synchronous каналов `CoffeeMachine`
//! для остальных ECS систем. Один enum сохраняет порядок StateChanged → Brewed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::coffee_machine::CoffeeState;

/// Команды coffee machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ApplianceCommand {
    StartBrewing,
    AddSugar,
    CancelBrewing,
    CollectCoffee,
}

/// Intent: выполнить команду на машине
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CoffeeMachineCommand {
    pub machine: Entity,
    pub command: ApplianceCommand,
}

impl CoffeeMachineCommand {
    pub fn new(machine: Entity, command: ApplianceCommand) -> Self {
        Self { machine, command }
    }
}

/// Уведомления coffee machine
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum CoffeeMachineEvent {
    /// Машина сменила состояние
    StateChanged {
        machine: Entity,
        state: CoffeeState,
    },

    /// Варка завершена, `count`: сколько кофе ждёт выдачи
    Brewed {
        machine: Entity,
        count: u32,
    },
}

impl CoffeeMachineEvent {
    pub fn machine(&self) -> Entity {
        match self {
            CoffeeMachineEvent::StateChanged { machine, .. }
            | CoffeeMachineEvent::Brewed { machine, .. } => *machine,
        }
    }
}
