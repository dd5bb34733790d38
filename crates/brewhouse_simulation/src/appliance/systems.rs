//! Appliance systems (FixedUpdate)

use bevy::prelude::*;

use super::coffee_machine::{CoffeeMachine, CoffeeState};
use super::events::{CoffeeMachineCommand, CoffeeMachineEvent};

/// Система: применить очередь `CoffeeMachineCommand`
///
/// Команды с невыполненным guard игнорируются машиной; event пишем только
/// если состояние действительно сменилось.
pub fn apply_coffee_machine_commands(
    mut commands_in: EventReader<CoffeeMachineCommand>,
    mut machines: Query<&mut CoffeeMachine>,
    mut machine_events: EventWriter<CoffeeMachineEvent>,
) {
    for command in commands_in.read() {
        let mut machine = match machines.get_mut(command.machine) {
            Ok(machine) => machine,
            Err(_) => {
                crate::logger::log_warning(&format!(
                    "CoffeeMachineCommand {:?}: entity {:?} has no CoffeeMachine",
                    command.command, command.machine
                ));
                continue;
            }
        };

        let before = machine.state();
        machine.apply(command.command);
        let after = machine.state();

        if after != before {
            crate::logger::log(&format!(
                "☕ {:?} {:?}: {:?} → {:?}",
                command.machine, command.command, before, after
            ));
            machine_events.write(CoffeeMachineEvent::StateChanged {
                machine: command.machine,
                state: after,
            });
        }
    }
}

/// Система: таймер варки
///
/// Работает в FixedUpdate, delta из `Time<Fixed>`.
pub fn tick_coffee_machines(
    mut machines: Query<(Entity, &mut CoffeeMachine)>,
    mut machine_events: EventWriter<CoffeeMachineEvent>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta();

    for (entity, mut machine) in machines.iter_mut() {
        // Не трогаем DerefMut у простаивающих машин (change detection)
        if !machine.is_brewing() {
            continue;
        }

        let count_before = machine.coffee_count();
        machine.tick(delta);

        if machine.coffee_count() != count_before {
            crate::logger::log_info(&format!(
                "☕ {:?} brewed (count: {})",
                entity,
                machine.coffee_count()
            ));
            machine_events.write(CoffeeMachineEvent::StateChanged {
                machine: entity,
                state: CoffeeState::Ready,
            });
            machine_events.write(CoffeeMachineEvent::Brewed {
                machine: entity,
                count: machine.coffee_count(),
            });
        }
    }
}
