//! Headless симуляция Brewhouse
//!
//! Сцена: игрок + несколько coffee machines (seeded позиции) + чашка.
//! Scripted input прогоняет полный цикл: варка → сахар → выдача, плюс grab.

use bevy::prelude::*;
use rand::Rng;

use brewhouse_simulation::collision_layers::COLLISION_LAYER_PROPS;
use brewhouse_simulation::interaction::process_interaction_intents;
use brewhouse_simulation::*;

const STEP: f32 = 1.0 / SIMULATION_HZ as f32;
const TOTAL_STEPS: u32 = 360;

/// Что значит interact с coffee machine в этой сцене
///
/// Idle → StartBrewing, Ready → AddSugar, NeedsSugar → CollectCoffee.
/// Во время варки interact ничего не делает.
fn coffee_machine_interaction(
    mut interactions: EventReader<InteractionEvent>,
    machines: Query<&CoffeeMachine>,
    mut machine_commands: EventWriter<CoffeeMachineCommand>,
) {
    for event in interactions.read() {
        let InteractionEvent::Started { target, .. } = *event else {
            continue;
        };
        let Ok(machine) = machines.get(target) else {
            continue;
        };

        let command = match machine.state() {
            CoffeeState::Idle => ApplianceCommand::StartBrewing,
            CoffeeState::Ready => ApplianceCommand::AddSugar,
            CoffeeState::NeedsSugar => ApplianceCommand::CollectCoffee,
            CoffeeState::Brewing => continue,
        };
        machine_commands.write(CoffeeMachineCommand::new(target, command));
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin).add_systems(
        FixedUpdate,
        coffee_machine_interaction
            .in_set(SimulationSet::Dispatch)
            .after(process_interaction_intents),
    );

    log_info(&format!("Starting Brewhouse headless simulation (seed: {})", seed));

    // Машины перед игроком (игрок в origin, смотрит в -Z)
    let positions: Vec<Vec3> = {
        let mut rng = app.world_mut().resource_mut::<DeterministicRng>();
        (0..3)
            .map(|_| {
                Vec3::new(
                    rng.rng.gen_range(-120.0..120.0),
                    0.0,
                    rng.rng.gen_range(-180.0..-60.0),
                )
            })
            .collect()
    };

    let world = app.world_mut();
    let player = world.spawn(player_character_bundle(Transform::default())).id();
    for position in &positions {
        let machine = world.spawn(coffee_machine_bundle(*position, 3.0)).id();
        log_info(&format!("Coffee machine {:?} at {:?}", machine, position));
    }
    world.spawn((
        Transform::from_xyz(0.0, 0.0, -90.0),
        Grabbable,
        ProbeCollider::new(10.0, COLLISION_LAYER_PROPS),
    ));

    if let Some(mut interactor) = world.get_mut::<Interactor>(player) {
        interactor.on_interaction_started.subscribe(|target| {
            log_info(&format!("Interaction started with {:?}", target));
        });
    }

    for step in 0..TOTAL_STEPS {
        let action = match step {
            1 | 200 | 220 => Some(PlayerAction::Interact { actor: player }),
            250 => Some(PlayerAction::GrabPressed { actor: player }),
            300 => Some(PlayerAction::GrabReleased { actor: player }),
            _ => None,
        };
        if let Some(action) = action {
            app.world_mut().send_event(action);
        }

        advance_simulation(&mut app, STEP);

        if step % 60 == 0 {
            let target = app
                .world()
                .get::<Interactor>(player)
                .and_then(|interactor| interactor.current_target());
            log_info(&format!("Step {}: target {:?}", step, target));
        }
    }

    let world = app.world_mut();
    let mut machines = world.query::<(Entity, &CoffeeMachine)>();
    for (entity, machine) in machines.iter(world) {
        log_info(&format!("{:?}: {:?}", entity, machine));
    }

    log_info("Simulation complete!");
}
