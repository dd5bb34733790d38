//! Interaction + appliance integration test
//!
//! Полный ECS стек (SimulationPlugin) с явными fixed шагами:
//! - Brew timeline: StartBrewing в t=0, три шага по 1.0 сек
//! - Scanner: ближайшая машина, смена цели, нет hysteresis
//! - Dispatcher: Started → Ended, пустой interact, despawned цель
//! - Grab слот

use bevy::prelude::*;
use brewhouse_simulation::collision_layers::COLLISION_LAYER_PROPS;
use brewhouse_simulation::interaction::process_interaction_intents;
use brewhouse_simulation::*;

/// Все events типа E с начала теста
///
/// `advance_simulation` ротирует event буферы каждый шаг, поэтому копим
/// через EventReader в конце шага.
#[derive(Resource)]
struct Recorded<E: Event>(Vec<E>);

fn record_events<E: Event + Clone>(
    mut reader: EventReader<E>,
    mut recorded: ResMut<Recorded<E>>,
) {
    recorded.0.extend(reader.read().cloned());
}

fn record<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new())).add_systems(
        FixedUpdate,
        record_events::<E>.after(SimulationSet::Appliance),
    );
}

/// Helper: App со всеми plugins
fn create_app() -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    record::<CoffeeMachineEvent>(&mut app);
    record::<InteractionEvent>(&mut app);
    record::<InteractionProbeDebug>(&mut app);
    record::<GrabChanged>(&mut app);
    app
}

fn events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

fn spawn_player(app: &mut App) -> Entity {
    app.world_mut()
        .spawn(player_character_bundle(Transform::default()))
        .id()
}

/// Машина на оси -Z (перед игроком) на расстоянии `distance`
fn spawn_machine(app: &mut App, distance: f32) -> Entity {
    app.world_mut()
        .spawn(coffee_machine_bundle(Vec3::new(0.0, 0.0, -distance), 3.0))
        .id()
}

fn current_target(app: &App, interactor: Entity) -> Option<Entity> {
    app.world()
        .get::<Interactor>(interactor)
        .and_then(|interactor| interactor.current_target())
}

fn machine_state(app: &App, machine: Entity) -> CoffeeState {
    app.world()
        .get::<CoffeeMachine>(machine)
        .map(|machine| machine.state())
        .expect("machine exists")
}

#[test]
fn test_brew_timeline_one_second_steps() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);

    app.world_mut().send_event(CoffeeMachineCommand::new(
        machine,
        ApplianceCommand::StartBrewing,
    ));

    advance_simulation(&mut app, 1.0);
    assert_eq!(machine_state(&app, machine), CoffeeState::Brewing);

    advance_simulation(&mut app, 1.0);
    assert_eq!(machine_state(&app, machine), CoffeeState::Brewing);

    advance_simulation(&mut app, 1.0);
    assert_eq!(machine_state(&app, machine), CoffeeState::Ready);
    assert_eq!(
        app.world().get::<CoffeeMachine>(machine).map(|m| m.coffee_count()),
        Some(1)
    );

    assert_eq!(
        events::<CoffeeMachineEvent>(&app),
        vec![
            CoffeeMachineEvent::StateChanged {
                machine,
                state: CoffeeState::Brewing
            },
            CoffeeMachineEvent::StateChanged {
                machine,
                state: CoffeeState::Ready
            },
            CoffeeMachineEvent::Brewed { machine, count: 1 },
        ]
    );
}

#[test]
fn test_brew_completes_after_exact_fixed_step_count() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);
    let step = 1.0 / SIMULATION_HZ as f32;

    app.world_mut().send_event(CoffeeMachineCommand::new(
        machine,
        ApplianceCommand::StartBrewing,
    ));

    // 3.0 сек при 60Hz = 180 шагов
    for _ in 0..179 {
        advance_simulation(&mut app, step);
    }
    assert_eq!(machine_state(&app, machine), CoffeeState::Brewing);

    advance_simulation(&mut app, step);
    assert_eq!(machine_state(&app, machine), CoffeeState::Ready);
    assert_eq!(
        app.world().get::<CoffeeMachine>(machine).map(|m| m.coffee_count()),
        Some(1)
    );
}

#[test]
fn test_rejected_command_writes_no_event() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);

    app.world_mut().send_event(CoffeeMachineCommand::new(
        machine,
        ApplianceCommand::CollectCoffee,
    ));
    advance_simulation(&mut app, 1.0);

    assert_eq!(machine_state(&app, machine), CoffeeState::Idle);
    assert!(events::<CoffeeMachineEvent>(&app).is_empty());
}

#[test]
fn test_command_for_unknown_entity_is_skipped() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);
    let not_a_machine = app.world_mut().spawn(Transform::default()).id();

    app.world_mut().send_event(CoffeeMachineCommand::new(
        not_a_machine,
        ApplianceCommand::StartBrewing,
    ));
    advance_simulation(&mut app, 1.0);

    assert_eq!(machine_state(&app, machine), CoffeeState::Idle);
    assert!(events::<CoffeeMachineEvent>(&app).is_empty());
}

#[test]
fn test_scanner_tracks_nearest_machine() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let near = spawn_machine(&mut app, 80.0);
    let far = spawn_machine(&mut app, 150.0);

    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, player), Some(near));

    // Неизменный мир: цель не меняется
    for _ in 0..5 {
        advance_simulation(&mut app, 1.0 / 60.0);
        assert_eq!(current_target(&app, player), Some(near));
    }

    // Ближняя исчезла: на следующем шаге цель дальняя
    app.world_mut().despawn(near);
    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, player), Some(far));

    // Дальняя ушла за range: цели нет
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(far) {
        transform.translation = Vec3::new(0.0, 0.0, -300.0);
    }
    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, player), None);
}

#[test]
fn test_scanner_ignores_machines_behind_player() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    app.world_mut()
        .spawn(coffee_machine_bundle(Vec3::new(0.0, 0.0, 150.0), 3.0));

    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, player), None);
}

#[test]
fn test_scanner_target_flickers_at_range_boundary() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let machine = spawn_machine(&mut app, 190.0);

    for step in 0..6 {
        let distance = if step % 2 == 0 { 190.0 } else { 210.0 };
        if let Some(mut transform) = app.world_mut().get_mut::<Transform>(machine) {
            transform.translation = Vec3::new(0.0, 0.0, -distance);
        }

        advance_simulation(&mut app, 1.0 / 60.0);

        let expected = if step % 2 == 0 { Some(machine) } else { None };
        assert_eq!(current_target(&app, player), expected, "step {}", step);
    }
}

#[test]
fn test_interactor_without_transform_is_skipped() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);
    let detached = app.world_mut().spawn(Interactor::default()).id();

    app.world_mut().send_event(InteractionIntent::SetTarget {
        interactor: detached,
        target: machine,
    });
    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, detached), Some(machine));

    // Scanner его не трогает: override держится
    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, detached), Some(machine));

    app.world_mut().send_event(InteractionIntent::ClearTarget {
        interactor: detached,
    });
    advance_simulation(&mut app, 1.0 / 60.0);
    assert_eq!(current_target(&app, detached), None);
}

#[test]
fn test_interact_emits_started_then_ended() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let machine = spawn_machine(&mut app, 100.0);

    advance_simulation(&mut app, 1.0 / 60.0);
    app.world_mut()
        .send_event(PlayerAction::Interact { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);

    assert_eq!(
        events::<InteractionEvent>(&app),
        vec![
            InteractionEvent::Started {
                interactor: player,
                target: machine
            },
            InteractionEvent::Ended {
                interactor: player,
                target: machine
            },
        ]
    );
    assert_eq!(current_target(&app, player), Some(machine));
    // Interact сам по себе машину не трогает
    assert_eq!(machine_state(&app, machine), CoffeeState::Idle);
}

#[test]
fn test_interact_without_target_emits_nothing() {
    let mut app = create_app();
    let player = spawn_player(&mut app);

    app.world_mut()
        .send_event(PlayerAction::Interact { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);

    assert!(events::<InteractionEvent>(&app).is_empty());
}

#[test]
fn test_interact_with_despawned_target_clears_it() {
    let mut app = create_app();
    let machine = spawn_machine(&mut app, 100.0);
    let detached = app.world_mut().spawn(Interactor::default()).id();

    app.world_mut().send_event(InteractionIntent::SetTarget {
        interactor: detached,
        target: machine,
    });
    advance_simulation(&mut app, 1.0 / 60.0);

    app.world_mut().despawn(machine);
    app.world_mut()
        .send_event(InteractionIntent::Interact { interactor: detached });
    advance_simulation(&mut app, 1.0 / 60.0);

    assert!(events::<InteractionEvent>(&app).is_empty());
    assert_eq!(current_target(&app, detached), None);
}

#[test]
fn test_interaction_subscriber_drives_coffee_machine() {
    /// Подписчик: interact с Idle машиной = StartBrewing
    fn start_brewing_on_interact(
        mut interactions: EventReader<InteractionEvent>,
        mut machine_commands: EventWriter<CoffeeMachineCommand>,
    ) {
        for event in interactions.read() {
            if let InteractionEvent::Started { target, .. } = *event {
                machine_commands.write(CoffeeMachineCommand::new(
                    target,
                    ApplianceCommand::StartBrewing,
                ));
            }
        }
    }

    let mut app = create_app();
    app.add_systems(
        FixedUpdate,
        start_brewing_on_interact
            .in_set(SimulationSet::Dispatch)
            .after(process_interaction_intents),
    );
    let player = spawn_player(&mut app);
    let machine = spawn_machine(&mut app, 100.0);

    app.world_mut()
        .send_event(PlayerAction::Interact { actor: player });

    // Scan → Dispatch → Appliance в одном шаге
    advance_simulation(&mut app, 1.0);
    assert_eq!(machine_state(&app, machine), CoffeeState::Brewing);

    advance_simulation(&mut app, 1.0);
    advance_simulation(&mut app, 1.0);
    assert_eq!(machine_state(&app, machine), CoffeeState::Ready);
}

#[test]
fn test_show_debug_writes_probe_debug() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let machine = spawn_machine(&mut app, 100.0);

    advance_simulation(&mut app, 1.0 / 60.0);
    assert!(events::<InteractionProbeDebug>(&app).is_empty());

    if let Some(mut interactor) = app.world_mut().get_mut::<Interactor>(player) {
        interactor.settings.show_debug = true;
    }
    advance_simulation(&mut app, 1.0 / 60.0);

    let debug = events::<InteractionProbeDebug>(&app);
    assert_eq!(debug.len(), 1);
    assert_eq!(debug[0].interactor, player);
    assert_eq!(debug[0].target, Some(machine));
    assert!(debug[0].end.distance(Vec3::new(0.0, 0.0, -200.0)) < 1e-3);
}

#[test]
fn test_event_buffers_rotate_every_step() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    spawn_machine(&mut app, 100.0);

    if let Some(mut interactor) = app.world_mut().get_mut::<Interactor>(player) {
        interactor.settings.show_debug = true;
    }

    for _ in 0..1000 {
        advance_simulation(&mut app, 1.0 / 60.0);
    }

    // Каждый шаг пишет один debug event, readers видят все
    assert_eq!(events::<InteractionProbeDebug>(&app).len(), 1000);

    // В буфере только последние два шага
    let buffered = app.world().resource::<Events<InteractionProbeDebug>>().len();
    assert!(buffered <= 2, "event буфер растёт: {}", buffered);
}

#[test]
fn test_grab_and_release_cup() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let cup = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.0, -90.0),
            Grabbable,
            ProbeCollider::new(10.0, COLLISION_LAYER_PROPS),
        ))
        .id();

    app.world_mut()
        .send_event(PlayerAction::GrabPressed { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);

    assert_eq!(
        app.world().get::<Grabber>(player).and_then(|g| g.grabbed()),
        Some(cup)
    );
    assert_eq!(app.world().get::<HeldBy>(cup), Some(&HeldBy(player)));

    app.world_mut()
        .send_event(PlayerAction::GrabReleased { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);

    assert_eq!(
        app.world().get::<Grabber>(player).and_then(|g| g.grabbed()),
        None
    );
    assert!(app.world().get::<HeldBy>(cup).is_none());

    assert_eq!(
        events::<GrabChanged>(&app),
        vec![
            GrabChanged {
                actor: player,
                grabbed: Some(cup),
                previous: None
            },
            GrabChanged {
                actor: player,
                grabbed: None,
                previous: Some(cup)
            },
        ]
    );
}

#[test]
fn test_grab_press_while_holding_releases() {
    let mut app = create_app();
    let player = spawn_player(&mut app);
    let cup = app
        .world_mut()
        .spawn((Transform::from_xyz(0.0, 0.0, -100.0), Grabbable))
        .id();

    app.world_mut()
        .send_event(PlayerAction::GrabPressed { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);
    assert!(app.world().get::<HeldBy>(cup).is_some());

    app.world_mut()
        .send_event(PlayerAction::GrabPressed { actor: player });
    advance_simulation(&mut app, 1.0 / 60.0);
    assert!(app.world().get::<HeldBy>(cup).is_none());
}
