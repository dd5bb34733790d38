//! Brewhouse Simulation Core
//!
//! Headless ECS-симуляция на Bevy 0.16:
//! - appliance: coffee machine state machine (brew таймер, команды, уведомления)
//! - interaction: scanner ближайшей цели перед актором + interact dispatcher
//! - character: player input → interaction, один grab слот
//!
//! Всё выполняется в FixedUpdate, одним chained набором `SimulationSet`,
//! поэтому порядок внутри шага детерминирован.

use bevy::app::FixedMain;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod appliance;
pub mod character;
pub mod collision_layers;
pub mod interaction;
pub mod logger;
pub mod notify;

// Re-export базовых типов для удобства
pub use appliance::{
    coffee_machine_bundle, ApplianceCommand, AppliancePlugin, CoffeeMachine, CoffeeMachineCommand,
    CoffeeMachineEvent, CoffeeState,
};
pub use character::{
    player_character_bundle, CharacterPlugin, GrabChanged, Grabbable, Grabber, HeldBy,
    Player, PlayerAction,
};
pub use interaction::{
    Interactable, InteractableKind, InteractionEvent, InteractionIntent, InteractionPlugin,
    InteractionProbeDebug, Interactor, InteractorSettings, ProbeCollider,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use notify::{SubscriberId, Subscribers};

/// Фиксированная частота simulation tick
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок фаз внутри одного fixed шага
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// PlayerAction → intents
    Input,
    /// Scanner обновляет current_target
    Scan,
    /// Interaction intents, grab
    Dispatch,
    /// Appliance команды + таймеры
    Appliance,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Input,
                    SimulationSet::Scan,
                    SimulationSet::Dispatch,
                    SimulationSet::Appliance,
                )
                    .chain(),
            )
            .add_plugins((AppliancePlugin, InteractionPlugin, CharacterPlugin));

        // Детерминистичный RNG (seed по умолчанию), если хост не задал свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ));

    app
}

/// Один fixed шаг с явной delta (секунды)
///
/// Не зависит от wall clock: `Time<Fixed>` продвигается на `delta_secs`,
/// затем `FixedMain` (FixedFirst..FixedLast, включая FixedUpdate) выполняется
/// ровно один раз. После него `First` ротирует event буферы, как между
/// кадрами `app.update()`: event шага N читается до конца шага N+1 и
/// потом отбрасывается, очереди не растут.
pub fn advance_simulation(app: &mut App, delta_secs: f32) {
    let world = app.world_mut();
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta_secs));
    world.run_schedule(FixedMain);
    world.run_schedule(First);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
