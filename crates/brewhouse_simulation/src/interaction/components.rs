//! Interaction components: Interactor (scanner + dispatcher), Interactable, ProbeCollider

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collision_layers::{COLLISION_LAYER_WORLD_STATIC, COLLISION_MASK_INTERACTION_PROBE};
use crate::notify::Subscribers;

/// Дальность probe по умолчанию (world units)
pub const DEFAULT_INTERACTION_RANGE: f32 = 200.0;

/// Радиус sweep сферы probe по умолчанию
pub const DEFAULT_PROBE_RADIUS: f32 = 50.0;

/// Категории interactable объектов (закрытый набор, проверка по тегу)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum InteractableKind {
    CoffeeMachine,
}

/// Тег: с этим entity можно взаимодействовать
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Interactable {
    pub kind: InteractableKind,
}

impl Interactable {
    pub fn new(kind: InteractableKind) -> Self {
        Self { kind }
    }
}

/// Bounding sphere для interaction probe
///
/// Probe попадает в коллайдер если `layer & probe_mask != 0`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProbeCollider {
    pub radius: f32,
    pub layer: u32,
}

impl Default for ProbeCollider {
    fn default() -> Self {
        Self::world_static(DEFAULT_PROBE_RADIUS)
    }
}

impl ProbeCollider {
    pub fn new(radius: f32, layer: u32) -> Self {
        Self { radius, layer }
    }

    pub fn world_static(radius: f32) -> Self {
        Self::new(radius, COLLISION_LAYER_WORLD_STATIC)
    }
}

/// Параметры scanner'а
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct InteractorSettings {
    /// Максимальная дистанция probe
    pub range: f32,
    /// Радиус sweep сферы
    pub probe_radius: f32,
    /// Какие collision layers видит probe
    pub probe_mask: u32,
    /// Категории которые считаются целью
    pub recognized: Vec<InteractableKind>,
    /// Писать InteractionProbeDebug + debug log каждый скан
    pub show_debug: bool,
}

impl Default for InteractorSettings {
    fn default() -> Self {
        Self {
            range: DEFAULT_INTERACTION_RANGE,
            probe_radius: DEFAULT_PROBE_RADIUS,
            probe_mask: COLLISION_MASK_INTERACTION_PROBE,
            recognized: vec![InteractableKind::CoffeeMachine],
            show_debug: false,
        }
    }
}

impl InteractorSettings {
    pub fn recognizes(&self, kind: InteractableKind) -> bool {
        self.recognized.contains(&kind)
    }
}

/// Interactor: scanner + dispatcher на одном entity
///
/// `current_target`: слабая ссылка (Entity id + lookup через Query),
/// interactor никогда не владеет целью. Обновляется `scan_for_interactables`
/// каждый шаг, либо напрямую через `set_interaction_target`/`clear_interaction_target`.
#[derive(Component, Default)]
pub struct Interactor {
    pub settings: InteractorSettings,
    current_target: Option<Entity>,
    /// InteractionStarted(target)
    pub on_interaction_started: Subscribers<Entity>,
    /// InteractionEnded(target)
    pub on_interaction_ended: Subscribers<Entity>,
}

impl Interactor {
    pub fn new(settings: InteractorSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn current_target(&self) -> Option<Entity> {
        self.current_target
    }

    /// Started → Ended вокруг одного dispatch, только если цель есть
    ///
    /// Возвращает цель которой отправлены уведомления.
    pub fn interact(&mut self) -> Option<Entity> {
        let target = self.current_target?;
        self.on_interaction_started.emit(&target);
        self.on_interaction_ended.emit(&target);
        Some(target)
    }

    /// Override результата scanner'а (cut-scene, UI)
    pub fn set_interaction_target(&mut self, target: Entity) {
        self.update_target(Some(target));
    }

    pub fn clear_interaction_target(&mut self) {
        self.update_target(None);
    }

    /// Перезаписывает цель только при смене identity, без уведомлений
    ///
    /// Возвращает true если цель сменилась.
    pub fn update_target(&mut self, target: Option<Entity>) -> bool {
        if self.current_target == target {
            return false;
        }
        self.current_target = target;
        true
    }
}

impl fmt::Debug for Interactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactor")
            .field("settings", &self.settings)
            .field("current_target", &self.current_target)
            .finish()
    }
}
