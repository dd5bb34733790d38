//! Character components: Player marker, Grabber slot, Grabbable, HeldBy

use bevy::prelude::*;

/// Marker component для player-controlled entity
///
/// `PlayerAction` events приходят от input слоя хоста (маппинг устройств вне симуляции)
/// и адресуются конкретному actor. Interaction и grab работают для любого entity
/// с `Interactor`/`Grabber`, маркер нужен хосту чтобы найти кем управляет игрок:
/// ```ignore
/// let player = world.query_filtered::<Entity, With<Player>>().single(&world)?;
/// ```
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Радиус захвата вокруг grab point по умолчанию
pub const DEFAULT_GRAB_REACH: f32 = 150.0;

/// Grab point по умолчанию: 100 units вперёд (local forward = -Z)
pub const DEFAULT_GRAB_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -100.0);

/// Один слот "несу предмет"
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Grabber {
    /// Радиус поиска grabbable вокруг grab point
    pub reach: f32,
    /// Grab point в local space персонажа
    pub offset: Vec3,
    grabbed: Option<Entity>,
}

impl Default for Grabber {
    fn default() -> Self {
        Self {
            reach: DEFAULT_GRAB_REACH,
            offset: DEFAULT_GRAB_OFFSET,
            grabbed: None,
        }
    }
}

impl Grabber {
    pub fn grabbed(&self) -> Option<Entity> {
        self.grabbed
    }

    pub fn is_holding(&self) -> bool {
        self.grabbed.is_some()
    }

    /// Grab point в world space
    pub fn grab_point(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.offset)
    }

    /// Ближайший кандидат в пределах reach от grab point (кроме самого себя)
    pub fn pick(
        &self,
        actor: Entity,
        transform: &Transform,
        candidates: impl IntoIterator<Item = (Entity, Vec3)>,
    ) -> Option<Entity> {
        let grab_point = self.grab_point(transform);

        let mut best: Option<(Entity, f32)> = None;
        for (candidate, position) in candidates {
            if candidate == actor {
                continue;
            }

            let distance = grab_point.distance(position);
            if distance > self.reach {
                continue;
            }

            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        best.map(|(entity, _)| entity)
    }

    pub fn hold(&mut self, object: Entity) {
        self.grabbed = Some(object);
    }

    /// Отпустить текущий предмет (если есть)
    pub fn release(&mut self) -> Option<Entity> {
        self.grabbed.take()
    }
}

/// Маркер: предмет можно взять
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Grabbable;

/// Предмет сейчас у персонажа (owner)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct HeldBy(pub Entity);
