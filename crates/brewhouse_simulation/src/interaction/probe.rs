//! Interaction probe: swept sphere query + выбор ближайшей цели
//!
//! Чистая геометрия без ECS: системы собирают `ProbeCandidate` из Query
//! и вызывают `find_nearest_interactable`.
//!
//! Алгоритм:
//! 1. Sphere (`probe_radius`) движется от origin до `origin + forward * range`
//! 2. Hit = bounding sphere коллайдера пересекает swept volume (и layer в mask)
//!    Первый hit без Interactable (стена) блокирует sweep: всё дальше него отбрасывается
//! 3. Фильтр по категории (`InteractorSettings::recognized`)
//! 4. Ближайший по прямой от origin, строго < range; при равенстве: первый hit

use bevy::prelude::*;

use super::components::{InteractableKind, InteractorSettings, ProbeCollider};

/// Swept sphere от origin вдоль direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    pub origin: Vec3,
    /// Normalized
    pub direction: Vec3,
    pub range: f32,
    pub radius: f32,
    pub mask: u32,
}

impl Probe {
    pub fn new(origin: Vec3, forward: Dir3, settings: &InteractorSettings) -> Self {
        Self {
            origin,
            direction: forward.as_vec3(),
            range: settings.range,
            radius: settings.probe_radius,
            mask: settings.probe_mask,
        }
    }

    pub fn end(&self) -> Vec3 {
        self.origin + self.direction * self.range
    }

    /// Дистанция вдоль sweep в точке наибольшего сближения, если sphere задевает коллайдер
    pub fn sweep_distance(&self, center: Vec3, collider: &ProbeCollider) -> Option<f32> {
        if collider.layer & self.mask == 0 {
            return None;
        }

        let along = (center - self.origin).dot(self.direction).clamp(0.0, self.range);
        let closest = self.origin + self.direction * along;

        if closest.distance(center) <= self.radius + collider.radius {
            Some(along)
        } else {
            None
        }
    }
}

/// Кандидат для probe (собирается из Query)
#[derive(Debug, Clone, Copy)]
pub struct ProbeCandidate {
    pub entity: Entity,
    pub position: Vec3,
    pub collider: ProbeCollider,
    /// None: коллайдер без Interactable (стена, мебель)
    pub kind: Option<InteractableKind>,
}

/// Результат sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub entity: Entity,
    pub position: Vec3,
    pub sweep_distance: f32,
    pub kind: Option<InteractableKind>,
}

/// Sweep по кандидатам, исключая `ignored` (сам interactor)
///
/// Hits отсортированы по `sweep_distance`, порядок равных сохраняется.
/// Sweep останавливается на первом blocking hit (`kind == None`): он сам и
/// hits на той же дистанции остаются, всё дальше отбрасывается.
pub fn sweep(
    probe: &Probe,
    ignored: Entity,
    candidates: impl IntoIterator<Item = ProbeCandidate>,
) -> Vec<ProbeHit> {
    let mut hits: Vec<ProbeHit> = candidates
        .into_iter()
        .filter(|candidate| candidate.entity != ignored)
        .filter_map(|candidate| {
            probe
                .sweep_distance(candidate.position, &candidate.collider)
                .map(|sweep_distance| ProbeHit {
                    entity: candidate.entity,
                    position: candidate.position,
                    sweep_distance,
                    kind: candidate.kind,
                })
        })
        .collect();

    hits.sort_by(|a, b| a.sweep_distance.total_cmp(&b.sweep_distance));

    if let Some(blocker) = hits.iter().find(|hit| hit.kind.is_none()) {
        let cutoff = blocker.sweep_distance;
        hits.retain(|hit| hit.sweep_distance <= cutoff);
    }

    hits
}

/// Ближайший распознанный hit (строго ближе range)
pub fn nearest_recognized(
    origin: Vec3,
    hits: &[ProbeHit],
    settings: &InteractorSettings,
) -> Option<Entity> {
    let mut nearest: Option<Entity> = None;
    let mut nearest_distance = settings.range;

    for hit in hits {
        let recognized = hit.kind.is_some_and(|kind| settings.recognizes(kind));
        if !recognized {
            continue;
        }

        let distance = origin.distance(hit.position);
        if distance < nearest_distance {
            nearest = Some(hit.entity);
            nearest_distance = distance;
        }
    }

    nearest
}

/// Полный скан: sweep + фильтр категорий + nearest
pub fn find_nearest_interactable(
    interactor: Entity,
    origin: Vec3,
    forward: Dir3,
    settings: &InteractorSettings,
    candidates: impl IntoIterator<Item = ProbeCandidate>,
) -> Option<Entity> {
    let probe = Probe::new(origin, forward, settings);
    let hits = sweep(&probe, interactor, candidates);
    nearest_recognized(origin, &hits, settings)
}
