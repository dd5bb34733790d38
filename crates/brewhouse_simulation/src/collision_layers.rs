//! Collision Layers Constants
//!
//! Битовые маски слоёв для interaction probe (см. `interaction::probe`).
//!
//! ## Архитектура:
//! - **Layer:** на каком слое находится `ProbeCollider`
//! - **Mask:** какие слои probe "видит" (`InteractorSettings::probe_mask`)
//!
//! ## Слои:
//! - Layer 1 (0b1 = 1): World static (appliances, стены, мебель)
//! - Layer 2 (0b10 = 2): Actors (персонажи)
//! - Layer 3 (0b100 = 4): Props (переносимые предметы)
//!
//! ## Использование:
//! ```ignore
//! use brewhouse_simulation::collision_layers::*;
//!
//! let collider = ProbeCollider::new(50.0, COLLISION_LAYER_WORLD_STATIC);
//! let hit = collider.layer & COLLISION_MASK_INTERACTION_PROBE != 0;
//! ```

/// Layer 1: World static (coffee machines, стены)
pub const COLLISION_LAYER_WORLD_STATIC: u32 = 0b1; // 1

/// Layer 2: Actors (игрок, NPC)
pub const COLLISION_LAYER_ACTORS: u32 = 0b10; // 2

/// Layer 3: Props (grabbable предметы)
pub const COLLISION_LAYER_PROPS: u32 = 0b100; // 4

/// Mask: interaction probe по умолчанию видит только world static
pub const COLLISION_MASK_INTERACTION_PROBE: u32 = COLLISION_LAYER_WORLD_STATIC;
