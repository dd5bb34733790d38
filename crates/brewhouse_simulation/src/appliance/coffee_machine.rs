//! Coffee machine: timed appliance state machine
//!
//! Idle → Brewing → Ready → (NeedsSugar) → Idle
//!
//! - Brewing → Ready: единственный переход по времени (`tick`)
//! - Остальные переходы: команды (`start_brewing`, `add_sugar`, `cancel_brewing`, `collect_coffee`)
//! - Команда с невыполненным guard молча игнорируется: нет изменений, нет уведомлений

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::events::ApplianceCommand;
use crate::notify::Subscribers;

/// Время варки по умолчанию (секунды)
pub const DEFAULT_BREW_DURATION: f32 = 3.0;

/// Состояния coffee machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum CoffeeState {
    /// Ждёт команду StartBrewing
    #[default]
    Idle,
    /// Таймер идёт, принимает только CancelBrewing
    Brewing,
    /// Кофе готов (можно добавить сахар или забрать)
    Ready,
    /// Сахар добавлен, ждёт CollectCoffee
    NeedsSugar,
}

impl CoffeeState {
    /// Показывать ли interaction prompt (во время варки машина не интерактивна)
    pub fn shows_prompt(self) -> bool {
        matches!(
            self,
            CoffeeState::Idle | CoffeeState::Ready | CoffeeState::NeedsSugar
        )
    }
}

/// Coffee machine component
///
/// Инварианты:
/// - `brew_timer == 0` когда state != Brewing
/// - `brew_timer` копится в `Duration` (как `Time<Fixed>`), чтобы
///   N шагов по 1/HZ давали ровно N * timestep без f32 дрейфа
/// - `coffee_count > 0` ⇒ state ∈ {Ready, NeedsSugar}
/// - `has_sugar` ⇒ state == NeedsSugar
///
/// Поля приватные: все изменения только через команды и `tick`.
#[derive(Component)]
pub struct CoffeeMachine {
    /// Порог варки (секунды)
    pub brew_duration: f32,
    state: CoffeeState,
    brew_timer: Duration,
    has_sugar: bool,
    coffee_count: u32,
    show_prompt: bool,
    /// StateChanged(new_state)
    pub on_state_changed: Subscribers<CoffeeState>,
    /// CoffeeBrewed(coffee_count)
    pub on_coffee_brewed: Subscribers<u32>,
}

impl Default for CoffeeMachine {
    fn default() -> Self {
        Self::new(DEFAULT_BREW_DURATION)
    }
}

impl CoffeeMachine {
    pub fn new(brew_duration: f32) -> Self {
        Self {
            brew_duration,
            state: CoffeeState::Idle,
            brew_timer: Duration::ZERO,
            has_sugar: false,
            coffee_count: 0,
            show_prompt: CoffeeState::Idle.shows_prompt(),
            on_state_changed: Subscribers::new(),
            on_coffee_brewed: Subscribers::new(),
        }
    }

    pub fn state(&self) -> CoffeeState {
        self.state
    }

    /// Сколько секунд идёт текущая варка
    pub fn brew_timer(&self) -> f32 {
        self.brew_timer.as_secs_f32()
    }

    /// Порог варки как `Duration`; отрицательный или NaN `brew_duration` = мгновенно
    fn brew_threshold(&self) -> Duration {
        Duration::try_from_secs_f32(self.brew_duration).unwrap_or(Duration::ZERO)
    }

    pub fn has_sugar(&self) -> bool {
        self.has_sugar
    }

    pub fn coffee_count(&self) -> u32 {
        self.coffee_count
    }

    /// Derived флаг для UI коллаборатора
    pub fn show_prompt(&self) -> bool {
        self.show_prompt
    }

    pub fn is_brewing(&self) -> bool {
        self.state == CoffeeState::Brewing
    }

    pub fn start_brewing(&mut self) {
        if self.state == CoffeeState::Idle {
            self.brew_timer = Duration::ZERO;
            self.update_state(CoffeeState::Brewing);
        }
    }

    pub fn add_sugar(&mut self) {
        if self.state == CoffeeState::Ready {
            self.has_sugar = true;
            self.update_state(CoffeeState::NeedsSugar);
        }
    }

    pub fn cancel_brewing(&mut self) {
        if self.is_brewing() {
            self.brew_timer = Duration::ZERO;
            self.update_state(CoffeeState::Idle);
        }
    }

    pub fn collect_coffee(&mut self) {
        if matches!(self.state, CoffeeState::Ready | CoffeeState::NeedsSugar) {
            self.coffee_count = 0;
            self.has_sugar = false;
            self.update_state(CoffeeState::Idle);
        }
    }

    pub fn apply(&mut self, command: ApplianceCommand) {
        match command {
            ApplianceCommand::StartBrewing => self.start_brewing(),
            ApplianceCommand::AddSugar => self.add_sugar(),
            ApplianceCommand::CancelBrewing => self.cancel_brewing(),
            ApplianceCommand::CollectCoffee => self.collect_coffee(),
        }
    }

    /// Продвинуть таймер варки на `delta` (обычно `Time<Fixed>::delta()`)
    ///
    /// При достижении `brew_duration`: StateChanged(Ready), затем CoffeeBrewed(count).
    pub fn tick(&mut self, delta: Duration) {
        if !self.is_brewing() {
            return;
        }

        self.brew_timer += delta;
        if self.brew_timer >= self.brew_threshold() {
            self.brew_timer = Duration::ZERO;
            self.coffee_count += 1;
            self.update_state(CoffeeState::Ready);

            let count = self.coffee_count;
            self.on_coffee_brewed.emit(&count);
        }
    }

    fn update_state(&mut self, new_state: CoffeeState) {
        self.state = new_state;
        self.on_state_changed.emit(&new_state);
        self.show_prompt = new_state.shows_prompt();
    }
}

impl fmt::Debug for CoffeeMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoffeeMachine")
            .field("state", &self.state)
            .field("brew_timer", &self.brew_timer)
            .field("brew_duration", &self.brew_duration)
            .field("has_sugar", &self.has_sugar)
            .field("coffee_count", &self.coffee_count)
            .field("show_prompt", &self.show_prompt)
            .finish()
    }
}
