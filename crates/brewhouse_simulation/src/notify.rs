//! Multicast notification channels
//!
//! Один `Subscribers<T>` = один канал (StateChanged, CoffeeBrewed, InteractionStarted...).
//! `emit` вызывает всех подписчиков синхронно, в порядке регистрации,
//! внутри того же вызова который изменил состояние.
//!
//! Bevy events (`EventWriter`) доставляются только следующим системам в schedule,
//! поэтому компоненты держат собственные каналы, а ECS слой дублирует
//! уведомления в events для остальных систем.

use std::fmt;

/// Handle подписки, нужен только для `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback<T> = Box<dyn FnMut(&T) + Send + Sync>;

pub struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(SubscriberId, Callback<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&T) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Возвращает false если подписка уже снята (или чужая)
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
