use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::{debug, error};

use crate::error::ClientResult;

/// Состояние данных одного экрана.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    /// Сообщение для пользователя; экран можно показать и повторить загрузку.
    Failed(String),
}

impl<T> LoadState<T> {
    /// Ошибки загрузки логируются и превращаются в `Failed`, без повторов.
    pub fn from_result(result: ClientResult<T>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => {
                error!("Screen load failed: {:?}", e);
                LoadState::Failed(e.user_message())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Состояние, которым владеет экран. Пока экран жив, его можно обновлять
/// через `StateSetter`; после того как экран закрыт, результаты выбрасываются.
#[derive(Debug)]
pub struct ScreenState<T> {
    inner: Arc<Mutex<LoadState<T>>>,
}

impl<T> ScreenState<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LoadState::Loading)),
        }
    }

    pub fn setter(&self) -> StateSetter<T> {
        StateSetter {
            target: Arc::downgrade(&self.inner),
        }
    }

    /// Повторная загрузка: экран снова показывает индикатор.
    pub fn mark_loading(&self) {
        *lock(&self.inner) = LoadState::Loading;
    }

    pub fn with<R>(&self, f: impl FnOnce(&LoadState<T>) -> R) -> R {
        f(&lock(&self.inner))
    }
}

impl<T: Clone> ScreenState<T> {
    pub fn snapshot(&self) -> LoadState<T> {
        lock(&self.inner).clone()
    }
}

impl<T> Default for ScreenState<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Слабая ссылка на состояние экрана для асинхронной загрузки.
#[derive(Debug)]
pub struct StateSetter<T> {
    target: Weak<Mutex<LoadState<T>>>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<T> StateSetter<T> {
    /// Записывает результат, если экран ещё существует.
    /// Возвращает `false`, если результат выброшен.
    pub fn set(&self, result: ClientResult<T>) -> bool {
        match self.target.upgrade() {
            Some(state) => {
                *lock(&state) = LoadState::from_result(result);
                true
            }
            None => {
                debug!("Screen is gone, dropping load result");
                false
            }
        }
    }

    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

// Обработчики не паникуют под замком, но отравленный мьютекс не должен ронять экран.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn new_screen_is_loading() {
        let screen: ScreenState<u32> = ScreenState::new();
        assert!(screen.snapshot().is_loading());
    }

    #[test]
    fn setter_delivers_while_screen_is_alive() {
        let screen = ScreenState::new();
        let setter = screen.setter();
        assert!(setter.set(Ok(vec![1, 2, 3])));
        assert_eq!(screen.snapshot(), LoadState::Loaded(vec![1, 2, 3]));
    }

    #[test]
    fn setter_discards_after_screen_is_dropped() {
        let screen: ScreenState<u32> = ScreenState::new();
        let setter = screen.setter();
        drop(screen);
        assert!(!setter.is_alive());
        assert!(!setter.set(Ok(7)));
    }

    #[test]
    fn failures_become_displayable_state() {
        let screen: ScreenState<u32> = ScreenState::new();
        screen.setter().set(Err(ClientError::not_found("movie 1")));
        screen.with(|state| assert!(matches!(state, LoadState::Failed(_))));
    }
}
