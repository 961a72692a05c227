use crate::geometry::Rect;
use std::fmt;
use tokio::time::Instant;

/// Сырой результат одного опроса зонда геометрии
#[derive(Debug, Clone, Copy)]
pub struct FocusSample {
    pub rect: Option<Rect>,
    pub timestamp: Instant,
}

impl FocusSample {
    pub fn new(rect: Option<Rect>) -> Self {
        Self {
            rect,
            timestamp: Instant::now(),
        }
    }
}

/// Два сэмпла равны тогда и только тогда, когда равны их прямоугольники
/// (none == none); момент взятия сэмпла в сравнении не участвует
impl PartialEq for FocusSample {
    fn eq(&self, other: &Self) -> bool {
        self.rect == other.rect
    }
}

impl Eq for FocusSample {}

impl fmt::Display for FocusSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rect {
            Some(rect) => write!(f, "{}", rect),
            None => write!(f, "none"),
        }
    }
}

/// Стабилизированный переход фокуса, публикуемый трекером
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTransition {
    /// Фокус потерян или геометрия меняется: немедленно скрыть все поверхности
    Cleared,
    /// Прямоугольник фокуса простоял неизменным весь интервал дебаунса
    Settled(Rect),
}

/// Событие смены фокуса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub transition: FocusTransition,
    pub timestamp: Instant,
}

impl FocusEvent {
    pub fn new(transition: FocusTransition) -> Self {
        Self {
            transition,
            timestamp: Instant::now(),
        }
    }

    pub fn cleared() -> Self {
        Self::new(FocusTransition::Cleared)
    }

    pub fn settled(rect: Rect) -> Self {
        Self::new(FocusTransition::Settled(rect))
    }
}

impl fmt::Display for FocusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transition {
            FocusTransition::Cleared => write!(f, "Cleared")?,
            FocusTransition::Settled(rect) => write!(f, "Settled({})", rect)?,
        }
        write!(f, " ({}ms ago)", self.timestamp.elapsed().as_millis())
    }
}
