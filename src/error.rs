use thiserror::Error;

#[derive(Error, Debug)]
pub enum FocusViewError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Зонд геометрии окна недоступен: {0}")]
    ProbeUnavailable(String),

    #[error("Не удалось перечислить дисплеи: {0}")]
    DisplayUnavailable(String),

    #[error("Ошибка поверхности оверлея: {0}")]
    Surface(String),

    #[error("Сервис недоступен: {0}")]
    ServiceUnavailable(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, FocusViewError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! focusview_error {
    (probe_unavailable, $($arg:tt)*) => {
        $crate::error::FocusViewError::ProbeUnavailable(format!($($arg)*))
    };
    (display_unavailable, $($arg:tt)*) => {
        $crate::error::FocusViewError::DisplayUnavailable(format!($($arg)*))
    };
    (surface, $($arg:tt)*) => {
        $crate::error::FocusViewError::Surface(format!($($arg)*))
    };
    (service_unavailable, $($arg:tt)*) => {
        $crate::error::FocusViewError::ServiceUnavailable(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::FocusViewError::Internal(format!($($arg)*))
    };
}
