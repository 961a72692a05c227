use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Режим получения геометрии активного окна: "auto" | "xdotool" | "sway"
    pub probe_mode: String,
    pub poll_interval_ms: u64,
    pub debounce_delay_ms: u64,
    /// Окна меньше этого размера (по любой из осей) считаются отсутствием окна
    pub min_window_width: i32,
    pub min_window_height: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Цвет рамки в формате #RRGGBB
    pub highlight_color: String,
    pub blur_enabled: bool,
    pub border_width: u32,
    pub fade_duration_ms: u64,
    /// Отступ "дырки" в размытии вокруг окна в фокусе
    pub blur_hole_padding: i32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            filter: "focusview_rust=info".to_string(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            probe_mode: "auto".to_string(),
            poll_interval_ms: 100,
            debounce_delay_ms: 200,
            min_window_width: 50,
            min_window_height: 50,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            highlight_color: "#FF0000".to_string(),
            blur_enabled: true,
            border_width: 8,
            fade_duration_ms: 500,
            blur_hole_padding: 0,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            tracking: TrackingConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("FOCUSVIEW_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек отслеживания
        match self.tracking.probe_mode.as_str() {
            "auto" | "xdotool" | "sway" => {}
            _ => anyhow::bail!("Неверный режим зонда геометрии: {}", self.tracking.probe_mode),
        }

        if self.tracking.poll_interval_ms == 0 {
            anyhow::bail!("poll_interval_ms должно быть больше 0");
        }

        if self.tracking.debounce_delay_ms == 0 {
            anyhow::bail!("debounce_delay_ms должно быть больше 0");
        }

        if self.tracking.min_window_width < 0 || self.tracking.min_window_height < 0 {
            anyhow::bail!("Минимальный размер окна не может быть отрицательным");
        }

        // Валидация настроек оверлея
        parse_highlight_color(&self.overlay.highlight_color)?;

        if self.overlay.border_width == 0 {
            anyhow::bail!("border_width должно быть больше 0");
        }

        if self.overlay.fade_duration_ms == 0 {
            anyhow::bail!("fade_duration_ms должно быть больше 0");
        }

        if self.overlay.blur_hole_padding < 0 {
            anyhow::bail!("blur_hole_padding не может быть отрицательным");
        }

        Ok(())
    }
}

/// Разобрать цвет формата #RRGGBB в компоненты RGB
pub fn parse_highlight_color(color: &str) -> Result<(u8, u8, u8)> {
    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| anyhow::anyhow!("Цвет должен начинаться с '#': {}", color))?;

    if hex.len() != 6 {
        anyhow::bail!("Цвет должен иметь формат #RRGGBB: {}", color);
    }

    let r = u8::from_str_radix(&hex[0..2], 16)
        .with_context(|| format!("Неверная компонента цвета в {}", color))?;
    let g = u8::from_str_radix(&hex[2..4], 16)
        .with_context(|| format!("Неверная компонента цвета в {}", color))?;
    let b = u8::from_str_radix(&hex[4..6], 16)
        .with_context(|| format!("Неверная компонента цвета в {}", color))?;

    Ok((r, g, b))
}
