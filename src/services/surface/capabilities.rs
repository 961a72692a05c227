use once_cell::sync::Lazy;

use super::r#trait::SurfaceFactory;

/// Материал визуального эффекта панелей вне окна в фокусе.
/// Набор повторяет материалы нативных композиторов; какой из них реально
/// доступен - знает только бэкенд поверхностей.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectMaterial {
    FullScreenUi,
    HudWindow,
    UnderWindowBackground,
    Sidebar,
    WindowBackground,
    /// Терминальный вариант: простое полупрозрачное затемнение.
    /// Доступен всегда.
    Dim,
}

/// Слой, на котором размещаются поверхности оверлея
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayLayer {
    /// Сразу под системным UI (меню, панели) - предпочтительно
    BelowSystemUi,
    Floating,
    ScreenSaver,
}

/// Возможности, согласованные один раз на старте
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    pub material: EffectMaterial,
    pub layer: OverlayLayer,
}

// Упорядоченные таблицы предпочтений: первый доступный вариант выигрывает,
// последний элемент - безопасный терминальный вариант
static MATERIAL_PREFERENCES: Lazy<Vec<EffectMaterial>> = Lazy::new(|| {
    vec![
        EffectMaterial::FullScreenUi,
        EffectMaterial::HudWindow,
        EffectMaterial::UnderWindowBackground,
        EffectMaterial::Sidebar,
        EffectMaterial::WindowBackground,
        EffectMaterial::Dim,
    ]
});

static LAYER_PREFERENCES: Lazy<Vec<OverlayLayer>> = Lazy::new(|| {
    vec![
        OverlayLayer::BelowSystemUi,
        OverlayLayer::Floating,
        OverlayLayer::ScreenSaver,
    ]
});

pub fn negotiate_material(available: &[EffectMaterial]) -> EffectMaterial {
    MATERIAL_PREFERENCES
        .iter()
        .copied()
        .find(|m| available.contains(m))
        .unwrap_or(EffectMaterial::Dim)
}

pub fn negotiate_layer(available: &[OverlayLayer]) -> OverlayLayer {
    LAYER_PREFERENCES
        .iter()
        .copied()
        .find(|l| available.contains(l))
        .unwrap_or(OverlayLayer::ScreenSaver)
}

/// Согласовать возможности с фабрикой поверхностей (вызывается один раз)
pub fn negotiate_capabilities(factory: &dyn SurfaceFactory) -> SurfaceCapabilities {
    SurfaceCapabilities {
        material: negotiate_material(&factory.available_materials()),
        layer: negotiate_layer(&factory.available_layers()),
    }
}
