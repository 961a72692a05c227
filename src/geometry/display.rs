use crate::geometry::Rect;

/// Один подключённый дисплей в координатах тулкита (origin сверху-слева, Y вниз)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInfo {
    /// Полная геометрия дисплея
    pub geometry: Rect,
    /// Рабочая область без системных панелей (меню, док)
    pub usable_area: Rect,
}

/// Снимок конфигурации дисплеев, сделанный один раз на старте.
/// Горячее подключение/отключение дисплеев не поддерживается.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTopology {
    pub displays: Vec<DisplayInfo>,
    /// Ограничивающий прямоугольник всех дисплеев в координатах композитора
    /// (origin снизу-слева, Y вверх)
    pub compositor_union: Rect,
}

impl DisplayTopology {
    pub fn new(displays: Vec<DisplayInfo>, compositor_union: Rect) -> Self {
        Self {
            displays,
            compositor_union,
        }
    }

    /// Ограничивающий прямоугольник всех дисплеев в координатах тулкита.
    /// При отсутствии дисплеев - пустой прямоугольник.
    pub fn toolkit_union(&self) -> Rect {
        self.displays
            .iter()
            .fold(Rect::ZERO, |acc, d| acc.united(&d.geometry))
    }

    /// Индекс дисплея, содержащего точку (тест по вхождению центра окна)
    pub fn display_index_at(&self, point: (i32, i32)) -> Option<usize> {
        self.displays
            .iter()
            .position(|d| d.geometry.contains_point(point))
    }
}
