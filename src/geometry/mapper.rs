use crate::geometry::{DisplayTopology, Rect};

/// Преобразование между глобальными координатами тулкита и композитора.
///
/// Координаты тулкита: origin сверху-слева, Y растёт вниз.
/// Координаты композитора: origin снизу-слева, Y растёт вверх.
///
/// Отображение выводится выравниванием *объединения* всех дисплеев в обеих
/// конвенциях. Масштаб и повороты не корректируются: раскладка дисплеев
/// считается конгруэнтной в обеих конвенциях (mixed-DPI вне рамок задачи).
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    toolkit_union: Rect,
    compositor_union: Rect,
}

impl CoordinateMapper {
    pub fn new(toolkit_union: Rect, compositor_union: Rect) -> Self {
        Self {
            toolkit_union,
            compositor_union,
        }
    }

    pub fn from_topology(topology: &DisplayTopology) -> Self {
        Self::new(topology.toolkit_union(), topology.compositor_union)
    }

    /// Перевести прямоугольник из координат тулкита в координаты композитора.
    ///
    /// X отображается линейно; Y отражается вокруг нижнего ребра объединения
    /// в координатах тулкита, затем привязывается к origin композитора.
    /// При отсутствии дисплеев (оба объединения пусты) - тождественное
    /// отображение, не ошибка.
    pub fn to_compositor_space(&self, rect: Rect) -> Rect {
        if self.toolkit_union.is_empty() || self.compositor_union.is_empty() {
            return rect;
        }

        let out_x = self.compositor_union.x + (rect.x - self.toolkit_union.x);
        let out_y =
            self.compositor_union.y + (self.toolkit_union.bottom() - rect.y - rect.height);

        Rect::new(out_x, out_y, rect.width, rect.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_no_displays() {
        let mapper = CoordinateMapper::new(Rect::ZERO, Rect::ZERO);
        let r = Rect::new(10, 20, 300, 400);
        assert_eq!(mapper.to_compositor_space(r), r);
    }

    #[test]
    fn test_vertical_center_reflects() {
        // Объединение выровнено в (0,0) в обеих конвенциях, одинаковый размер
        let union = Rect::new(0, 0, 1920, 1080);
        let mapper = CoordinateMapper::new(union, union);

        let r = Rect::new(100, 100, 800, 600);
        let out = mapper.to_compositor_space(r);

        // X проходит без изменений, вертикальный центр отражается
        assert_eq!(out.x, r.x);
        assert_eq!(out.width, r.width);
        assert_eq!(out.height, r.height);
        assert_eq!(
            out.y * 2 + out.height,
            (union.height - (r.y + r.height / 2)) * 2
        );
        assert_eq!(out, Rect::new(100, 380, 800, 600));
    }

    #[test]
    fn test_offset_unions() {
        // Объединения с разными origin в двух конвенциях
        let toolkit = Rect::new(-1920, 0, 3840, 1080);
        let compositor = Rect::new(0, 100, 3840, 1080);
        let mapper = CoordinateMapper::new(toolkit, compositor);

        let r = Rect::new(-1920, 0, 1920, 1080);
        let out = mapper.to_compositor_space(r);
        assert_eq!(out, Rect::new(0, 100, 1920, 1080));

        // Окно у нижнего ребра тулкита ложится на нижнее ребро композитора
        let bottom = Rect::new(0, 1000, 100, 80);
        assert_eq!(
            mapper.to_compositor_space(bottom),
            Rect::new(1920, 100, 100, 80)
        );
    }

    #[test]
    fn test_mapping_is_involution_for_aligned_unions() {
        // При совпадающих объединениях отражение по Y самообратно:
        // двойное применение возвращает исходный прямоугольник
        let union = Rect::new(0, 0, 1920, 1080);
        let mapper = CoordinateMapper::new(union, union);

        for r in [
            Rect::new(100, 100, 800, 600),
            Rect::new(0, 0, 1920, 1080),
            Rect::new(1800, 1000, 120, 80),
        ] {
            let there = mapper.to_compositor_space(r);
            assert_eq!(mapper.to_compositor_space(there), r);
        }
    }

    #[test]
    fn test_top_edge_maps_to_top() {
        let union = Rect::new(0, 0, 1000, 500);
        let mapper = CoordinateMapper::new(union, union);

        // Полоса у верхнего края экрана (в тулките y=0) оказывается у
        // верхнего края в координатах композитора (y + height = 500)
        let strip = Rect::new(0, 0, 1000, 50);
        let out = mapper.to_compositor_space(strip);
        assert_eq!(out, Rect::new(0, 450, 1000, 50));
    }
}
