use serde::{Deserialize, Serialize};
use std::fmt;

/// Прямоугольник в одной из двух координатных конвенций (см. mapper.rs).
///
/// Инвариант: width >= 0 и height >= 0. Прямоугольник нулевой площади
/// считается "пустым" и не несёт геометрического смысла.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Создать прямоугольник; отрицательные размеры обрезаются до нуля
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains_point(&self, point: (i32, i32)) -> bool {
        !self.is_empty()
            && point.0 >= self.x
            && point.0 < self.right()
            && point.1 >= self.y
            && point.1 < self.bottom()
    }

    /// Пересечение с другим прямоугольником; пустой Rect, если пересечения нет
    pub fn intersected(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            Rect::ZERO
        } else {
            Rect::new(x, y, right - x, bottom - y)
        }
    }

    /// Ограничивающий прямоугольник двух прямоугольников.
    /// Пустой аргумент не расширяет результат.
    pub fn united(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Расширить прямоугольник на pad во все стороны (для отступа "дырки" в размытии)
    pub fn inflated(&self, pad: i32) -> Rect {
        if pad == 0 {
            return *self;
        }
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + 2 * pad,
            self.height + 2 * pad,
        )
    }

    /// Площадь в целочисленных ячейках; используется в проверках покрытия
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}
