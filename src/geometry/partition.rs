use crate::geometry::Rect;
use smallvec::{smallvec, SmallVec};

/// Максимальное число поверхностей размытия на дисплей.
/// Крестовое разбиение никогда не даёт больше областей.
pub const MAX_REGIONS: usize = 4;

/// Разбить область `outer` за вычетом `inner` на не более чем 4
/// непересекающиеся полосы.
///
/// Порядок эмиссии фиксирован (верх, низ, лево, право) - он определяет
/// детерминированное переиспользование поверхностей. Горизонтальные полосы
/// занимают всю ширину `outer`: углы покрываются ими, а не подгоняются
/// впритык - осознанный размен точности на фиксированное малое число
/// поверхностей.
///
/// Если `inner` не пересекает `outer` (или пуст), возвращается `[outer]`
/// целиком; вызывающая сторона дополняет результат пустыми прямоугольниками
/// до фиксированного числа поверхностей. Пустой `outer` даёт пустой результат.
pub fn partition_outside(outer: Rect, inner: Rect) -> SmallVec<[Rect; MAX_REGIONS]> {
    if outer.is_empty() {
        return SmallVec::new();
    }

    let hole = inner.intersected(&outer);
    if hole.is_empty() {
        return smallvec![outer];
    }

    let top = Rect::new(outer.x, outer.y, outer.width, hole.y - outer.y);
    let bottom = Rect::new(
        outer.x,
        hole.bottom(),
        outer.width,
        outer.bottom() - hole.bottom(),
    );
    let left = Rect::new(outer.x, hole.y, hole.x - outer.x, hole.height);
    let right = Rect::new(
        hole.right(),
        hole.y,
        outer.right() - hole.right(),
        hole.height,
    );

    let mut regions = SmallVec::new();
    for strip in [top, bottom, left, right] {
        if !strip.is_empty() {
            regions.push(strip);
        }
    }
    regions
}
