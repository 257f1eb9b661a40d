//! Left-to-right flow placement for tag chips.

/// Placement of one chip, `x` relative to the left content edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipSlot {
    pub row: usize,
    pub x: f32,
    pub width: f32,
}

/// Places chips of the given widths into rows no wider than `inner_width`.
///
/// A chip moves to a new row exactly when `x + width > inner_width`; a chip
/// that lands precisely on the right edge stays. The first chip of a row never
/// wraps, so a chip wider than the whole row gets a row to itself.
pub fn flow_chips(widths: &[f32], inner_width: f32, gutter: f32) -> Vec<ChipSlot> {
    let mut slots = Vec::with_capacity(widths.len());
    let mut row = 0;
    let mut x = 0.0;
    let mut row_has_chip = false;

    for &width in widths {
        if row_has_chip && x + width > inner_width {
            row += 1;
            x = 0.0;
        }
        slots.push(ChipSlot { row, x, width });
        x += width + gutter;
        row_has_chip = true;
    }

    slots
}

/// Number of rows a set of slots occupies.
pub fn row_count(slots: &[ChipSlot]) -> usize {
    slots.last().map_or(0, |slot| slot.row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_when_everything_fits() {
        let slots = flow_chips(&[10.0, 10.0, 10.0], 100.0, 2.0);
        assert_eq!(row_count(&slots), 1);
        assert_eq!(slots[1].x, 12.0);
        assert_eq!(slots[2].x, 24.0);
    }

    #[test]
    fn chip_filling_remaining_space_exactly_does_not_wrap() {
        // 20 + 4 gutter = 24, then 24 + 26 = 50 == inner width.
        let slots = flow_chips(&[20.0, 26.0], 50.0, 4.0);
        assert_eq!(slots[1].row, 0);
        assert_eq!(slots[1].x, 24.0);
    }

    #[test]
    fn chip_one_unit_too_wide_wraps() {
        let slots = flow_chips(&[20.0, 27.0], 50.0, 4.0);
        assert_eq!(slots[1].row, 1);
        assert_eq!(slots[1].x, 0.0);
    }

    #[test]
    fn oversized_chip_takes_its_own_row() {
        let slots = flow_chips(&[80.0, 10.0, 90.0], 50.0, 4.0);
        assert_eq!(slots.iter().map(|s| s.row).collect::<Vec<_>>(), [0, 1, 2]);
        assert!(slots.iter().all(|s| s.x == 0.0));
    }

    #[test]
    fn empty_input() {
        let slots = flow_chips(&[], 50.0, 4.0);
        assert!(slots.is_empty());
        assert_eq!(row_count(&slots), 0);
    }
}
