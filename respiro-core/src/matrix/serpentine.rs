//! Serpentine (boustrophedon) strip addressing
//!
//! Logical row 0 is the top of the panel, but the strip starts at the
//! bottom: physical row = 4 - y. Within a physical row the strip runs
//! left to right on even rows and right to left on odd rows.
//!
//! ```text
//!  logical y     physical row   strip indices
//!      0              4         20 21 22 23 24   →
//!      1              3         19 18 17 16 15   ←
//!      2              2         10 11 12 13 14   →
//!      3              1          9  8  7  6  5   ←
//!      4              0          0  1  2  3  4   →
//! ```

use super::MatrixError;

/// Cells per row and column
pub const MATRIX_SIZE: usize = 5;

/// Total number of cells (and LEDs on the strip)
pub const CELL_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

/// Strip index of an in-range logical cell
const fn strip_index(x: usize, y: usize) -> usize {
    let row = MATRIX_SIZE - 1 - y;
    let column = if row % 2 == 0 {
        x
    } else {
        MATRIX_SIZE - 1 - x
    };
    row * MATRIX_SIZE + column
}

/// Creates the transmit order table.
///
/// Entry `i` is the logical row-major index (`y * MATRIX_SIZE + x`) of the
/// cell that feeds the `i`-th LED on the strip.
const fn transmit_order() -> [usize; CELL_COUNT] {
    let mut order = [0; CELL_COUNT];
    let mut y = 0;
    while y < MATRIX_SIZE {
        let mut x = 0;
        while x < MATRIX_SIZE {
            order[strip_index(x, y)] = y * MATRIX_SIZE + x;
            x += 1;
        }
        y += 1;
    }
    order
}

/// Logical cell index for each strip position, in transmission order
pub const TRANSMIT_ORDER: [usize; CELL_COUNT] = transmit_order();

/// Check a logical coordinate and return its row-major index
pub fn logical_index(x: u8, y: u8) -> Result<usize, MatrixError> {
    let (xu, yu) = (x as usize, y as usize);
    if xu >= MATRIX_SIZE || yu >= MATRIX_SIZE {
        return Err(MatrixError::OutOfRange { x, y });
    }
    Ok(yu * MATRIX_SIZE + xu)
}

/// Strip index (0..25) of the LED at logical (`x`, `y`)
pub fn physical_index(x: u8, y: u8) -> Result<usize, MatrixError> {
    logical_index(x, y)?;
    Ok(strip_index(x as usize, y as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bijection_over_all_cells() {
        let mut seen = [false; CELL_COUNT];
        for y in 0..MATRIX_SIZE as u8 {
            for x in 0..MATRIX_SIZE as u8 {
                let index = physical_index(x, y).unwrap();
                assert!(index < CELL_COUNT);
                assert!(!seen[index], "index {} mapped twice", index);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_top_row_is_last_physical_row_ascending() {
        for x in 0..5u8 {
            assert_eq!(physical_index(x, 0).unwrap(), 20 + x as usize);
        }
    }

    #[test]
    fn test_second_row_descending() {
        for x in 0..5u8 {
            assert_eq!(physical_index(x, 1).unwrap(), 19 - x as usize);
        }
    }

    #[test]
    fn test_full_table() {
        #[rustfmt::skip]
        let expected: [[usize; 5]; 5] = [
            [20, 21, 22, 23, 24],
            [19, 18, 17, 16, 15],
            [10, 11, 12, 13, 14],
            [ 9,  8,  7,  6,  5],
            [ 0,  1,  2,  3,  4],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &index) in row.iter().enumerate() {
                assert_eq!(physical_index(x as u8, y as u8).unwrap(), index);
            }
        }
    }

    #[test]
    fn test_transmit_order_inverts_mapping() {
        for y in 0..5u8 {
            for x in 0..5u8 {
                let strip = physical_index(x, y).unwrap();
                assert_eq!(TRANSMIT_ORDER[strip], logical_index(x, y).unwrap());
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            physical_index(5, 0),
            Err(MatrixError::OutOfRange { x: 5, y: 0 })
        );
        assert_eq!(
            physical_index(0, 200),
            Err(MatrixError::OutOfRange { x: 0, y: 200 })
        );
    }

    proptest! {
        #[test]
        fn prop_in_range_iff_on_grid(x in any::<u8>(), y in any::<u8>()) {
            let on_grid = (x as usize) < MATRIX_SIZE && (y as usize) < MATRIX_SIZE;
            prop_assert_eq!(physical_index(x, y).is_ok(), on_grid);
        }
    }
}
