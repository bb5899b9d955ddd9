use crate::im::Lum8Im;

/// Build a grayscale image from an ASCII grid. Each char is one pixel:
/// digits map to their value (0..9), '.' maps to 0. Row 0 is y = 0.
pub fn lum8_from_ascii(grid: &str) -> Lum8Im {
    let rows: Vec<&str> = grid
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let h = rows.len();
    assert!(h > 0, "grid must have at least one non-empty row");
    let w = rows[0].len();
    assert!(w > 0, "grid rows must be non-empty");
    for r in &rows {
        assert_eq!(r.len(), w, "all rows must have equal length");
    }

    let mut im = Lum8Im::new(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let v = match ch {
                '.' => 0,
                _ => ch
                    .to_digit(10)
                    .unwrap_or_else(|| panic!("invalid pixel char '{ch}', expected digit or '.'"))
                    as u8,
            };
            im.arr[y * im.s + x] = v;
        }
    }
    im
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_grid_maps_digits_and_dots() {
        let im = lum8_from_ascii(
            "
            .19
            200
            ",
        );
        assert_eq!(im.w, 3);
        assert_eq!(im.h, 2);
        assert_eq!(im.arr, vec![0, 1, 9, 2, 0, 0]);
    }
}
