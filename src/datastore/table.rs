//! Dense row-major integer table
//!
//! Rows are fixed-width records of `i64`. Copying a table copies values,
//! never references, which is what snapshots rely on.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    width: usize,
    data: Vec<i64>,
}

impl Table {
    pub fn new(width: usize) -> Self {
        assert!(width > 0, "table width must be positive");
        Self {
            width,
            data: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push_row(&mut self, row: &[i64]) {
        debug_assert_eq!(row.len(), self.width, "row width mismatch");
        self.data.extend_from_slice(row);
    }

    pub fn row(&self, idx: usize) -> Option<&[i64]> {
        let start = idx.checked_mul(self.width)?;
        self.data.get(start..start + self.width)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i64]> + '_ {
        self.data.chunks_exact(self.width.max(1))
    }

    /// Copy of one column
    pub fn column(&self, col: usize) -> Vec<i64> {
        self.rows().map(|row| row[col]).collect()
    }

    /// New table with the given rows, in the given order (duplicates kept)
    pub fn select(&self, rows: &[usize]) -> Table {
        let mut out = Table {
            width: self.width,
            data: Vec::with_capacity(rows.len() * self.width),
        };
        for &idx in rows {
            if let Some(row) = self.row(idx) {
                out.data.extend_from_slice(row);
            }
        }
        out
    }

    /// New table with the rows matching `pred`
    pub fn filter(&self, pred: impl Fn(&[i64]) -> bool) -> Table {
        let mut out = Table::new(self.width.max(1));
        for row in self.rows().filter(|row| pred(row)) {
            out.data.extend_from_slice(row);
        }
        out
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(3);
        t.push_row(&[1, 10, 100]);
        t.push_row(&[2, 20, 200]);
        t.push_row(&[1, 30, 300]);
        t
    }

    #[test]
    fn test_rows_and_columns() {
        let t = sample();
        assert_eq!(t.len(), 3);
        assert_eq!(t.row(1), Some(&[2, 20, 200][..]));
        assert_eq!(t.row(3), None);
        assert_eq!(t.column(1), vec![10, 20, 30]);
    }

    #[test]
    fn test_select_keeps_order_and_duplicates() {
        let t = sample();
        let s = t.select(&[2, 0, 2]);
        assert_eq!(s.column(2), vec![300, 100, 300]);
    }

    #[test]
    fn test_filter() {
        let t = sample();
        let f = t.filter(|row| row[0] == 1);
        assert_eq!(f.column(1), vec![10, 30]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut t = sample();
        let copy = t.clone();
        t.clear();
        assert!(t.is_empty());
        assert_eq!(copy.len(), 3);
    }
}
