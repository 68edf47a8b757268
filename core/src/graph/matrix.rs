/// A square boolean matrix over the semiring (OR, AND).
///
/// Row `i`, column `j` of the adjacency matrix raised to the `n`th power is true iff a walk of
/// exactly `n` edges joins vertex `i` to vertex `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl BoolMatrix {
    pub fn new(size: usize) -> Self { Self { size, cells: vec![false; size * size] } }

    pub fn size(&self) -> usize { self.size }

    pub fn get(&self, row: usize, col: usize) -> bool { self.cells[row * self.size + col] }

    pub fn set(&mut self, row: usize, col: usize, value: bool) { self.cells[row * self.size + col] = value; }

    /// Boolean product: AND in place of multiplication, OR in place of addition.
    pub fn multiply(&self, other: &BoolMatrix) -> BoolMatrix {
        debug_assert_eq!(self.size, other.size);
        let n = self.size;
        let mut product = BoolMatrix::new(n);
        for i in 0..n {
            for k in 0..n {
                if !self.get(i, k) {
                    continue;
                }
                for j in 0..n {
                    if other.get(k, j) {
                        product.set(i, j, true);
                    }
                }
            }
        }
        product
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (i + 1..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Number of true entries above the diagonal, plus any self loops.
    pub(crate) fn upper_count(&self) -> usize { (0..self.size).map(|i| (i..self.size).filter(|&j| self.get(i, j)).count()).sum() }
}

impl std::fmt::Display for BoolMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            let line: String = (0..self.size).map(|col| if self.get(row, col) { '1' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
