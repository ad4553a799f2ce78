//! Row, column and rectangular-slice views over a matrix.
//!
//! A view is a lazy description of a set of cells. Its `Display` form is the
//! engine's vector notation; iterating it yields the individual cell
//! expressions in row-major order and can be restarted any number of times.

use std::fmt;

use crate::expr::Expression;

use super::Variable;

/// Which cells a [`VectorView`] covers. Slice ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorSelection {
    Row(usize),
    Col(usize),
    Slice {
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct VectorView<'a> {
    variable: &'a Variable,
    selection: VectorSelection,
}

impl Variable {
    pub fn row(&self, row: usize) -> VectorView<'_> {
        VectorView {
            variable: self,
            selection: VectorSelection::Row(row),
        }
    }

    pub fn col(&self, col: usize) -> VectorView<'_> {
        VectorView {
            variable: self,
            selection: VectorSelection::Col(col),
        }
    }

    /// Rectangle from `(row_start, col_start)` to `(row_end, col_end)`,
    /// both corners included.
    pub fn slice(
        &self,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) -> VectorView<'_> {
        VectorView {
            variable: self,
            selection: VectorSelection::Slice {
                row_start,
                col_start,
                row_end,
                col_end,
            },
        }
    }
}

impl<'a> VectorView<'a> {
    pub fn variable(&self) -> &'a Variable {
        self.variable
    }

    pub fn selection(&self) -> VectorSelection {
        self.selection
    }

    /// `(row_start, col_start, row_end, col_end)` with exclusive ends.
    fn span(&self) -> (usize, usize, usize, usize) {
        let (rows, cols) = self.variable.grid();
        match self.selection {
            VectorSelection::Row(r) => (r, 0, r + 1, cols),
            VectorSelection::Col(c) => (0, c, rows, c + 1),
            VectorSelection::Slice {
                row_start,
                col_start,
                row_end,
                col_end,
            } => (row_start, col_start, row_end + 1, col_end + 1),
        }
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        let (r0, c0, r1, c1) = self.span();
        r1.saturating_sub(r0) * c1.saturating_sub(c0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Cells<'a> {
        let (row, col_start, row_end, col_end) = self.span();
        Cells {
            variable: self.variable,
            row,
            col: col_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// `sum(<view>)`
    pub fn sum(&self) -> Expression {
        Expression::raw(format!("sum({self})"))
    }

    /// `min(<view>)`
    pub fn min(&self) -> Expression {
        Expression::raw(format!("min({self})"))
    }

    /// `max(<view>)`
    pub fn max(&self) -> Expression {
        Expression::raw(format!("max({self})"))
    }
}

impl fmt::Display for VectorView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.variable.grid();
        write!(f, "{}[{}][{}]", self.variable.name(), rows, cols)?;
        match self.selection {
            VectorSelection::Row(r) => write!(f, "[r][{r}]"),
            VectorSelection::Col(c) => write!(f, "[c][{c}]"),
            VectorSelection::Slice { .. } => {
                let (r0, c0, r1, c1) = self.span();
                write!(f, "[s][{r0}][{c0}][{r1}][{c1}]")
            }
        }
    }
}

impl From<VectorView<'_>> for Expression {
    fn from(view: VectorView<'_>) -> Self {
        Expression::raw(view.to_string())
    }
}

impl<'a> IntoIterator for VectorView<'a> {
    type Item = Expression;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

impl<'a> IntoIterator for &VectorView<'a> {
    type Item = Expression;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

/// Row-major iterator over the cells of a [`VectorView`].
#[derive(Debug, Clone)]
pub struct Cells<'a> {
    variable: &'a Variable,
    row: usize,
    col: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
}

impl Iterator for Cells<'_> {
    type Item = Expression;

    fn next(&mut self) -> Option<Expression> {
        if self.col_start >= self.col_end {
            return None;
        }
        if self.col >= self.col_end {
            self.row += 1;
            self.col = self.col_start;
        }
        if self.row >= self.row_end {
            return None;
        }
        let cell = self.variable.cell(self.row, self.col);
        self.col += 1;
        Some(cell)
    }
}
