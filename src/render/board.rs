use crate::game::{CellRole, Grid, Position, RenderDirective};

/// Screen-side copy of the board, kept in sync by applying render directives
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    grid: Grid,
    cells: Vec<CellRole>,
}

impl BoardView {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            cells: vec![CellRole::Blank; grid.cell_count()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn apply(&mut self, directive: &RenderDirective) {
        match *directive {
            RenderDirective::ClearBoard => self.cells.fill(CellRole::Blank),
            RenderDirective::DrawCell { position, role } => {
                // Directives outside the board are dropped
                if let Some(index) = self.grid.index_of(position) {
                    self.cells[index] = role;
                }
            }
        }
    }

    pub fn apply_all<'a>(&mut self, directives: impl IntoIterator<Item = &'a RenderDirective>) {
        for directive in directives {
            self.apply(directive);
        }
    }

    pub fn role_at(&self, pos: Position) -> CellRole {
        self.grid
            .index_of(pos)
            .map(|index| self.cells[index])
            .unwrap_or_default()
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> &[CellRole] {
        let start = y * self.grid.cols;
        &self.cells[start..start + self.grid.cols]
    }
}
