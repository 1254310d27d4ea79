use super::state::{GameState, Position};

/// What a single board cell should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellRole {
    Head,
    Body,
    #[default]
    Blank,
    Food,
}

/// Incremental drawing instruction emitted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDirective {
    DrawCell { position: Position, role: CellRole },
    ClearBoard,
}

impl RenderDirective {
    pub fn draw(position: Position, role: CellRole) -> Self {
        RenderDirective::DrawCell { position, role }
    }
}

/// Directives that repaint a board from scratch
pub fn full_redraw(state: &GameState) -> Vec<RenderDirective> {
    let mut directives = Vec::with_capacity(state.len() + 2);
    directives.push(RenderDirective::ClearBoard);

    let head = state.snake().head();
    directives.extend(
        state
            .snake()
            .segments()
            .filter(|&pos| pos != head)
            .map(|pos| RenderDirective::draw(pos, CellRole::Body)),
    );
    directives.push(RenderDirective::draw(head, CellRole::Head));
    directives.push(RenderDirective::draw(state.food(), CellRole::Food));
    directives
}
