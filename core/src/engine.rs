use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    InProgress,
    Won,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Won => true,
        }
    }
}

/// One game session: the current board snapshot plus the in-progress/won state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EngineSnapshot")]
pub struct PlayEngine {
    board: Board,
    state: EngineState,
    move_count: u32,
}

impl PlayEngine {
    /// A board that is already uniform starts the session in [`EngineState::Won`].
    pub fn new(board: Board) -> Self {
        let state = if board.is_won() {
            log::debug!("starting board is already uniform");
            EngineState::Won
        } else {
            EngineState::InProgress
        };
        Self {
            board,
            state,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    /// `None` for off-grid coordinates.
    pub fn cell_at(&self, coords: Coord2) -> Option<bool> {
        self.board.get(coords)
    }

    /// Number of accepted flips since the session started.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn can_interact_at(&self, coords: Coord2) -> bool {
        !self.state.is_finished() && self.board.contains(coords)
    }

    /// Applies one move. Off-grid targets are ignored, moves after the win are rejected.
    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        self.check_not_finished()?;

        if !self.board.contains(coords) {
            return Ok(FlipOutcome::NoChange);
        }

        self.board = self.board.flip(coords);
        self.move_count = self.move_count.saturating_add(1);

        if self.board.is_won() {
            log::debug!("won after {} moves", self.move_count);
            self.state = EngineState::Won;
            Ok(FlipOutcome::Won)
        } else {
            Ok(FlipOutcome::Flipped)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

/// Serialized engine fields; the state is derived from the board on load.
#[derive(Deserialize)]
struct EngineSnapshot {
    board: Board,
    move_count: u32,
}

impl From<EngineSnapshot> for PlayEngine {
    fn from(snapshot: EngineSnapshot) -> Self {
        Self {
            move_count: snapshot.move_count,
            ..Self::new(snapshot.board)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&[bool]]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn uniform_start_is_already_won() {
        let engine = PlayEngine::new(Board::uniform((5, 5), false).unwrap());

        assert_eq!(engine.state(), EngineState::Won);
        assert!(engine.is_finished());
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn mixed_start_is_in_progress() {
        let engine = PlayEngine::new(board(&[&[true, false], &[false, false]]));

        assert_eq!(engine.state(), EngineState::InProgress);
        assert!(engine.can_interact_at((0, 0)));
        assert!(!engine.can_interact_at((2, 0)));
    }

    #[test]
    fn flip_that_uniforms_board_wins() {
        // single centre click away from all-lit
        let mut engine = PlayEngine::new(board(&[
            &[true, false, true],
            &[false, false, false],
            &[true, false, true],
        ]));

        assert_eq!(engine.flip((1, 1)).unwrap(), FlipOutcome::Won);
        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.board(), &Board::uniform((3, 3), true).unwrap());
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn flips_after_win_are_rejected() {
        let mut engine = PlayEngine::new(board(&[&[true, false, true]]));

        assert_eq!(engine.flip((0, 0)).unwrap(), FlipOutcome::Flipped);
        assert_eq!(engine.board(), &board(&[&[false, true, true]]));
        assert_eq!(engine.flip((0, 2)).unwrap(), FlipOutcome::Won);

        let snapshot = engine.board().clone();
        assert_eq!(engine.flip((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(engine.board(), &snapshot);
        assert_eq!(engine.move_count(), 2);
    }

    #[test]
    fn off_grid_flip_is_no_change() {
        let mut engine = PlayEngine::new(board(&[&[true, false], &[false, false]]));
        let before = engine.clone();

        assert_eq!(engine.flip((-1, 0)).unwrap(), FlipOutcome::NoChange);
        assert_eq!(engine.flip((0, 2)).unwrap(), FlipOutcome::NoChange);
        assert!(!FlipOutcome::NoChange.has_update());
        assert_eq!(engine, before);
    }

    #[test]
    fn previous_snapshots_survive_flips() {
        let mut engine = PlayEngine::new(board(&[&[true, false], &[false, false]]));
        let before = engine.board().clone();

        engine.flip((1, 1)).unwrap();

        assert_ne!(engine.board(), &before);
        assert!(before[(0, 0)]);
        assert!(!before[(1, 1)]);
    }

    #[test]
    fn engine_state_serializes_by_name() {
        let engine = PlayEngine::new(board(&[&[true, false]]));
        let json = serde_json::to_value(&engine).unwrap();

        assert_eq!(json["state"], "InProgress");
        assert_eq!(json["move_count"], 0);
    }

    #[test]
    fn deserialized_state_follows_board() {
        let json = r#"{"board":{"v":1,"dim":[1,2],"data":[true,true]},"state":"InProgress","move_count":3}"#;
        let mut engine: PlayEngine = serde_json::from_str(json).unwrap();

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.move_count(), 3);
        assert_eq!(engine.flip((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn engine_survives_json() {
        let mut engine = PlayEngine::new(board(&[&[true, false, true]]));
        engine.flip((0, 0)).unwrap();

        let json = serde_json::to_string(&engine).unwrap();
        assert_eq!(serde_json::from_str::<PlayEngine>(&json).unwrap(), engine);
    }

    #[test]
    fn cell_at_is_none_off_grid() {
        let engine = PlayEngine::new(board(&[&[true, false]]));

        assert_eq!(engine.cell_at((0, 0)), Some(true));
        assert_eq!(engine.cell_at((0, 1)), Some(false));
        assert_eq!(engine.cell_at((0, 2)), None);
        assert_eq!(engine.cell_at((-1, 0)), None);
    }
}
