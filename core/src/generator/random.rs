use super::*;

/// Generation strategy that lights every cell independently from a seeded pseudo-random source.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let board = Board::random(&config, &mut rng)?;

        log::debug!(
            "generated {}x{} board from seed {}, {} of {} lit",
            config.rows(),
            config.cols(),
            self.seed,
            board.lit_count(),
            board.total_cells()
        );
        if board.is_won() {
            log::warn!("Generated board is already uniform, game starts won");
        }

        Ok(board)
    }
}
