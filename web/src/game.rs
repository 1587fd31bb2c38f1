use crate::utils::*;
use clap::Args;
use lights_out_core as game;
use game::BoardGenerator;
use yew::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    InProgress,
    Won,
    WonOnStart,
}

impl ViewGameState {
    fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::WonOnStart)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    pub seed: u64,
}

impl GameSession {
    fn new(engine: game::PlayEngine, seed: u64) -> Self {
        Self { engine, seed }
    }

    fn generate(config: game::GameConfig, seed: u64) -> game::Result<Self> {
        let board = game::RandomBoardGenerator::new(seed).generate(config)?;
        Ok(Self::new(game::PlayEngine::new(board), seed))
    }

    fn view_state(&self) -> ViewGameState {
        use game::EngineState::*;
        match self.engine.state() {
            InProgress => ViewGameState::InProgress,
            Won if self.engine.move_count() == 0 => ViewGameState::WonOnStart,
            Won => ViewGameState::Won,
        }
    }

    /// Forwards one click to the engine, returns whether a re-render is needed.
    fn flip(&mut self, coords: game::Coord2) -> bool {
        self.engine
            .flip(coords)
            .inspect_err(|err| log::warn!("flip at {:?} rejected: {}", coords, err))
            .has_update()
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.is_ok_and(|outcome| outcome.has_update())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(game::Coord2),
    NewGame,
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    row: game::Coord,
    col: game::Coord,
    lit: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Coord2>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        row,
        col,
        lit,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "cell",
        lit.then_some("lit"),
        locked.then_some("locked")
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("({}, {}) click", row, col);
        callback.emit((row, col));
    });

    html! {
        <td {class} {onclick}/>
    }
}

/// Largest accepted row or column count.
const MAX_SIDE: game::Coord = 32;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Number of rows
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    rows: game::Coord,

    /// Number of columns
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    cols: game::Coord,

    /// Chance of any cell starting lit
    #[arg(short = 'p', long, default_value_t = 0.25, allow_negative_numbers = true)]
    chance: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<String>,
}

impl GameProps {
    fn game_config(&self) -> game::GameConfig {
        if self.rows > MAX_SIDE || self.cols > MAX_SIDE {
            log::error!(
                "board {}x{} exceeds {}x{}, using defaults",
                self.rows,
                self.cols,
                MAX_SIDE,
                MAX_SIDE
            );
            return game::GameConfig::default();
        }
        game::GameConfig::new((self.rows, self.cols), self.chance).unwrap_or_else(|err| {
            log::error!("invalid game settings, using defaults: {}", err);
            game::GameConfig::default()
        })
    }

    fn initial_seed(&self) -> u64 {
        match self.seed.as_deref().map(|seed| (seed, parse_seed(seed))) {
            Some((_, Some(seed))) => seed,
            Some((raw, None)) => {
                log::warn!("could not parse seed {:?}, using a random one", raw);
                js_random_seed()
            }
            None => js_random_seed(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct GameView {
    config: game::GameConfig,
    session: GameSession,
}

impl GameView {
    fn new_session(config: game::GameConfig, seed: u64) -> GameSession {
        log::debug!("new game, seed: {}", seed);
        GameSession::generate(config, seed).expect("game config is validated on startup")
    }

    fn game_state_class(&self) -> Classes {
        classes!(match self.session.view_state() {
            ViewGameState::InProgress => "in-progress",
            ViewGameState::Won => "win",
            ViewGameState::WonOnStart => "instant-win",
        })
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let engine = &self.session.engine;
        let (rows, cols) = engine.size();

        html! {
            <table class="playable">
                {
                    for (0..rows).map(|row| html! {
                        <tr>
                            {
                                for (0..cols).map(|col| {
                                    let lit = engine.cell_at((row, col)).unwrap_or_default();
                                    let locked = !engine.can_interact_at((row, col));
                                    let callback = ctx.link().callback(Msg::Flip);
                                    html! {
                                        <CellView {row} {col} {lit} {locked} {callback}/>
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_winner(&self) -> Html {
        let message = match self.session.view_state() {
            ViewGameState::WonOnStart => "Solved before the first move!".to_string(),
            _ => format!("You won in {} moves!", self.session.engine.move_count()),
        };

        html! {
            <div class="winner">{message}</div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props.game_config();
        Self {
            config,
            session: Self::new_session(config, props.initial_seed()),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Flip(coords) => {
                if self.session.view_state().is_finished() {
                    log::debug!("ignoring flip at {:?}, game is over", coords);
                    return false;
                }
                log::debug!("flip cell: {:?}", coords);
                self.session.flip(coords)
            }
            Msg::NewGame => {
                self.session = Self::new_session(self.config, js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let is_finished = self.session.view_state().is_finished();
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="lights-out">
                <nav>
                    <aside>{format!("moves: {}", self.session.engine.move_count())}</aside>
                    <span><button class={self.game_state_class()} onclick={cb_new_game}>{"New game"}</button></span>
                    <aside>{format!("seed: {:x}", self.session.seed)}</aside>
                </nav>
                if is_finished {
                    { self.view_winner() }
                } else {
                    { self.view_board(ctx) }
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(rows: &[&[bool]]) -> GameSession {
        let board = game::Board::from_rows(rows).unwrap();
        GameSession::new(game::PlayEngine::new(board), 0)
    }

    #[test]
    fn solved_start_is_reported_as_instant_win() {
        let session = session(&[&[false, false], &[false, false]]);

        assert_eq!(session.view_state(), ViewGameState::WonOnStart);
        assert!(session.view_state().is_finished());
    }

    #[test]
    fn winning_click_finishes_session() {
        let mut session = session(&[&[true, true, false]]);

        assert_eq!(session.view_state(), ViewGameState::InProgress);
        assert!(session.flip((0, 0)));
        assert_eq!(session.view_state(), ViewGameState::Won);
    }

    #[test]
    fn clicks_after_win_do_not_update() {
        let mut session = session(&[&[true, true, false]]);
        session.flip((0, 0));

        assert!(!session.flip((0, 1)));
        assert_eq!(session.engine.move_count(), 1);
    }

    #[test]
    fn off_grid_click_does_not_update() {
        let mut session = session(&[&[true, false]]);

        assert!(!session.flip((3, 3)));
        assert_eq!(session.view_state(), ViewGameState::InProgress);
    }

    #[test]
    fn generated_session_uses_config_and_seed() {
        let config = game::GameConfig::new((4, 6), 0.5).unwrap();
        let a = GameSession::generate(config, 9).unwrap();
        let b = GameSession::generate(config, 9).unwrap();

        assert_eq!(a.engine.size(), (4, 6));
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_props_fall_back_to_default_config() {
        let props = GameProps {
            rows: 0,
            cols: 5,
            chance: 0.5,
            seed: None,
        };
        assert_eq!(props.game_config(), game::GameConfig::default());

        let props = GameProps {
            rows: 3,
            cols: 4,
            chance: 1.0,
            seed: Some("7".to_string()),
        };
        assert_eq!(
            props.game_config(),
            game::GameConfig::new((3, 4), 1.0).unwrap()
        );
    }

    #[test]
    fn oversized_props_fall_back_to_default_config() {
        let props = GameProps {
            rows: 30000,
            cols: 30000,
            chance: 0.5,
            seed: None,
        };
        assert_eq!(props.game_config(), game::GameConfig::default());

        let props = GameProps {
            rows: MAX_SIDE,
            cols: MAX_SIDE,
            chance: 0.5,
            seed: None,
        };
        assert_eq!(props.game_config().size, (MAX_SIDE, MAX_SIDE));
    }
}
