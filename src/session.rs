//! Game session: the menu/playing state machine and everything it owns.
//!
//! A [`Session`] owns the current maze, the player, the score, and the maze generator. The
//! presentation layer feeds it [`Intent`]s translated from raw input and calls [`Session::tick`]
//! once per frame; the session answers with the [`Transition`] that took place.

use color_eyre::eyre::Result;
use log::{debug, info};

use crate::{
    collision,
    config::{GameParams, MazeParams},
    geometry::{Aabb, Vec2},
    maze::{Generator, Maze},
};

/// Top-level state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// The menu is shown; the maze is idle.
    Menu,
    /// The maze is shown and the player can move.
    Playing,
}

/// Direction of a single move intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the top of the viewport.
    Up,
    /// Towards the bottom of the viewport.
    Down,
    /// Towards the left of the viewport.
    Left,
    /// Towards the right of the viewport.
    Right,
}

impl Direction {
    /// Returns the displacement for a move of `speed` world units in this direction.
    #[must_use]
    pub fn delta(self, speed: f32) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -speed),
            Self::Down => Vec2::new(0.0, speed),
            Self::Left => Vec2::new(-speed, 0.0),
            Self::Right => Vec2::new(speed, 0.0),
        }
    }
}

/// Player intents the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Leave the menu and start playing a fresh maze.
    Start,
    /// Move the player one step.
    Move(Direction),
    /// Go back to the menu, keeping the score.
    ReturnToMenu,
}

/// Outcome of handling an intent or a frame tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// `Menu -> Playing`: a new maze was generated and the player placed at its entrance.
    Started,
    /// `Playing -> Menu`.
    ReturnedToMenu,
    /// The player moved.
    Moved,
    /// The move was refused by a wall.
    Blocked,
    /// `Playing -> Playing`: the exit was reached, the score raised, and a new maze generated.
    GoalReached {
        /// Score after the reward was added.
        score: u64,
    },
    /// Nothing happened, either because the intent does not apply in the current state or
    /// because the frame had nothing to resolve.
    Idle,
}

/// The player: a fixed-size box at a continuous position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner in world units.
    ///
    /// This field only changes through accepted moves and through resets to the entrance.
    position: Vec2,
    /// Box extent in world units.
    size: Vec2,
}

impl Player {
    /// Returns the top-left corner of the player box.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns the player box extent.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Returns the player box.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        Aabb::at(self.position, self.size)
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Session {
    /// Menu or playing.
    ///
    /// This field decides which intents are honoured; everything else is answered with
    /// [`Transition::Idle`].
    state: State,
    /// Player size, speed, and reward.
    game: GameParams,
    /// Source of new mazes.
    generator: Generator,
    /// Maze currently shown.
    ///
    /// This field is replaced on every start and every goal, and kept as is on return to the
    /// menu.
    maze: Maze,
    /// The player.
    player: Player,
    /// Points collected so far.
    ///
    /// This field only grows, saturating instead of wrapping, and survives trips to the menu.
    score: u64,
}

impl Session {
    /// Builds a session in the menu state with a first maze already generated.
    ///
    /// `seed` fixes the sequence of mazes; `None` seeds from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter set fails validation.
    pub fn new(maze: MazeParams, game: GameParams, seed: Option<u64>) -> Result<Self> {
        game.validate(&maze)?;
        let mut generator = Generator::new(maze, seed)?;
        let maze = generator.generate();

        Ok(Self {
            state: State::Menu,
            game,
            player: Player {
                position: maze.entrance_zone().position(),
                size: game.player_extent(),
            },
            generator,
            maze,
            score: 0,
        })
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the maze currently in play.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Returns the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the maze parameters.
    #[must_use]
    pub const fn maze_params(&self) -> &MazeParams {
        self.generator.params()
    }

    /// Reacts to a player intent.
    ///
    /// This function starts a game from the menu, returns to the menu from the game, and moves
    /// the player while playing. Intents that do not apply to the current state leave the
    /// session untouched.
    pub fn handle(&mut self, intent: Intent) -> Transition {
        match (self.state, intent) {
            (State::Menu, Intent::Start) => {
                self.state = State::Playing;
                self.new_maze();
                info!("game started, score {}", self.score);
                Transition::Started
            }
            (State::Playing, Intent::ReturnToMenu) => {
                self.state = State::Menu;
                info!("returned to menu, score {}", self.score);
                Transition::ReturnedToMenu
            }
            (State::Playing, Intent::Move(direction)) => self.step(direction),
            (State::Menu, Intent::Move(_) | Intent::ReturnToMenu)
            | (State::Playing, Intent::Start) => Transition::Idle,
        }
    }

    /// Resolves the goal check for the current frame.
    ///
    /// When the player overlaps the exit zone the reward is added, a new maze is generated, and
    /// the player goes back to the entrance.
    pub fn tick(&mut self) -> Transition {
        if self.state != State::Playing
            || !collision::reached_goal(&self.player.bounds(), &self.maze.exit_zone())
        {
            return Transition::Idle;
        }

        self.score = self.score.saturating_add(self.game.goal_reward);
        self.new_maze();
        info!("exit reached, score {}", self.score);

        Transition::GoalReached { score: self.score }
    }

    /// Moves the player one step if no wall is in the way.
    fn step(&mut self, direction: Direction) -> Transition {
        let delta = direction.delta(self.game.player_speed);
        let target = collision::try_move(
            self.player.position,
            delta,
            self.player.size,
            self.maze.walls(),
        );

        if target == self.player.position {
            debug!("move {direction:?} blocked at {:?}", self.player.position);
            Transition::Blocked
        } else {
            self.player.position = target;
            Transition::Moved
        }
    }

    /// Replaces the maze and puts the player on the new entrance.
    fn new_maze(&mut self) {
        self.maze = self.generator.generate();
        self.player.position = self.maze.entrance_zone().position();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, VecDeque};

    use super::*;
    use crate::maze::CellCoord;

    /// Builds a seeded session with the default parameters.
    fn default_session(seed: u64) -> Session {
        Session::new(MazeParams::default(), GameParams::default(), Some(seed))
            .expect("default parameters are valid")
    }

    /// Finds a shortest route of open cells from the entrance to the exit.
    fn route_to_exit(maze: &Maze) -> Vec<CellCoord> {
        let grid = maze.grid();
        let mut parents = BTreeMap::new();
        let mut queue = VecDeque::from([maze.start_cell()]);
        let _ = parents.insert(maze.start_cell(), maze.start_cell());

        while let Some(current) = queue.pop_front() {
            if current == maze.end_cell() {
                break;
            }
            for next in grid.neighbours(current) {
                if grid.is_path(next) && !parents.contains_key(&next) {
                    let _ = parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        let mut route = vec![maze.end_cell()];
        let mut current = maze.end_cell();
        while current != maze.start_cell() {
            current = *parents.get(&current).expect("exit must be reachable");
            route.push(current);
        }
        route.reverse();

        route
    }

    /// Returns the direction leading from one cell to an adjacent one.
    fn direction_between(from: CellCoord, to: CellCoord) -> Direction {
        if to.x > from.x {
            Direction::Right
        } else if to.x < from.x {
            Direction::Left
        } else if to.y > from.y {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    #[test]
    fn test_new_session_starts_in_menu() {
        let session = default_session(1);

        assert_eq!(session.state(), State::Menu, "sessions open on the menu");
        assert_eq!(session.score(), 0, "score starts at zero");
        assert_eq!(
            session.player().position(),
            session.maze().entrance_zone().position(),
            "player waits at the entrance"
        );
        assert_eq!(session.player().size(), Vec2::splat(20.0), "player keeps its size");
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let oversized_player = GameParams {
            player_size: 40.0,
            ..GameParams::default()
        };
        let tiny_grid = MazeParams {
            rows: 2,
            ..MazeParams::default()
        };

        assert!(
            Session::new(MazeParams::default(), oversized_player, None).is_err(),
            "player larger than a tile is rejected"
        );
        assert!(
            Session::new(tiny_grid, GameParams::default(), None).is_err(),
            "grid without an interior is rejected"
        );
    }

    #[test]
    fn test_menu_ignores_moves_and_return() {
        let mut session = default_session(2);
        let before = session.player().position();

        assert_eq!(
            session.handle(Intent::Move(Direction::Right)),
            Transition::Idle,
            "moves are ignored in the menu"
        );
        assert_eq!(
            session.handle(Intent::ReturnToMenu),
            Transition::Idle,
            "already in the menu"
        );
        assert_eq!(session.tick(), Transition::Idle, "no goal checks in the menu");
        assert_eq!(session.player().position(), before, "player did not move");
    }

    #[test]
    fn test_start_and_return() {
        let mut session = default_session(3);

        assert_eq!(session.handle(Intent::Start), Transition::Started, "menu starts game");
        assert_eq!(session.state(), State::Playing, "now playing");
        assert_eq!(
            session.handle(Intent::Start),
            Transition::Idle,
            "starting twice does nothing"
        );
        assert_eq!(
            session.handle(Intent::ReturnToMenu),
            Transition::ReturnedToMenu,
            "return goes back to the menu"
        );
        assert_eq!(session.state(), State::Menu, "back in the menu");
    }

    #[test]
    fn test_return_keeps_maze_and_score() {
        let mut session = default_session(4);
        let _ = session.handle(Intent::Start);
        let maze = session.maze().clone();

        let _ = session.handle(Intent::ReturnToMenu);

        assert_eq!(session.maze(), &maze, "returning does not regenerate");
        assert_eq!(session.score(), 0, "score survives the menu");
    }

    #[test]
    fn test_start_regenerates_and_resets_player() {
        let mut session = default_session(5);
        let _ = session.handle(Intent::Start);
        let _ = session.handle(Intent::Move(Direction::Down));
        let _ = session.handle(Intent::ReturnToMenu);

        let _ = session.handle(Intent::Start);

        assert_eq!(
            session.player().position(),
            session.maze().entrance_zone().position(),
            "a new game starts at the entrance"
        );
    }

    #[test]
    fn test_move_into_border_is_blocked() {
        let mut session = default_session(6);
        let _ = session.handle(Intent::Start);
        let start = session.player().position();

        assert_eq!(
            session.handle(Intent::Move(Direction::Up)),
            Transition::Blocked,
            "the top border sits right above the entrance"
        );
        assert_eq!(
            session.handle(Intent::Move(Direction::Left)),
            Transition::Blocked,
            "the left border sits right beside the entrance"
        );
        assert_eq!(session.player().position(), start, "blocked moves leave the player");
    }

    #[test]
    fn test_walk_to_exit_scores_and_regenerates() {
        let mut session = default_session(7);
        let _ = session.handle(Intent::Start);
        let first_maze = session.maze().clone();
        assert!(first_maze.exit_reachable(), "default exit is always reachable");

        let route = route_to_exit(&first_maze);
        assert_eq!(route.first(), Some(&CellCoord::new(1, 1)), "route starts at the entrance");
        assert_eq!(route.last(), Some(&CellCoord::new(12, 11)), "route ends at the exit");

        // Crossing one 30 unit tile takes six 5 unit steps.
        let mut outcome = Transition::Idle;
        'walk: for pair in route.windows(2) {
            let [from, to] = pair else {
                continue;
            };
            let direction = direction_between(*from, *to);
            for _ in 0..6 {
                assert_eq!(
                    session.handle(Intent::Move(direction)),
                    Transition::Moved,
                    "step {direction:?} from {from:?} towards {to:?} was blocked"
                );
                outcome = session.tick();
                if outcome != Transition::Idle {
                    break 'walk;
                }
            }
        }

        assert_eq!(outcome, Transition::GoalReached { score: 100 }, "exit awards 100");
        assert_eq!(session.score(), 100, "score recorded");
        assert_eq!(session.state(), State::Playing, "play continues on a new maze");
        assert_eq!(
            session.player().position(),
            session.maze().entrance_zone().position(),
            "player is back at the entrance"
        );
        assert_ne!(session.maze(), &first_maze, "a new maze was generated");

        let grid = session.maze().grid();
        assert!(grid.is_path(session.maze().start_cell()), "new entrance is open");
        assert!(grid.is_path(session.maze().end_cell()), "new exit is open");
        assert!(
            grid.coords()
                .filter(|coord| grid.is_border(*coord))
                .all(|coord| !grid.is_path(coord)),
            "new border is closed"
        );
    }

    #[test]
    fn test_walls_along_route_block_the_player() {
        let mut session = default_session(8);
        let _ = session.handle(Intent::Start);
        let maze = session.maze().clone();
        let params = *session.maze_params();

        for cell in route_to_exit(&maze) {
            for direction in [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ] {
                let (dx, dy) = match direction {
                    Direction::Up => (0, -1),
                    Direction::Down => (0, 1),
                    Direction::Left => (-1, 0),
                    Direction::Right => (1, 0),
                };
                let Some(wall) = cell.offset(dx, dy).filter(|next| !maze.grid().is_path(*next))
                else {
                    continue;
                };

                // Probe on a copy placed in the corner of the open cell.
                let mut trial = session.clone();
                trial.player.position = params.cell_rect(cell).position();
                for _ in 0..6 {
                    let _ = trial.handle(Intent::Move(direction));
                }

                assert!(
                    !trial.player().bounds().intersects(&params.cell_rect(wall)),
                    "player pushed from {cell:?} entered wall {wall:?}"
                );
            }
        }
    }

    #[test]
    fn test_goal_reward_accumulates() {
        let game = GameParams {
            goal_reward: 250,
            ..GameParams::default()
        };
        let mut session =
            Session::new(MazeParams::default(), game, Some(9)).expect("parameters are valid");
        let _ = session.handle(Intent::Start);

        for expected in [250, 500] {
            session.player.position = session.maze().exit_zone().position();

            assert_eq!(
                session.tick(),
                Transition::GoalReached { score: expected },
                "standing on the exit scores"
            );
        }
        assert_eq!(session.tick(), Transition::Idle, "player was sent back to the entrance");
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Up.delta(5.0), Vec2::new(0.0, -5.0), "up is negative y");
        assert_eq!(Direction::Down.delta(5.0), Vec2::new(0.0, 5.0), "down is positive y");
        assert_eq!(Direction::Left.delta(5.0), Vec2::new(-5.0, 0.0), "left is negative x");
        assert_eq!(Direction::Right.delta(5.0), Vec2::new(5.0, 0.0), "right is positive x");
    }
}
