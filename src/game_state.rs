//! Authoritative game state and the engine entry points that mutate it.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RuleResult, RuleViolation};
use crate::graph::BoardGraph;
use crate::grid::{goal_node, goal_row, Cell, Orientation, Wall, BOARD_SIZE, MAX_WALLS, TOTAL_WALLS};
use crate::pathfinding::has_path;
use crate::validation::{
    check_paths_remain, check_wall_bounds, check_wall_free, player_index, validate_move,
    validate_wall,
};

/// One player's public record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub walls: u8,
    pub position: Cell,
}

impl PlayerRecord {
    /// Record for a player at their starting square: (5, 1) for player 1 and
    /// (5, 9) for player 2.
    pub fn starting(name: impl Into<String>, player: u8, walls: u8) -> Self {
        let x = (BOARD_SIZE + 1) / 2;
        let y = if player == 1 { 1 } else { BOARD_SIZE };
        Self {
            name: name.into(),
            walls,
            position: Cell::new(x, y),
        }
    }
}

/// Anchors of every placed wall, one list per orientation, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallLists {
    pub horizontal: Vec<Cell>,
    pub vertical: Vec<Cell>,
}

impl WallLists {
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn anchors(&self, orientation: Orientation) -> &[Cell] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    /// A copy of the lists with `wall` appended.
    pub fn with(&self, wall: Wall) -> WallLists {
        let mut walls = self.clone();
        walls.push(wall);
        walls
    }

    pub(crate) fn push(&mut self, wall: Wall) {
        match wall.orientation {
            Orientation::Horizontal => self.horizontal.push(wall.anchor),
            Orientation::Vertical => self.vertical.push(wall.anchor),
        }
    }

    /// Every placed wall, horizontal ones first.
    pub fn iter(&self) -> impl Iterator<Item = Wall> + '_ {
        self.horizontal
            .iter()
            .map(|&anchor| Wall::new(anchor, Orientation::Horizontal))
            .chain(
                self.vertical
                    .iter()
                    .map(|&anchor| Wall::new(anchor, Orientation::Vertical)),
            )
    }
}

/// Everything that defines a game: both players and the placed walls.
///
/// This is also the snapshot handed to renderers and serializers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: [PlayerRecord; 2],
    pub walls: WallLists,
}

impl GameState {
    pub fn positions(&self) -> [Cell; 2] {
        [self.players[0].position, self.players[1].position]
    }

    /// Build the move graph for this state.
    pub fn graph(&self) -> BoardGraph {
        BoardGraph::build(self.positions(), &self.walls.horizontal, &self.walls.vertical)
    }
}

/// How the two players of a new game are described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSetup {
    /// Display names only; players start on (5, 1) and (5, 9) with 10 walls.
    ByNames([String; 2]),
    /// Complete records, e.g. to resume a game.
    ByRecords([PlayerRecord; 2]),
}

impl PlayerSetup {
    pub fn by_names(player1: impl Into<String>, player2: impl Into<String>) -> Self {
        PlayerSetup::ByNames([player1.into(), player2.into()])
    }

    fn into_records(self) -> [PlayerRecord; 2] {
        match self {
            PlayerSetup::ByNames([name1, name2]) => [
                PlayerRecord::starting(name1, 1, MAX_WALLS),
                PlayerRecord::starting(name2, 2, MAX_WALLS),
            ],
            PlayerSetup::ByRecords(records) => records,
        }
    }
}

fn check_records(records: &[PlayerRecord; 2]) -> RuleResult<()> {
    let malformed = |reason: String| Err(RuleViolation::MalformedPlayers(reason));

    for (index, record) in records.iter().enumerate() {
        let number = index + 1;
        if record.name.trim().is_empty() {
            return malformed(format!("player {} has an empty name", number));
        }
        if !record.position.is_on_board() {
            return malformed(format!(
                "player {} stands off the board at {}",
                number, record.position
            ));
        }
        if record.walls > MAX_WALLS {
            return malformed(format!(
                "player {} holds {} walls, at most {} allowed",
                number, record.walls, MAX_WALLS
            ));
        }
    }
    if records[0].position == records[1].position {
        return malformed(format!("both players stand on {}", records[0].position));
    }
    Ok(())
}

/// A game of Quoridor.
///
/// All mutation goes through [`Quoridor::move_token`] and
/// [`Quoridor::place_wall`]; each validates against a freshly built move graph
/// before touching the state, so a rejected request leaves the game unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoridor {
    state: GameState,
}

impl Quoridor {
    /// Start a game with no walls on the board.
    pub fn new(setup: PlayerSetup) -> RuleResult<Self> {
        Self::with_walls(setup, WallLists::default())
    }

    /// Start a game with walls already on the board.
    ///
    /// Each wall is checked against the ones before it with the same bounds,
    /// overlap, crossing and open-path rules as [`Quoridor::place_wall`].
    pub fn with_walls(setup: PlayerSetup, walls: WallLists) -> RuleResult<Self> {
        let players = setup.into_records();
        check_records(&players)?;

        let in_hand: usize = players.iter().map(|p| p.walls as usize).sum();
        if walls.len() + in_hand > TOTAL_WALLS {
            return Err(RuleViolation::MalformedPlayers(format!(
                "{} walls placed and {} in hand, only {} exist",
                walls.len(),
                in_hand,
                TOTAL_WALLS
            )));
        }

        let positions = [players[0].position, players[1].position];
        let mut accepted = WallLists::default();
        for wall in walls.iter() {
            check_wall_bounds(wall)?;
            check_wall_free(&accepted, wall)?;
            check_paths_remain(positions, &accepted, wall)?;
            accepted.push(wall);
        }

        Ok(Self {
            state: GameState {
                players,
                walls: accepted,
            },
        })
    }

    /// Resume a game from a snapshot taken with [`Quoridor::snapshot`].
    pub fn from_snapshot(snapshot: GameState) -> RuleResult<Self> {
        Self::with_walls(PlayerSetup::ByRecords(snapshot.players), snapshot.walls)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// An owned copy of the full state, suitable for serialization.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn player(&self, player: u8) -> RuleResult<&PlayerRecord> {
        Ok(&self.state.players[player_index(player)?])
    }

    pub fn graph(&self) -> BoardGraph {
        self.state.graph()
    }

    /// Move `player`'s token to `destination`.
    pub fn move_token(&mut self, player: u8, destination: Cell) -> RuleResult<()> {
        validate_move(&self.state, player, destination)?;

        let index = player_index(player)?;
        self.state.players[index].position = destination;
        debug!("player {} moved to {}", player, destination);
        Ok(())
    }

    /// Place a wall for `player` and take it out of their hand.
    pub fn place_wall(&mut self, player: u8, anchor: Cell, orientation: Orientation) -> RuleResult<()> {
        let wall = Wall::new(anchor, orientation);
        validate_wall(&self.state, player, wall)?;

        let index = player_index(player)?;
        self.state.walls.push(wall);
        self.state.players[index].walls -= 1;
        debug!(
            "player {} placed a {} ({} left)",
            player, wall, self.state.players[index].walls
        );
        Ok(())
    }

    /// Number of the winning player, if the game is decided.
    ///
    /// A player who can no longer reach their goal has lost; otherwise a player
    /// standing on their goal row has won.
    pub fn winner_number(&self) -> Option<u8> {
        let graph = self.graph();
        let positions = self.state.positions();

        if !has_path(&graph, positions[0], goal_node(1)) {
            return Some(2);
        }
        if !has_path(&graph, positions[1], goal_node(2)) {
            return Some(1);
        }
        (1..=2u8).find(|&player| positions[player as usize - 1].y == goal_row(player))
    }

    /// Name of the winning player, `None` while the game is still open.
    pub fn winner(&self) -> Option<&str> {
        self.winner_number()
            .map(|player| self.state.players[player as usize - 1].name.as_str())
    }

    pub fn is_over(&self) -> bool {
        self.winner_number().is_some()
    }
}
