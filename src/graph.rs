//! The admissible-move graph.
//!
//! The graph is a derived view of the game: it is rebuilt from the two player
//! positions and the wall lists whenever it is needed and never patched in
//! place. Each node stores its successors as a bitset, so a full rebuild is a
//! few hundred bit operations.

use crate::grid::{Cell, Node, Orientation, Wall, BOARD_SIZE, NUM_NODES};

/// Directed graph of single-step token moves over the 81 cells and the two
/// goal nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardGraph {
    successors: [u128; NUM_NODES],
}

impl BoardGraph {
    /// Graph with no edges at all.
    fn empty() -> Self {
        Self {
            successors: [0; NUM_NODES],
        }
    }

    /// Build the move graph for the given positions and walls.
    ///
    /// # Arguments
    /// * `positions` - Cells of player 1 and player 2
    /// * `horizontal` - Anchors of the placed horizontal walls
    /// * `vertical` - Anchors of the placed vertical walls
    pub fn build(positions: [Cell; 2], horizontal: &[Cell], vertical: &[Cell]) -> Self {
        let mut graph = Self::empty();

        // Plain grid moves
        for cell in Cell::all() {
            for neighbor in cell.neighbors() {
                graph.add_edge(cell.into(), neighbor.into());
            }
        }

        let walls = horizontal
            .iter()
            .map(|&anchor| Wall::new(anchor, Orientation::Horizontal))
            .chain(vertical.iter().map(|&anchor| Wall::new(anchor, Orientation::Vertical)));
        for wall in walls {
            for (a, b) in wall.blocked_edges() {
                graph.remove_cell_edge(a, b);
                graph.remove_cell_edge(b, a);
            }
        }

        graph.add_jumps(positions[0], positions[1]);

        for x in 1..=BOARD_SIZE {
            graph.add_edge(Cell::new(x, BOARD_SIZE).into(), Node::GoalNorth);
            graph.add_edge(Cell::new(x, 1).into(), Node::GoalSouth);
        }

        graph
    }

    /// Replace the direct edges between adjacent players by jump edges.
    fn add_jumps(&mut self, p1: Cell, p2: Cell) {
        if !(self.has_edge(p1.into(), p2.into()) || self.has_edge(p2.into(), p1.into())) {
            return;
        }

        self.remove_edge(p1.into(), p2.into());
        self.remove_edge(p2.into(), p1.into());

        // Both targets are computed before any jump edge is added so that one
        // player's jumps never feed into the other's.
        let p1_targets = self.jump_targets(p1, p2);
        let p2_targets = self.jump_targets(p2, p1);
        for target in p1_targets {
            self.add_edge(p1.into(), target.into());
        }
        for target in p2_targets {
            self.add_edge(p2.into(), target.into());
        }
    }

    /// Cells reachable from `from` by jumping over the adjacent `over`.
    ///
    /// The straight jump when the square behind `over` is open, otherwise every
    /// square `over` can still step to (the diagonal jumps).
    fn jump_targets(&self, from: Cell, over: Cell) -> Vec<Cell> {
        let straight = from.jump_over(over);
        if straight.is_on_board() && self.has_edge(over.into(), straight.into()) {
            return vec![straight];
        }
        self.cell_successors(over)
    }

    #[inline]
    fn add_edge(&mut self, from: Node, to: Node) {
        self.successors[from.index()] |= 1u128 << to.index();
    }

    /// Removing an absent edge is a no-op.
    #[inline]
    fn remove_edge(&mut self, from: Node, to: Node) {
        self.successors[from.index()] &= !(1u128 << to.index());
    }

    fn remove_cell_edge(&mut self, from: Cell, to: Cell) {
        if from.is_on_board() && to.is_on_board() {
            self.remove_edge(from.into(), to.into());
        }
    }

    pub fn has_edge(&self, from: Node, to: Node) -> bool {
        self.successors[from.index()] & (1u128 << to.index()) != 0
    }

    /// Successors of a node in ascending node order (cells first, then goals).
    pub fn successors(&self, node: Node) -> impl Iterator<Item = Node> {
        let mut bits = self.successors[node.index()];
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Node::from_index(index))
        })
    }

    /// Cell successors of a cell, goal nodes left out.
    pub fn cell_successors(&self, cell: Cell) -> Vec<Cell> {
        self.successors(cell.into()).filter_map(|node| node.cell()).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    /// All edges, ordered by source then destination.
    pub fn edges(&self) -> Vec<(Node, Node)> {
        (0..NUM_NODES)
            .map(Node::from_index)
            .flat_map(|from| self.successors(from).map(move |to| (from, to)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::NUM_CELLS;

    const START: [Cell; 2] = [Cell::new(5, 1), Cell::new(5, 9)];

    /// Directed edges of the bare 9x9 grid.
    const GRID_EDGES: usize = 2 * 2 * 9 * 8;

    fn cell_edge(graph: &BoardGraph, a: (i32, i32), b: (i32, i32)) -> bool {
        graph.has_edge(Cell::from(a).into(), Cell::from(b).into())
    }

    fn cell_edge_count(graph: &BoardGraph) -> usize {
        graph
            .edges()
            .iter()
            .filter(|(from, to)| from.cell().is_some() && to.cell().is_some())
            .count()
    }

    #[test]
    fn test_wall_free_graph_is_grid() {
        let graph = BoardGraph::build(START, &[], &[]);

        for cell in Cell::all() {
            let mut successors = graph.cell_successors(cell);
            let mut expected: Vec<Cell> = cell.neighbors().collect();
            successors.sort();
            expected.sort();
            assert_eq!(successors, expected, "successors of {}", cell);

            for neighbor in expected {
                assert!(graph.has_edge(neighbor.into(), cell.into()));
            }
        }
        assert_eq!(cell_edge_count(&graph), GRID_EDGES);
    }

    #[test]
    fn test_goal_edges() {
        let graph = BoardGraph::build(START, &[], &[]);

        for x in 1..=9 {
            assert!(graph.has_edge(Cell::new(x, 9).into(), Node::GoalNorth));
            assert!(graph.has_edge(Cell::new(x, 1).into(), Node::GoalSouth));
            assert!(!graph.has_edge(Cell::new(x, 5).into(), Node::GoalNorth));
        }
        assert_eq!(graph.successors(Node::GoalNorth).count(), 0);
        assert_eq!(graph.edge_count(), GRID_EDGES + 18);
    }

    #[test]
    fn test_horizontal_wall_removes_four_edges() {
        let bare = BoardGraph::build(START, &[], &[]);
        let graph = BoardGraph::build(START, &[Cell::new(4, 4)], &[]);

        assert_eq!(bare.edge_count() - graph.edge_count(), 4);
        assert!(!cell_edge(&graph, (4, 3), (4, 4)));
        assert!(!cell_edge(&graph, (4, 4), (4, 3)));
        assert!(!cell_edge(&graph, (5, 3), (5, 4)));
        assert!(!cell_edge(&graph, (5, 4), (5, 3)));

        // Everything else is untouched
        let removed: Vec<(Node, Node)> = bare
            .edges()
            .into_iter()
            .filter(|&(from, to)| !graph.has_edge(from, to))
            .collect();
        assert_eq!(removed.len(), 4);
    }

    #[test]
    fn test_vertical_wall_removes_four_edges() {
        let bare = BoardGraph::build(START, &[], &[]);
        let graph = BoardGraph::build(START, &[], &[Cell::new(5, 3)]);

        assert_eq!(bare.edge_count() - graph.edge_count(), 4);
        assert!(!cell_edge(&graph, (4, 3), (5, 3)));
        assert!(!cell_edge(&graph, (5, 4), (4, 4)));
    }

    #[test]
    fn test_disjoint_walls_remove_disjoint_edges() {
        let bare = BoardGraph::build(START, &[], &[]);
        let graph = BoardGraph::build(START, &[Cell::new(1, 8)], &[Cell::new(7, 2)]);

        assert_eq!(bare.edge_count() - graph.edge_count(), 8);
        // The horizontal wall's edges stay gone, the vertical wall's are its own
        assert!(!cell_edge(&graph, (1, 7), (1, 8)));
        assert!(!cell_edge(&graph, (6, 2), (7, 2)));
        assert!(cell_edge(&graph, (6, 7), (7, 7)));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let positions = [Cell::new(3, 4), Cell::new(3, 5)];
        let horizontal = [Cell::new(2, 6), Cell::new(6, 3)];
        let vertical = [Cell::new(5, 5), Cell::new(8, 1)];

        let first = BoardGraph::build(positions, &horizontal, &vertical);
        let second = BoardGraph::build(positions, &horizontal, &vertical);
        assert_eq!(first, second);
        assert_eq!(first.edges(), second.edges());
    }

    #[test]
    fn test_straight_jump() {
        let p1 = Cell::new(5, 4);
        let p2 = Cell::new(5, 5);
        let graph = BoardGraph::build([p1, p2], &[], &[]);

        let mut successors = graph.cell_successors(p1);
        successors.sort();
        assert_eq!(
            successors,
            vec![Cell::new(4, 4), Cell::new(5, 3), Cell::new(5, 6), Cell::new(6, 4)]
        );
        assert!(!graph.has_edge(p1.into(), p2.into()));
        assert!(!graph.has_edge(p2.into(), p1.into()));
        assert!(graph.has_edge(p2.into(), Cell::new(5, 3).into()));

        // One jump edge gained per player, one direct edge lost per player
        let bare = BoardGraph::build(START, &[], &[]);
        assert_eq!(cell_edge_count(&graph), cell_edge_count(&bare));
    }

    #[test]
    fn test_diagonal_jump_when_blocked_behind() {
        let p1 = Cell::new(5, 4);
        let p2 = Cell::new(5, 5);
        // Horizontal wall between rows 5 and 6 at columns 5-6
        let graph = BoardGraph::build([p1, p2], &[Cell::new(5, 6)], &[]);

        let mut successors = graph.cell_successors(p1);
        successors.sort();
        assert_eq!(
            successors,
            vec![
                Cell::new(4, 4),
                Cell::new(4, 5),
                Cell::new(5, 3),
                Cell::new(6, 4),
                Cell::new(6, 5),
            ]
        );
        assert!(!successors.contains(&Cell::new(5, 6)));
        assert!(!successors.contains(&p2));
    }

    #[test]
    fn test_diagonal_jump_skips_walled_side() {
        let p1 = Cell::new(5, 4);
        let p2 = Cell::new(5, 5);
        // Behind blocked, and a vertical wall on the opponent's right side
        let graph = BoardGraph::build([p1, p2], &[Cell::new(5, 6)], &[Cell::new(6, 4)]);

        let successors = graph.cell_successors(p1);
        assert!(successors.contains(&Cell::new(4, 5)));
        assert!(!successors.contains(&Cell::new(6, 5)));
    }

    #[test]
    fn test_jump_at_board_edge_goes_diagonal() {
        let p1 = Cell::new(5, 8);
        let p2 = Cell::new(5, 9);
        let graph = BoardGraph::build([p1, p2], &[], &[]);

        let successors = graph.cell_successors(p1);
        assert!(successors.contains(&Cell::new(4, 9)));
        assert!(successors.contains(&Cell::new(6, 9)));
        assert!(!successors.contains(&p2));
        // Player 2 jumps straight down over player 1
        assert!(graph.has_edge(p2.into(), Cell::new(5, 7).into()));
    }

    #[test]
    fn test_players_separated_by_wall_do_not_jump() {
        let p1 = Cell::new(5, 4);
        let p2 = Cell::new(5, 5);
        let graph = BoardGraph::build([p1, p2], &[Cell::new(4, 5)], &[]);

        assert!(!graph.has_edge(p1.into(), Cell::new(5, 6).into()));
        assert!(!graph.has_edge(p1.into(), p2.into()));
        assert_eq!(graph.cell_successors(p1).len(), 3);
    }

    #[test]
    fn test_node_count() {
        assert_eq!(NUM_NODES, NUM_CELLS + 2);
        let graph = BoardGraph::build(START, &[], &[]);
        assert_eq!(graph.edges().len(), graph.edge_count());
    }
}
