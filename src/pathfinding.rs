use std::collections::VecDeque;

use crate::graph::BoardGraph;
use crate::grid::{Cell, Node, NUM_NODES};

/// Calculate the shortest route from a cell to a goal node using BFS.
///
/// # Arguments
/// * `graph` - The move graph for the current position
/// * `start` - Cell the token stands on
/// * `goal` - `GoalNorth` or `GoalSouth`
///
/// # Returns
/// The cells visited after `start`, ending on the goal row (empty when `start`
/// is already on it), or `None` when the goal cannot be reached.
pub fn shortest_path(graph: &BoardGraph, start: Cell, goal: Node) -> Option<Vec<Cell>> {
    let start_node = Node::from(start);
    let mut parent: [Option<usize>; NUM_NODES] = [None; NUM_NODES];
    let mut visited = [false; NUM_NODES];
    visited[start_node.index()] = true;

    let mut queue = VecDeque::with_capacity(NUM_NODES);
    queue.push_back(start_node);

    while let Some(node) = queue.pop_front() {
        if node == goal {
            // Walk back from the goal, dropping the goal node and the start
            let mut path = Vec::new();
            let mut current = parent[goal.index()];
            while let Some(index) = current {
                if index == start_node.index() {
                    break;
                }
                if let Some(cell) = Node::from_index(index).cell() {
                    path.push(cell);
                }
                current = parent[index];
            }
            path.reverse();
            return Some(path);
        }

        for next in graph.successors(node) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                parent[next.index()] = Some(node.index());
                queue.push_back(next);
            }
        }
    }

    None
}

/// Number of token moves needed to reach the goal, `None` if unreachable.
pub fn distance_to_goal(graph: &BoardGraph, start: Cell, goal: Node) -> Option<usize> {
    shortest_path(graph, start, goal).map(|path| path.len())
}

/// Whether any route at all leads from `start` to `goal`.
pub fn has_path(graph: &BoardGraph, start: Cell, goal: Node) -> bool {
    let mut visited = [false; NUM_NODES];
    let mut stack = vec![Node::from(start)];
    visited[Node::from(start).index()] = true;

    while let Some(node) = stack.pop() {
        if node == goal {
            return true;
        }
        for next in graph.successors(node) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                stack.push(next);
            }
        }
    }

    false
}
