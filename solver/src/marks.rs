//! Colour-marking for depth-first traversals. A node is either unvisited, in progress (on the
//! current path) or done. Entering a node which is in progress means the traversal went
//! around a cycle.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, PartialEq, Eq)]
pub enum Visit<N> {
    /// The node was never visited: it is now in progress
    First,
    /// The node was already fully visited
    Finished,
    /// The node is already in progress. Contains the nodes of the cycle in visitation order,
    /// closing on the repeated node
    Cycle(Vec<N>),
}

#[derive(Debug)]
pub struct Marks<N> {
    done: HashSet<N>,
    path: Vec<N>,
}

impl<N: Clone + Eq + Hash> Default for Marks<N> {
    fn default() -> Marks<N> {
        Marks {
            done: HashSet::new(),
            path: vec![],
        }
    }
}

impl<N: Clone + Eq + Hash> Marks<N> {
    pub fn new() -> Marks<N> {
        Marks::default()
    }

    pub fn enter(&mut self, node: N) -> Visit<N> {
        if self.done.contains(&node) {
            return Visit::Finished;
        }

        if let Some(start) = self.path.iter().position(|n| n == &node) {
            let mut cycle = self.path[start..].to_vec();
            cycle.push(node);

            return Visit::Cycle(cycle);
        }

        self.path.push(node);

        Visit::First
    }

    /// Mark the most recently entered node as done
    pub fn leave(&mut self) {
        if let Some(node) = self.path.pop() {
            self.done.insert(node);
        }
    }

    /// The nodes currently in progress, outermost first
    pub fn path(&self) -> &[N] {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_then_finished() {
        let mut marks = Marks::new();

        assert_eq!(marks.enter('a'), Visit::First);
        marks.leave();

        assert_eq!(marks.enter('a'), Visit::Finished);
    }

    #[test]
    fn cycle_closes_on_repeated_node() {
        let mut marks = Marks::new();

        marks.enter('a');
        marks.enter('b');
        marks.enter('c');

        assert_eq!(marks.enter('b'), Visit::Cycle(vec!['b', 'c', 'b']));
    }

    #[test]
    fn self_cycle() {
        let mut marks = Marks::new();

        marks.enter(1);

        assert_eq!(marks.enter(1), Visit::Cycle(vec![1, 1]));
    }

    #[test]
    fn path_is_outermost_first() {
        let mut marks = Marks::new();

        marks.enter("goal");
        marks.enter("dep");
        marks.enter("leaf");
        marks.leave();

        assert_eq!(marks.path(), &["goal", "dep"]);
    }
}
