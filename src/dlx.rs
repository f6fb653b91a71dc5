use std::collections::{HashMap, HashSet};

use log::error;

use crate::error::SolveError;
use crate::problem::Problem;

// This is a from-scratch, index-arena rewrite of Knuth's dancing links (DLX)
// technique, generalized over arbitrary `Problem` constraint models instead
// of being hardcoded for a single puzzle family. Node layout and the
// cover/uncover traversal follow Knuth's canonical formulation.

#[derive(Debug, Clone, Copy)]
enum Direction {
    Prev,
    Next,
    Up,
    Down,
}

impl Direction {
    fn opposite(&self) -> Self {
        match self {
            Direction::Prev => Direction::Next,
            Direction::Next => Direction::Prev,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Node of the DLX matrix.
#[derive(Debug, Clone, Copy)]
struct Node {
    /// Links in the order (prev, next, up, down).
    links: [usize; 4],
    value: Point,
}

impl Node {
    fn new(value: Point) -> Self {
        Self {
            links: [!0; 4],
            value,
        }
    }

    fn get_link(&self, dir: Direction) -> usize {
        self.links[dir as usize]
    }

    fn set_link(&mut self, idx: usize, dir: Direction) -> &mut Self {
        self.links[dir as usize] = idx;
        self
    }
}

/// Value stored inside a DLX node.
#[derive(Debug, Clone, Copy)]
enum Point {
    /// Singleton root sentinel.
    Root,
    /// Column head with the number of live data nodes in the column.
    Column(usize),
    /// Row body item, carrying the index of its column header.
    Body(usize),
}

impl Point {
    fn size(&self) -> usize {
        match *self {
            Point::Column(x) => x,
            Point::Root | Point::Body(_) => {
                error!("attempted to read the live-count of a non-column node");
                0
            }
        }
    }

    fn column_idx(&self) -> usize {
        match *self {
            Point::Body(x) => x,
            Point::Root | Point::Column(_) => {
                error!("attempted to read the column of a non-body node");
                0
            }
        }
    }

    fn size_mut(&mut self) -> &mut usize {
        match self {
            Point::Column(x) => x,
            Point::Root | Point::Body(_) => {
                error!("attempted to mutate the live-count of a non-column node");
                unreachable!("cover/uncover must only touch column headers")
            }
        }
    }
}

/// Borrowless walker over one of the four link axes of the toroidal matrix.
struct Walker {
    idx: usize,
    start: usize,
}

impl Walker {
    fn from(start: usize) -> Self {
        Self { idx: start, start }
    }

    fn next(&mut self, matrix: &Matrix, dir: Direction) -> Option<usize> {
        let next = matrix.nodes[self.idx].get_link(dir);
        self.idx = next;

        assert_ne!(next, !0, "invalid link encountered during traversal");

        if next == self.start {
            return None;
        }

        Some(next)
    }
}

/// The toroidal doubly-linked sparse matrix: node arena plus cover/uncover.
///
/// Node 0 is always the root sentinel. Nodes `1..=num_columns` are the
/// column headers, in encoding order. Everything after that is row body
/// data, grouped contiguously per row.
#[derive(Debug)]
pub struct Matrix {
    nodes: Vec<Node>,
    num_columns: usize,
    /// Start index (into `nodes`) of each candidate row, in insertion order.
    row_starts: Vec<usize>,
    /// `(row, col, value)` identity of each candidate row, parallel to `row_starts`.
    identities: Vec<(usize, usize, usize)>,
    /// One data-node handle per candidate identity, for the seeder to look up.
    candidate_index: HashMap<(usize, usize, usize), usize>,
}

const ROOT: usize = 0;

impl Matrix {
    /// Builds a fresh matrix from a problem's constraint model. Each call
    /// builds a brand new arena. The engine retains no state across calls.
    pub fn build<P: Problem + ?Sized>(problem: &P) -> Self {
        let num_columns = problem.num_columns();
        let mut nodes = Vec::with_capacity(num_columns + 1);
        nodes.push(Node::new(Point::Root));
        nodes.extend((0..num_columns).map(|_| Node::new(Point::Column(0))));

        for (idx, node) in nodes.iter_mut().enumerate() {
            node.set_link(idx, Direction::Up).set_link(idx, Direction::Down);
        }
        for idx in 0..nodes.len() {
            let next = (idx + 1) % nodes.len();
            let prev = (idx + nodes.len() - 1) % nodes.len();
            nodes[idx].set_link(next, Direction::Next).set_link(prev, Direction::Prev);
        }

        let mut matrix = Matrix {
            nodes,
            num_columns,
            row_starts: Vec::new(),
            identities: Vec::new(),
            candidate_index: HashMap::new(),
        };

        for candidate in problem.candidates() {
            matrix.append_row(&candidate.columns, candidate.identity());
        }

        matrix
    }

    fn append_to_column(&mut self, col: usize, node_idx: usize) {
        let old_end = self.nodes[col].get_link(Direction::Up);
        self.nodes[col].set_link(node_idx, Direction::Up);
        *self.nodes[col].value.size_mut() += 1;
        self.nodes[old_end].set_link(node_idx, Direction::Down);
        self.nodes[node_idx]
            .set_link(old_end, Direction::Up)
            .set_link(col, Direction::Down);
    }

    fn append_row(&mut self, columns: &[usize], identity: (usize, usize, usize)) {
        assert!(!columns.is_empty(), "a candidate row must cover at least one column");

        let start = self.nodes.len();

        for &col in columns {
            assert!(
                col >= 1 && col <= self.num_columns,
                "column {} outside of [1, {}]",
                col,
                self.num_columns
            );
            self.nodes.push(Node::new(Point::Body(col)));
        }

        let end = self.nodes.len();

        for (offset, &col) in columns.iter().enumerate() {
            self.append_to_column(col, start + offset);
        }

        for offset in 0..columns.len() {
            let node_idx = start + offset;
            let prev = if offset == 0 { end - 1 } else { node_idx - 1 };
            let next = if offset + 1 == columns.len() { start } else { node_idx + 1 };
            self.nodes[node_idx]
                .set_link(prev, Direction::Prev)
                .set_link(next, Direction::Next);
        }

        self.row_starts.push(start);
        self.identities.push(identity);
        self.candidate_index.insert(identity, start);
    }

    fn remove(&mut self, idx: usize, dir: Direction) {
        let opp = dir.opposite();
        let r = self.nodes[idx].get_link(dir);
        let l = self.nodes[idx].get_link(opp);
        self.nodes[r].set_link(l, opp);
        self.nodes[l].set_link(r, dir);
    }

    fn restore(&mut self, idx: usize, dir: Direction) {
        let opp = dir.opposite();
        let r = self.nodes[idx].get_link(dir);
        let l = self.nodes[idx].get_link(opp);
        self.nodes[r].set_link(idx, opp);
        self.nodes[l].set_link(idx, dir);
    }

    /// Unlinks column `col` from the column ring and every row intersecting
    /// it from all other columns.
    fn cover(&mut self, col: usize) {
        assert_ne!(col, ROOT, "cover() called on the root sentinel");

        self.remove(col, Direction::Next);

        let mut rows = Walker::from(col);
        while let Some(i) = rows.next(self, Direction::Down) {
            let mut cells = Walker::from(i);
            while let Some(j) = cells.next(self, Direction::Next) {
                self.remove(j, Direction::Down);
                let owner = self.nodes[j].value.column_idx();
                *self.nodes[owner].value.size_mut() -= 1;
            }
        }
    }

    /// The exact mirror of [`Matrix::cover`]: bottom-to-top, each row
    /// right-to-left, so the last step of cover undoes as the first step of
    /// uncover.
    fn uncover(&mut self, col: usize) {
        let mut rows = Walker::from(col);
        while let Some(i) = rows.next(self, Direction::Up) {
            let mut cells = Walker::from(i);
            while let Some(j) = cells.next(self, Direction::Prev) {
                self.restore(j, Direction::Down);
                let owner = self.nodes[j].value.column_idx();
                *self.nodes[owner].value.size_mut() += 1;
            }
        }

        self.restore(col, Direction::Next);
    }

    fn col_size(&self, col: usize) -> usize {
        self.nodes[col].value.size()
    }

    /// Covers the whole row starting at `node`, inclusive of `node`'s own
    /// column, Knuth's canonical formulation for seeding a forced choice.
    /// `covered` dedups across multiple seeded clues: two clues that share a
    /// constraint column (a contradictory puzzle) must not cover that column
    /// twice, or the column's live-count would be decremented twice for the
    /// same node.
    fn cover_row_inclusive(&mut self, node: usize, covered: &mut HashSet<usize>) {
        let mut cols = vec![self.nodes[node].value.column_idx()];
        let mut cells = Walker::from(node);
        while let Some(j) = cells.next(self, Direction::Next) {
            cols.push(self.nodes[j].value.column_idx());
        }

        for col in cols {
            if covered.insert(col) {
                self.cover(col);
            }
        }
    }

    fn cover_row_siblings(&mut self, node: usize) {
        let mut cells = Walker::from(node);
        while let Some(j) = cells.next(self, Direction::Next) {
            self.cover(self.nodes[j].value.column_idx());
        }
    }

    fn uncover_row_siblings(&mut self, node: usize) {
        let mut cells = Walker::from(node);
        while let Some(j) = cells.next(self, Direction::Prev) {
            self.uncover(self.nodes[j].value.column_idx());
        }
    }

    fn row_index_of(&self, node: usize) -> usize {
        let pos = self.row_starts.partition_point(|&start| start <= node);
        assert_ne!(pos, 0, "node precedes the first candidate row");
        pos - 1
    }

    fn identity_of(&self, node: usize) -> (usize, usize, usize) {
        self.identities[self.row_index_of(node)]
    }

    /// Forces the clues in `grid` into the solution and covers their rows.
    /// Returns the forced node handles, in the order they were seeded.
    ///
    /// `grid` must already have been validated for shape by the caller.
    pub fn seed(&mut self, grid: &[Vec<usize>]) -> Result<Vec<usize>, SolveError> {
        let mut forced = Vec::new();
        let mut covered = HashSet::new();

        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }

                let node = *self.candidate_index.get(&(r, c, value)).ok_or_else(|| {
                    SolveError::Internal(format!(
                        "no candidate registered for clue ({}, {}, {})",
                        r, c, value
                    ))
                })?;

                self.cover_row_inclusive(node, &mut covered);
                forced.push(node);
            }
        }

        Ok(forced)
    }

    fn is_solved(&self) -> bool {
        self.nodes[ROOT].get_link(Direction::Next) == ROOT
    }

    /// Picks the live column with the fewest remaining rows, breaking ties
    /// by ring order (the S-heuristic / MRV branching rule).
    fn choose_column(&self) -> usize {
        let mut best = ROOT;
        let mut best_size = usize::MAX;
        let mut cols = Walker::from(ROOT);

        while let Some(col) = cols.next(self, Direction::Next) {
            let size = self.col_size(col);
            if size < best_size {
                best = col;
                best_size = size;
                if best_size == 0 {
                    break;
                }
            }
        }

        best
    }

    /// Consumes the matrix and returns the lazy sequence of completions,
    /// starting from whatever clues were already seeded.
    pub fn solutions(self, forced: Vec<usize>) -> Solutions {
        Solutions {
            matrix: self,
            stack: Vec::new(),
            forced,
            started: false,
        }
    }
}

/// One level of the (explicitly stacked) depth-first search: the column
/// chosen at this level and the row currently selected within it.
struct Frame {
    col: usize,
    row: usize,
}

/// The search engine's lazy sequence of completions.
///
/// This realizes the recursive DFS described in the design as a plain
/// `Iterator`: an explicit stack stands in for the call stack, so `.next()`
/// resumes exactly at the point after the previous yield, with all cover
/// state intact, and no generator, thread, or async machinery is needed.
pub struct Solutions {
    matrix: Matrix,
    stack: Vec<Frame>,
    forced: Vec<usize>,
    started: bool,
}

impl Solutions {
    fn decode(&self) -> Vec<(usize, usize, usize)> {
        self.forced
            .iter()
            .chain(self.stack.iter().map(|f| &f.row))
            .map(|&node| self.matrix.identity_of(node))
            .collect()
    }

    /// Undoes the most recently taken branch and advances it to the next
    /// untried row, backtracking further up the stack as needed. Returns
    /// `false` once the whole search space is exhausted.
    fn backtrack(&mut self) -> bool {
        while let Some(frame) = self.stack.pop() {
            self.matrix.uncover_row_siblings(frame.row);

            let next_row = self.matrix.nodes[frame.row].get_link(Direction::Down);
            if next_row != frame.col {
                self.matrix.cover_row_siblings(next_row);
                self.stack.push(Frame {
                    col: frame.col,
                    row: next_row,
                });
                return true;
            }

            self.matrix.uncover(frame.col);
        }

        false
    }
}

impl Iterator for Solutions {
    type Item = Vec<(usize, usize, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            if !self.backtrack() {
                return None;
            }
        } else {
            self.started = true;
        }

        loop {
            if self.matrix.is_solved() {
                return Some(self.decode());
            }

            let col = self.matrix.choose_column();
            if col == ROOT || self.matrix.col_size(col) == 0 {
                if !self.backtrack() {
                    return None;
                }
                continue;
            }

            self.matrix.cover(col);
            let row = self.matrix.nodes[col].get_link(Direction::Down);
            self.matrix.cover_row_siblings(row);
            self.stack.push(Frame { col, row });
        }
    }
}
