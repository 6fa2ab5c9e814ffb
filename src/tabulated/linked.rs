//! Linked-list-backed tabulated functions.
//!
//! Points live in a circular doubly-linked ring of nodes. The nodes are kept
//! in an arena (`Vec<Node>`) and refer to each other by slot index; slot 0 is
//! the sentinel head of the ring. Slots freed by deletion are reused by later
//! insertions.
//!
//! A cursor remembers the last resolved `(node, index)` pair, so sequential or
//! clustered index access walks only a few links. Every structural mutation
//! reconciles the cursor before returning.

use std::cell::Cell;

use log::{debug, trace};

use super::{
    Points, Tabulated, TabulatedFunction, check_index, check_order, interpolate, uniform_grid,
    validation,
};
use crate::{
    error::TabulatedFunctionError,
    factory::TabulatedFunctionFactory,
    function::Function,
    point::{EPSILON, Point},
    types::{Validate, ValidationResult},
    validation_utils::ensure_valid,
};

/// Arena slot of the sentinel head.
const HEAD: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    point: Point,
    prev: usize,
    next: usize,
}

/// Last resolved node and its logical index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    node: usize,
    index: usize,
}

/// Tabulated function stored in a circular doubly-linked ring.
///
/// Index lookups start from whichever is nearer: the head of the ring
/// (walking forward or backward) or the cached cursor (walking the shorter
/// way around). Splicing a node in or out is O(1) once its position is known.
///
/// The cursor is updated through a `Cell` on reads, so this type is not
/// `Sync`; share it across threads behind a lock.
///
/// # Examples
///
/// ```rust
/// use tabulated::{Function, LinkedTabulatedFunction, Point, TabulatedFunction};
///
/// let mut function = LinkedTabulatedFunction::with_values(0.0, 2.0, &[0.0, 1.0, 4.0])?;
/// function.insert_point(Point::new(1.5, 2.25))?;
///
/// assert_eq!(function.count(), 4);
/// assert_eq!(function.point_at(2)?, Point::new(1.5, 2.25));
/// assert_eq!(function.value_at(1.75), 3.125);
/// # Ok::<(), tabulated::TabulatedFunctionError>(())
/// ```
#[derive(Debug)]
pub struct LinkedTabulatedFunction {
    nodes: Vec<Node>,
    free: Vec<usize>,
    count: usize,
    cursor: Cell<Option<Cursor>>,
}

impl LinkedTabulatedFunction {
    /// Uniform grid of `count` points over `[left, right]`, all with y = 0.
    pub fn new(left: f64, right: f64, count: usize) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_grid(left, right, count))?;
        Ok(Self::from_valid(uniform_grid(left, right, &vec![0.0; count])))
    }

    /// Uniform grid over `[left, right]` with one point per value.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_grid_values(left, right, values))?;
        Ok(Self::from_valid(uniform_grid(left, right, values)))
    }

    /// Copies `points`, which must already be strictly ascending in x.
    pub fn from_points(points: &[Point]) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_points(points))?;
        Ok(Self::from_valid(points.iter().copied()))
    }

    fn empty() -> Self {
        LinkedTabulatedFunction {
            nodes: vec![Node {
                point: Point::origin(),
                prev: HEAD,
                next: HEAD,
            }],
            free: Vec::new(),
            count: 0,
            cursor: Cell::new(None),
        }
    }

    fn from_valid(points: impl Iterator<Item = Point>) -> Self {
        let mut function = Self::empty();
        for point in points {
            function.push_back(point);
        }
        function.cursor.set(Some(Cursor {
            node: function.first(),
            index: 0,
        }));
        function
    }

    /// Iterates over copies of the points, from the head of the ring.
    pub fn iter(&self) -> LinkedPoints<'_> {
        LinkedPoints {
            function: self,
            node: self.first(),
            remaining: self.count,
        }
    }

    fn first(&self) -> usize {
        self.nodes[HEAD].next
    }

    fn last(&self) -> usize {
        self.nodes[HEAD].prev
    }

    /// Next live node around the ring, skipping the sentinel.
    fn forward(&self, node: usize) -> usize {
        match self.nodes[node].next {
            HEAD => self.first(),
            next => next,
        }
    }

    /// Previous live node around the ring, skipping the sentinel.
    fn backward(&self, node: usize) -> usize {
        match self.nodes[node].prev {
            HEAD => self.last(),
            prev => prev,
        }
    }

    /// Resolves `index` (which must be in range) to its node and moves the
    /// cursor there.
    fn node_at(&self, index: usize) -> usize {
        let node = self.locate(index);
        self.cursor.set(Some(Cursor { node, index }));
        node
    }

    /// Resolves `index` from the head or the cursor, whichever is nearer,
    /// without moving the cursor.
    fn locate(&self, index: usize) -> usize {
        let n = self.count;
        let from_head = (index + 1).min(n - index);

        match self.cursor.get() {
            Some(c) if c.index == index => c.node,
            Some(c) => {
                let back = (c.index + n - index) % n;
                let ahead = (index + n - c.index) % n;
                if back.min(ahead) < from_head {
                    trace!("walking from cursor {} to index {}", c.index, index);
                    if back < ahead {
                        (0..back).fold(c.node, |node, _| self.backward(node))
                    } else {
                        (0..ahead).fold(c.node, |node, _| self.forward(node))
                    }
                } else {
                    self.walk_from_head(index)
                }
            }
            None => self.walk_from_head(index),
        }
    }

    fn walk_from_head(&self, index: usize) -> usize {
        trace!("walking from head to index {}", index);
        let n = self.count;
        if index <= n / 2 {
            (0..index).fold(self.first(), |node, _| self.nodes[node].next)
        } else {
            (index + 1..n).fold(self.last(), |node, _| self.nodes[node].prev)
        }
    }

    fn allocate(&mut self, point: Point) -> usize {
        let node = Node {
            point,
            prev: HEAD,
            next: HEAD,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Splices a new node holding `point` in front of `at`.
    fn link_before(&mut self, at: usize, point: Point) -> usize {
        let slot = self.allocate(point);
        let prev = self.nodes[at].prev;

        self.nodes[slot].prev = prev;
        self.nodes[slot].next = at;
        self.nodes[prev].next = slot;
        self.nodes[at].prev = slot;
        self.count += 1;

        slot
    }

    /// Appends `point` after the current tail. A cursor on the old tail moves
    /// on to the new one.
    fn push_back(&mut self, point: Point) {
        let slot = self.link_before(HEAD, point);
        if let Some(c) = self.cursor.get() {
            if c.index + 2 == self.count {
                self.cursor.set(Some(Cursor {
                    node: slot,
                    index: self.count - 1,
                }));
            }
        }
    }

    /// Inserts `point` in front of `at`, which currently sits at `index`.
    fn insert_before(&mut self, at: usize, index: usize, point: Point) {
        self.link_before(at, point);
        if let Some(c) = self.cursor.get() {
            if c.index >= index {
                self.cursor.set(Some(Cursor {
                    node: c.node,
                    index: c.index + 1,
                }));
            }
        }
    }

    /// Unlinks the node at `index` and returns its point.
    ///
    /// A cursor on the removed node moves to its successor at the same index,
    /// or back to the first node when the tail was removed. A cursor past the
    /// removed node keeps its node and shifts down one index.
    fn remove(&mut self, index: usize) -> Point {
        let node = self.locate(index);
        let Node { point, prev, next } = self.nodes[node];

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(node);
        self.count -= 1;

        let cursor = match self.cursor.get() {
            Some(c) if c.node == node && index == self.count => Some(Cursor {
                node: self.first(),
                index: 0,
            }),
            Some(c) if c.node == node => Some(Cursor { node: next, index }),
            Some(c) if c.index > index => Some(Cursor {
                node: c.node,
                index: c.index - 1,
            }),
            other => other,
        };
        self.cursor.set(cursor);

        point
    }

    fn neighbours(&self, node: usize, index: usize) -> (Option<f64>, Option<f64>) {
        let lower = (index > 0).then(|| self.nodes[self.nodes[node].prev].point.x());
        let upper = (index + 1 < self.count).then(|| self.nodes[self.nodes[node].next].point.x());
        (lower, upper)
    }
}

impl Clone for LinkedTabulatedFunction {
    /// Rebuilds the ring in order, so the copy has a compact arena of its own.
    fn clone(&self) -> Self {
        Self::from_valid(self.iter())
    }
}

impl Function for LinkedTabulatedFunction {
    fn value_at(&self, x: f64) -> f64 {
        if x >= self.left_bound() && x <= self.right_bound() {
            interpolate(self.iter(), x)
        } else {
            f64::NAN
        }
    }

    fn left_bound(&self) -> f64 {
        self.nodes[self.first()].point.x()
    }

    fn right_bound(&self) -> f64 {
        self.nodes[self.last()].point.x()
    }
}

impl TabulatedFunction for LinkedTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn point_at(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        check_index(index, self.count)?;
        Ok(self.nodes[self.node_at(index)].point)
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count)?;
        let node = self.node_at(index);
        let (lower, upper) = self.neighbours(node, index);
        check_order(index, point.x(), lower, upper)?;
        self.nodes[node].point = point;
        Ok(())
    }

    fn set_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count)?;
        let node = self.node_at(index);
        let (lower, upper) = self.neighbours(node, index);
        check_order(index, x, lower, upper)?;
        self.nodes[node].point.set_x(x);
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count)?;
        let node = self.node_at(index);
        self.nodes[node].point.set_y(y);
        Ok(())
    }

    fn insert_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        let x = point.x();
        if !x.is_finite() {
            return Err(TabulatedFunctionError::InvalidInput(format!(
                "cannot insert a point with a non-finite abscissa: {}",
                x
            )));
        }

        let mut slot = None;
        let mut node = self.first();
        for index in 0..self.count {
            let existing = self.nodes[node].point.x();
            if (existing - x).abs() < EPSILON {
                return Err(TabulatedFunctionError::DuplicateAbscissa { x });
            }
            if x < existing {
                slot = Some((node, index));
                break;
            }
            node = self.nodes[node].next;
        }

        match slot {
            Some((at, index)) => {
                self.insert_before(at, index, point);
                debug!("inserted {} at index {} of {}", point, index, self.count);
            }
            None => {
                self.push_back(point);
                debug!("appended {} as point {}", point, self.count);
            }
        }
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        let count = self.count;
        check_index(index, count)?;
        if count <= validation::MIN_POINTS {
            return Err(TabulatedFunctionError::MinimumSizeViolation { count });
        }

        let removed = self.remove(index);
        debug!("deleted {} from index {} of {}", removed, index, count);
        Ok(())
    }

    fn points(&self) -> Points<'_> {
        Box::new(self.iter())
    }

    fn duplicate(&self) -> Box<dyn TabulatedFunction> {
        Box::new(self.clone())
    }
}

impl Validate for LinkedTabulatedFunction {
    fn validate(&self) -> ValidationResult {
        validation::validate_function(self)
    }
}

/// Forward iterator over the points of a [`LinkedTabulatedFunction`].
///
/// Walks the links directly and leaves the cursor alone.
#[derive(Debug, Clone)]
pub struct LinkedPoints<'a> {
    function: &'a LinkedTabulatedFunction,
    node: usize,
    remaining: usize,
}

impl Iterator for LinkedPoints<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.function.nodes[self.node];
        self.node = node.next;
        self.remaining -= 1;
        Some(node.point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for LinkedPoints<'_> {}

impl<'a> IntoIterator for &'a LinkedTabulatedFunction {
    type Item = Point;
    type IntoIter = LinkedPoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds [`LinkedTabulatedFunction`]s behind [`Tabulated`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedTabulatedFunctionFactory;

impl TabulatedFunctionFactory for LinkedTabulatedFunctionFactory {
    fn create(&self, left: f64, right: f64, count: usize) -> Result<Tabulated, TabulatedFunctionError> {
        LinkedTabulatedFunction::new(left, right, count).map(Tabulated::Linked)
    }

    fn create_with_values(
        &self,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        LinkedTabulatedFunction::with_values(left, right, values).map(Tabulated::Linked)
    }

    fn create_from_points(&self, points: &[Point]) -> Result<Tabulated, TabulatedFunctionError> {
        LinkedTabulatedFunction::from_points(points).map(Tabulated::Linked)
    }
}
