//! Cartesian tree construction and its Eulerian tour. The tree reduces a range minimum query to a
//! lowest common ancestor query, and the depth sequence of an Eulerian tour of the tree reduces
//! the LCA query further to a restricted range minimum query, where neighboring elements differ
//! by exactly one.
//!
//! The tree is not pointer-linked. Parent and child relations are stored in three arrays indexed
//! by the position of the key in the input array.

use std::mem::size_of;

/// A min-heap ordered binary tree over a static array, whose in-order traversal reproduces the
/// array. Along with the tree, the depth sequence of an Eulerian tour is computed, together with
/// the mapping between array positions and tour positions.
///
/// Equal keys are resolved to the left: the leftmost occurrence of the global minimum is the root,
/// and of two equal keys the right one ends up in the right subtree of the left one.
///
/// # Example
/// ```rust
/// use cartesian_rmq::CartesianTree;
///
/// let tree = CartesianTree::new(&[3, 1, 2]);
///
/// assert_eq!(tree.root(), Some(1));
/// assert_eq!(tree.left(1), Some(0));
/// assert_eq!(tree.right(1), Some(2));
/// assert_eq!(tree.tour(), vec![0, 1, 0, 1, 0]);
/// assert_eq!(tree.nums_to_tour(), vec![1, 0, 3]);
/// assert_eq!(tree.tour_to_nums(), vec![1, 0, 1, 2, 1]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CartesianTree {
    parent: Vec<Option<usize>>,
    left: Vec<Option<usize>>,
    right: Vec<Option<usize>>,
    root: Option<usize>,

    tour: Vec<usize>,
    nums_to_tour: Vec<usize>,
    tour_to_nums: Vec<usize>,
}

impl CartesianTree {
    /// Builds the Cartesian tree of `data` and an Eulerian tour of it in O(n) time and space.
    /// The input is only read, the tree does not keep a reference to it.
    ///
    /// An empty input produces an empty tree without a root and an empty tour.
    #[must_use]
    pub fn new(data: &[i64]) -> Self {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("cartesian_tree", len = data.len()).entered();

        let mut tree = Self {
            parent: vec![None; data.len()],
            left: vec![None; data.len()],
            right: vec![None; data.len()],
            root: None,
            tour: Vec::new(),
            nums_to_tour: Vec::new(),
            tour_to_nums: Vec::new(),
        };

        tree.build_tree(data);
        tree.build_tour();
        tree
    }

    /// Inserts one key per iteration from left to right using the all nearest smaller values
    /// method. The stack holds the right spine of the tree built so far, with strictly increasing
    /// keys from bottom to top.
    fn build_tree(&mut self, data: &[i64]) {
        let mut stack: Vec<usize> = Vec::with_capacity(data.len());

        for (i, &key) in data.iter().enumerate() {
            let mut last_popped = None;
            while let Some(&top) = stack.last() {
                if data[top] <= key {
                    break;
                }
                last_popped = stack.pop();
            }

            // the popped chain becomes the left subtree of the new key
            if let Some(child) = last_popped {
                self.parent[child] = Some(i);
                self.left[i] = Some(child);
            }

            // the new key hangs off the right spine. If it is popped later, the right child of
            // `top` is overwritten by whatever pops it.
            if let Some(&top) = stack.last() {
                self.parent[i] = Some(top);
                self.right[top] = Some(i);
            }

            stack.push(i);
        }

        // the bottom of the stack is never popped, because only strictly larger keys are popped.
        // It is the leftmost minimum.
        self.root = stack.first().copied();
        if let Some(root) = self.root {
            self.parent[root] = None;
        }
    }

    /// Walks the tree depth-first with an explicit stack, so degenerate (fully skewed) trees do not
    /// exhaust the call stack. A node is emitted when it is entered and each time the walk
    /// returns to it from a child, so every edge contributes two entries and the tour has length
    /// `2n - 1`.
    fn build_tour(&mut self) {
        let Some(root) = self.root else {
            return;
        };

        let len = self.parent.len();
        let tour_len = 2 * len - 1;

        let mut tour = Vec::with_capacity(tour_len);
        let mut tour_to_nums = Vec::with_capacity(tour_len);
        let mut nums_to_tour = vec![usize::MAX; len];

        let mut left_visited = vec![false; len];
        let mut right_visited = vec![false; len];
        let mut stack = vec![(root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            if nums_to_tour[node] == usize::MAX {
                nums_to_tour[node] = tour.len();
            }
            tour.push(depth);
            tour_to_nums.push(node);

            // descend into the next unvisited child. The node itself is pushed again to be emitted
            // once the child's subtree is done.
            let next_child = match (self.left[node], self.right[node]) {
                (Some(child), _) if !left_visited[node] => {
                    left_visited[node] = true;
                    Some(child)
                }
                (_, Some(child)) if !right_visited[node] => {
                    right_visited[node] = true;
                    Some(child)
                }
                _ => None,
            };

            if let Some(child) = next_child {
                stack.push((node, depth));
                stack.push((child, depth + 1));
            }
        }

        debug_assert_eq!(tour.len(), tour_len);
        debug_assert!(nums_to_tour.iter().all(|&pos| pos < tour_len));

        self.tour = tour;
        self.tour_to_nums = tour_to_nums;
        self.nums_to_tour = nums_to_tour;
    }

    /// Returns the number of nodes in the tree, which is the length of the input array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the array index of the root, which is the leftmost minimum of the input.
    /// Returns `None` only for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Returns the parent of the node at array index `i`, or `None` for the root.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn parent(&self, i: usize) -> Option<usize> {
        self.parent[i]
    }

    /// Returns the left child of the node at array index `i`, if it has one.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn left(&self, i: usize) -> Option<usize> {
        self.left[i]
    }

    /// Returns the right child of the node at array index `i`, if it has one.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds.
    #[must_use]
    pub fn right(&self, i: usize) -> Option<usize> {
        self.right[i]
    }

    /// Returns the parent array, indexed by array position.
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parent
    }

    /// Returns the left child array, indexed by array position.
    #[must_use]
    pub fn lefts(&self) -> &[Option<usize>] {
        &self.left
    }

    /// Returns the right child array, indexed by array position.
    #[must_use]
    pub fn rights(&self) -> &[Option<usize>] {
        &self.right
    }

    /// Returns a copy of the Eulerian tour as a sequence of node depths. The root has depth 0.
    #[must_use]
    pub fn tour(&self) -> Vec<usize> {
        self.tour.clone()
    }

    /// Returns a copy of the mapping from array positions to the tour position of their first
    /// visit.
    #[must_use]
    pub fn nums_to_tour(&self) -> Vec<usize> {
        self.nums_to_tour.clone()
    }

    /// Returns a copy of the mapping from tour positions to the array position visited there.
    #[must_use]
    pub fn tour_to_nums(&self) -> Vec<usize> {
        self.tour_to_nums.clone()
    }

    /// Consumes the tree and returns the tour, the array-to-tour mapping and the tour-to-array
    /// mapping, in this order, without copying them.
    #[must_use]
    pub fn into_tour_parts(self) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
        (self.tour, self.nums_to_tour, self.tour_to_nums)
    }

    /// Returns the amount of memory used by the tree and its tour in bytes. Does not include
    /// space allocated but not in use (e.g. unused capacity of vectors).
    #[must_use]
    pub fn heap_size(&self) -> usize {
        (self.parent.len() + self.left.len() + self.right.len()) * size_of::<Option<usize>>()
            + (self.tour.len() + self.nums_to_tour.len() + self.tour_to_nums.len())
                * size_of::<usize>()
    }
}

impl From<&[i64]> for CartesianTree {
    fn from(data: &[i64]) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests;
