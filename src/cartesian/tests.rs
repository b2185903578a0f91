use super::*;
use rand::Rng;

/// Checks the structural invariants of a Cartesian tree and its tour against the input data.
fn check_invariants(data: &[i64], tree: &CartesianTree) {
    assert_eq!(tree.len(), data.len());

    // heap property and parent/child consistency
    for i in 0..data.len() {
        if let Some(l) = tree.left(i) {
            assert!(l < i, "left child {} of {} is not to its left", l, i);
            assert_eq!(tree.parent(l), Some(i));
            assert!(data[i] <= data[l]);
        }
        if let Some(r) = tree.right(i) {
            assert!(r > i, "right child {} of {} is not to its right", r, i);
            assert_eq!(tree.parent(r), Some(i));
            assert!(data[i] <= data[r]);
        }
    }

    // exactly one root, and it is the leftmost minimum
    let roots = tree.parents().iter().filter(|p| p.is_none()).count();
    let leftmost_min = data
        .iter()
        .enumerate()
        .min_by_key(|(_, &x)| x)
        .map(|(i, _)| i);
    assert_eq!(tree.root(), leftmost_min);
    assert_eq!(roots, if data.is_empty() { 0 } else { 1 });

    // in-order traversal reproduces the index order
    let mut in_order = Vec::with_capacity(data.len());
    let mut stack = Vec::new();
    let mut current = tree.root();
    while current.is_some() || !stack.is_empty() {
        while let Some(node) = current {
            stack.push(node);
            current = tree.left(node);
        }
        let node = stack.pop().unwrap();
        in_order.push(node);
        current = tree.right(node);
    }
    assert_eq!(in_order, (0..data.len()).collect::<Vec<_>>());

    // tour shape
    let tour = tree.tour();
    let nums_to_tour = tree.nums_to_tour();
    let tour_to_nums = tree.tour_to_nums();
    let expected_len = (2 * data.len()).saturating_sub(1);
    assert_eq!(tour.len(), expected_len);
    assert_eq!(tour_to_nums.len(), expected_len);
    assert_eq!(nums_to_tour.len(), data.len());

    for w in tour.windows(2) {
        assert_eq!(w[0].abs_diff(w[1]), 1, "tour is not restricted: {:?}", w);
    }

    let mut first_visit = vec![None; data.len()];
    for (pos, &i) in tour_to_nums.iter().enumerate() {
        first_visit[i].get_or_insert(pos);
    }
    for (i, &pos) in nums_to_tour.iter().enumerate() {
        assert_eq!(tour_to_nums[pos], i);
        assert_eq!(first_visit[i], Some(pos), "nums_to_tour[{}] is not the first visit", i);
    }
}

#[test]
fn test_small_tree() {
    let data = [2, 4, 3, 1, 6, 7, 8, 9, 1, 7];
    let tree = CartesianTree::new(&data);

    assert_eq!(tree.root(), Some(3));
    assert_eq!(tree.left(3), Some(0));
    assert_eq!(tree.right(3), Some(8));
    assert_eq!(tree.right(0), Some(2));
    assert_eq!(tree.left(2), Some(1));
    assert_eq!(tree.left(8), Some(4));
    assert_eq!(tree.right(8), Some(9));
    assert_eq!(tree.right(4), Some(5));
    assert_eq!(tree.right(5), Some(6));
    assert_eq!(tree.right(6), Some(7));
    assert_eq!(tree.parent(3), None);

    check_invariants(&data, &tree);
}

#[test]
fn test_tour() {
    let tree = CartesianTree::new(&[5, 2, 4, 1]);

    // 3 is the root, 1 its left child, 0 and 2 are the children of 1
    assert_eq!(tree.tour(), vec![0, 1, 2, 1, 2, 1, 0]);
    assert_eq!(tree.tour_to_nums(), vec![3, 1, 0, 1, 2, 1, 3]);
    assert_eq!(tree.nums_to_tour(), vec![2, 1, 4, 0]);
}

#[test]
fn test_empty_tree() {
    let tree = CartesianTree::new(&[]);
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
    assert!(tree.tour().is_empty());
    assert!(tree.nums_to_tour().is_empty());
    assert!(tree.tour_to_nums().is_empty());
}

#[test]
fn test_single_element() {
    let tree = CartesianTree::new(&[42]);
    assert_eq!(tree.root(), Some(0));
    assert_eq!(tree.parent(0), None);
    assert_eq!(tree.tour(), vec![0]);
    assert_eq!(tree.nums_to_tour(), vec![0]);
    assert_eq!(tree.tour_to_nums(), vec![0]);
}

#[test]
fn test_equal_keys() {
    let data = [3, 3, 3, 3];
    let tree = CartesianTree::new(&data);

    // equal keys form a right spine starting at the leftmost one
    assert_eq!(tree.root(), Some(0));
    assert_eq!(tree.right(0), Some(1));
    assert_eq!(tree.right(1), Some(2));
    assert_eq!(tree.right(2), Some(3));
    check_invariants(&data, &tree);
}

#[test]
fn test_sorted_input() {
    let data = (0..1000).collect::<Vec<i64>>();
    let tree = CartesianTree::new(&data);
    assert_eq!(tree.root(), Some(0));
    assert_eq!(tree.tour().iter().max(), Some(&999));
    check_invariants(&data, &tree);
}

#[test]
fn test_reverse_sorted_input() {
    // fully skewed to the left, which must not overflow the stack
    let data = (0..100_000).rev().collect::<Vec<i64>>();
    let tree = CartesianTree::new(&data);
    assert_eq!(tree.root(), Some(99_999));
    assert_eq!(tree.left(99_999), Some(99_998));
    assert_eq!(tree.tour()[99_999], 99_999);
    check_invariants(&data, &tree);
}

#[test]
fn test_extreme_values() {
    let data = [i64::MAX, i64::MIN, 0, i64::MIN, i64::MAX, -1];
    let tree = CartesianTree::new(&data);
    assert_eq!(tree.root(), Some(1));
    check_invariants(&data, &tree);
}

#[test]
fn test_accessor_copies() {
    let tree = CartesianTree::new(&[4, 2, 6]);
    let mut tour = tree.tour();
    tour[0] = 100;
    assert_eq!(tree.tour()[0], 0);

    let (tour, nums_to_tour, tour_to_nums) = tree.clone().into_tour_parts();
    assert_eq!(tour, tree.tour());
    assert_eq!(nums_to_tour, tree.nums_to_tour());
    assert_eq!(tour_to_nums, tree.tour_to_nums());
}

#[test]
fn test_heap_size() {
    // three tree arrays of 3 nodes, a tour of 5 entries and its two mappings
    let tree = CartesianTree::new(&[4, 2, 6]);
    assert_eq!(
        tree.heap_size(),
        9 * std::mem::size_of::<Option<usize>>() + 13 * std::mem::size_of::<usize>()
    );

    assert_eq!(CartesianTree::new(&[]).heap_size(), 0);
    assert!(CartesianTree::new(&[0; 1000]).heap_size() > tree.heap_size());
}

#[test]
fn randomized_test() {
    let mut rng = rand::thread_rng();

    for len in [2, 3, 7, 64, 513] {
        let data = (0..len)
            .map(|_| rng.gen_range(-20..20))
            .collect::<Vec<i64>>();
        let tree = CartesianTree::new(&data);
        check_invariants(&data, &tree);
    }
}
