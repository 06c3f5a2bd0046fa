use ordered_tree::OrderedTree;

use std::collections::BTreeSet;

fn inorder<T: std::fmt::Display>(tree: &OrderedTree<T>) -> String {
    let mut out = String::new();
    tree.traverse_inorder(&mut out).unwrap();
    out
}

quickcheck::quickcheck! {
    fn inorder_is_ascending(xs: Vec<i16>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();
        let expected: BTreeSet<_> = xs.into_iter().collect();

        let rendered: String = expected.iter().map(|x| format!("{} ", x)).collect();
        inorder(&tree) == rendered && tree.iter().eq(expected.iter())
    }
}

quickcheck::quickcheck! {
    fn len_counts_distinct_values(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            tree.insert(*x);
        }
        // Inserting everything a second time changes nothing.
        for x in &xs {
            tree.insert(*x);
        }

        let distinct: BTreeSet<_> = xs.into_iter().collect();
        tree.len() == distinct.len() && tree.is_empty() == distinct.is_empty()
    }
}

quickcheck::quickcheck! {
    fn sorted_inserts_make_a_chain(n: u8) -> bool {
        let ascending: OrderedTree<u8> = (0..n).collect();
        let descending: OrderedTree<u8> = (0..n).rev().collect();

        ascending.height() == n as usize && descending.height() == n as usize
    }
}

quickcheck::quickcheck! {
    fn min_and_max_match_extremes(xs: Vec<i32>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        match (xs.iter().min(), xs.iter().max()) {
            (Some(min), Some(max)) => {
                tree.min_element().get() == Some(min) && tree.max_element().get() == Some(max)
            }
            _ => tree.min_element() == tree.end() && tree.max_element() == tree.end(),
        }
    }
}

quickcheck::quickcheck! {
    fn min_greater_than_is_successor(xs: Vec<i8>, probes: Vec<i8>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        probes.iter().all(|probe| {
            let expected = xs.iter().filter(|x| *x > probe).min();
            let found = tree.min_greater_than(probe);
            match expected {
                Some(expected) => found.get() == Some(expected),
                None => found == tree.end(),
            }
        })
    }
}

quickcheck::quickcheck! {
    fn copies_are_independent(xs: Vec<i8>, extra: i8) -> bool {
        let mut original: OrderedTree<_> = xs.iter().copied().collect();
        let mut copy = original.clone();
        let len = original.len();

        let copy_grew = copy.insert(extra);
        let copy_ok = original.len() == len && (copy.len() == len + 1) == copy_grew;

        let mut assigned = OrderedTree::new();
        assigned.clone_from(&original);
        let original_grew = original.insert(extra.wrapping_add(1));
        let assigned_ok = (assigned.len() == len) && (original.len() > len) == original_grew;

        copy_ok && assigned_ok && copy.validate().is_ok() && assigned.validate().is_ok()
    }
}

quickcheck::quickcheck! {
    fn cursor_walk_matches_iter(xs: Vec<i16>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();

        let mut walked: Vec<i16> = Vec::new();
        let mut cursor = tree.begin();
        while cursor != tree.end() {
            walked.extend(cursor.get().copied());
            cursor.move_next();
        }
        walked.iter().eq(tree.iter()) && walked.len() == tree.len()
    }
}

quickcheck::quickcheck! {
    fn owned_iteration_is_sorted(xs: Vec<i16>) -> bool {
        let tree: OrderedTree<_> = xs.iter().copied().collect();
        let expected: BTreeSet<_> = xs.into_iter().collect();

        tree.into_iter().eq(expected)
    }
}
