use crate::index::arena::{NodeArena, Placement};
use crate::index::OrderedIndex;

/// 不做任何再平衡的二叉搜索树：平衡变体的正确性/性能基线。
///
/// 插入为迭代下探，最坏情况（有序插入）退化为链表，但不会爆栈。
#[derive(Clone, Debug)]
pub struct Bst<K, V> {
    arena: NodeArena<K, V, ()>,
}

impl<K: Ord, V> Bst<K, V> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::default(),
        }
    }
}

impl<K: Ord, V> Default for Bst<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for Bst<K, V> {
    fn insert(&mut self, key: K, value: V) {
        // 无再平衡：叶子挂上即完成
        let _: Placement = self.arena.insert_leaf(key, value, ());
    }

    fn try_get(&self, key: &K) -> Option<&V> {
        self.arena.get(key)
    }

    fn in_order<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.arena.in_order()
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn height(&self) -> usize {
        self.arena.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn duplicate_key_replaces_value() {
        let mut t = Bst::new();
        t.insert("R101", 1);
        t.insert("M001", 2);
        t.insert("R101", 3);

        assert_eq!(t.len(), 2);
        assert_eq!(t.try_get(&"R101"), Some(&3));
        assert_eq!(t.try_get(&"nope"), None);
    }

    #[test]
    fn sorted_input_degenerates_without_overflowing() {
        let mut t = Bst::new();
        for i in 0..10_000u32 {
            t.insert(i, i);
        }
        assert_eq!(t.height(), 10_000);
        assert!(t.in_order().map(|(k, _)| *k).eq(0..10_000u32));
    }

    #[test]
    fn in_order_is_restartable() {
        let mut t = Bst::new();
        for k in [5, 3, 8, 1, 4] {
            t.insert(k, k * 10);
        }
        let first: Vec<_> = t.in_order().collect();
        let second: Vec<_> = t.in_order().collect();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|(k, _)| **k).collect::<Vec<_>>(),
            vec![1, 3, 4, 5, 8]
        );
    }

    proptest! {
        #[test]
        fn in_order_matches_model_with_last_write_wins(keys in prop::collection::vec(-200i32..200, 0..300)) {
            let mut t = Bst::new();
            let mut model = std::collections::BTreeMap::new();
            for (i, k) in keys.iter().enumerate() {
                t.insert(*k, i);
                model.insert(*k, i);
            }
            prop_assert_eq!(t.len(), model.len());

            let got: Vec<(i32, usize)> = t.in_order().map(|(k, v)| (*k, *v)).collect();
            let want: Vec<(i32, usize)> = model.into_iter().collect();
            prop_assert_eq!(got, want);
        }
    }
}
