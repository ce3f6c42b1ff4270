use std::cmp::Ordering;

use crate::index::arena::{NodeArena, NodeId, Placement};
use crate::index::OrderedIndex;

/// 高度平衡（AVL）树：每个节点满足 |h(left) - h(right)| <= 1。
///
/// 插入：下探时记录路径，回溯时逐层重算高度并按四种经典情形旋转
/// （LL / RR / LR / RL），情形由新 key 相对失衡节点子节点的位置决定。
#[derive(Clone, Debug)]
pub struct AvlTree<K, V> {
    arena: NodeArena<K, V, u32>,
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::default(),
        }
    }

    fn h(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.arena.node(id).meta)
    }

    fn update(&mut self, id: NodeId) {
        let h = 1 + self.h(self.arena.left(id)).max(self.h(self.arena.right(id)));
        self.arena.node_mut(id).meta = h;
    }

    fn balance(&self, id: NodeId) -> i64 {
        i64::from(self.h(self.arena.left(id))) - i64::from(self.h(self.arena.right(id)))
    }

    fn rotate_right(&mut self, y: NodeId) -> NodeId {
        let Some(x) = self.arena.left(y) else {
            return y;
        };
        let t2 = self.arena.right(x);
        self.arena.node_mut(x).right = Some(y);
        self.arena.node_mut(y).left = t2;
        self.update(y);
        self.update(x);
        x
    }

    fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let Some(y) = self.arena.right(x) else {
            return x;
        };
        let t2 = self.arena.left(y);
        self.arena.node_mut(y).left = Some(x);
        self.arena.node_mut(x).right = t2;
        self.update(x);
        self.update(y);
        y
    }

    /// 回溯一层：重算高度，必要时旋转，返回该子树的新根
    fn rebalance(&mut self, node: NodeId, leaf: NodeId) -> NodeId {
        self.update(node);
        let balance = self.balance(node);

        if balance > 1 {
            if let Some(left) = self.arena.left(node) {
                if self.arena.key_cmp(leaf, left) == Ordering::Greater {
                    // Left-Right
                    let new_left = self.rotate_left(left);
                    self.arena.node_mut(node).left = Some(new_left);
                }
                // Left-Left
                return self.rotate_right(node);
            }
        } else if balance < -1 {
            if let Some(right) = self.arena.right(node) {
                if self.arena.key_cmp(leaf, right) == Ordering::Less {
                    // Right-Left
                    let new_right = self.rotate_right(right);
                    self.arena.node_mut(node).right = Some(new_right);
                }
                // Right-Right
                return self.rotate_left(node);
            }
        }
        node
    }
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for AvlTree<K, V> {
    fn insert(&mut self, key: K, value: V) {
        let Placement::Attached { leaf, path } = self.arena.insert_leaf(key, value, 1) else {
            return;
        };

        let mut subtree = leaf;
        for (parent, side) in path.into_iter().rev() {
            self.arena.set_child(parent, side, Some(subtree));
            subtree = self.rebalance(parent, leaf);
        }
        self.arena.root = Some(subtree);
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

    /// 根节点上缓存的高度
    fn height(&self) -> usize {
        self.h(self.arena.root) as usize
    }
}
