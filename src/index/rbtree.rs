use serde::Serialize;

use crate::index::arena::{NodeArena, NodeId, Placement};
use crate::index::OrderedIndex;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Color {
    Red,
    Black,
}

/// 左倾红黑树（LLRB）。
///
/// 新节点为红；回溯时依次执行：
/// 1) 右红左不红 → 左旋
/// 2) 左红且左左红 → 右旋
/// 3) 左右皆红 → 颜色翻转
///
/// 每次插入后根强制为黑。
#[derive(Clone, Debug)]
pub struct RedBlackTree<K, V> {
    arena: NodeArena<K, V, Color>,
}

impl<K: Ord, V> RedBlackTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: NodeArena::default(),
        }
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.arena.node(id).meta == Color::Red)
    }

    fn rotate_left(&mut self, h: NodeId) -> NodeId {
        let Some(x) = self.arena.right(h) else {
            return h;
        };
        let x_left = self.arena.left(x);
        self.arena.node_mut(h).right = x_left;
        self.arena.node_mut(x).left = Some(h);
        let color = self.arena.node(h).meta;
        self.arena.node_mut(x).meta = color;
        self.arena.node_mut(h).meta = Color::Red;
        x
    }

    fn rotate_right(&mut self, h: NodeId) -> NodeId {
        let Some(x) = self.arena.left(h) else {
            return h;
        };
        let x_right = self.arena.right(x);
        self.arena.node_mut(h).left = x_right;
        self.arena.node_mut(x).right = Some(h);
        let color = self.arena.node(h).meta;
        self.arena.node_mut(x).meta = color;
        self.arena.node_mut(h).meta = Color::Red;
        x
    }

    fn flip_colors(&mut self, h: NodeId) {
        self.arena.node_mut(h).meta = Color::Red;
        for child in [self.arena.left(h), self.arena.right(h)].into_iter().flatten() {
            self.arena.node_mut(child).meta = Color::Black;
        }
    }

    fn fix_up(&mut self, mut h: NodeId) -> NodeId {
        if self.is_red(self.arena.right(h)) && !self.is_red(self.arena.left(h)) {
            h = self.rotate_left(h);
        }
        let left = self.arena.left(h);
        if self.is_red(left) && self.is_red(left.and_then(|l| self.arena.left(l))) {
            h = self.rotate_right(h);
        }
        if self.is_red(self.arena.left(h)) && self.is_red(self.arena.right(h)) {
            self.flip_colors(h);
        }
        h
    }

    /// 根到每个空叶子路径上的黑节点数；路径间不一致时返回 None
    pub fn black_height(&self) -> Option<usize> {
        let mut expected = None;
        let mut stack = vec![(self.arena.root, 0usize)];
        while let Some((id, blacks)) = stack.pop() {
            let Some(id) = id else {
                match expected {
                    None => expected = Some(blacks),
                    Some(e) if e != blacks => return None,
                    Some(_) => {}
                }
                continue;
            };
            let node = self.arena.node(id);
            let blacks = blacks + usize::from(node.meta == Color::Black);
            stack.push((node.left, blacks));
            stack.push((node.right, blacks));
        }
        expected
    }

    pub fn root_color(&self) -> Option<Color> {
        self.arena.root.map(|id| self.arena.node(id).meta)
    }
}

impl<K: Ord, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> OrderedIndex<K, V> for RedBlackTree<K, V> {
    fn insert(&mut self, key: K, value: V) {
        let Placement::Attached { leaf, path } = self.arena.insert_leaf(key, value, Color::Red)
        else {
            return;
        };

        let mut subtree = leaf;
        for (parent, side) in path.into_iter().rev() {
            self.arena.set_child(parent, side, Some(subtree));
            subtree = self.fix_up(parent);
        }
        self.arena.root = Some(subtree);
        self.arena.node_mut(subtree).meta = Color::Black;
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
