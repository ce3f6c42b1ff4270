use std::cmp::Ordering;

/// 节点在 arena 中的下标
pub(crate) type NodeId = usize;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V, M> {
    pub key: K,
    pub value: V,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    /// 各变体的平衡信息：BST 为 `()`，AVL 为高度，红黑树为颜色
    pub meta: M,
}

/// 三种有序索引共用的节点存储：
/// - 节点统一落在 `Vec`（append-only，无删除），父子关系用下标表达
/// - 插入沿途路径放在显式栈里回溯，不依赖递归深度
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<K, V, M> {
    nodes: Vec<Node<K, V, M>>,
    pub root: Option<NodeId>,
}

impl<K, V, M> Default for NodeArena<K, V, M> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

/// `insert_leaf` 的结果
pub(crate) enum Placement {
    /// key 已存在，value 已覆盖
    Replaced,
    /// 新叶子已挂到父节点；`path` 为自根到父节点的 (节点, 走向)
    Attached {
        leaf: NodeId,
        path: Vec<(NodeId, Side)>,
    },
}

impl<K: Ord, V, M> NodeArena<K, V, M> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node<K, V, M> {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V, M> {
        &mut self.nodes[id]
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    pub fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let node = &mut self.nodes[parent];
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    pub fn key_cmp(&self, a: NodeId, b: NodeId) -> Ordering {
        self.nodes[a].key.cmp(&self.nodes[b].key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = &self.nodes[id];
            cur = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// 自根向下定位：命中则覆盖 value；否则新建叶子并挂到父节点（空树时成为根）。
    pub fn insert_leaf(&mut self, key: K, value: V, meta: M) -> Placement {
        let mut path = Vec::new();
        let mut cur = self.root;
        while let Some(id) = cur {
            let side = match key.cmp(&self.nodes[id].key) {
                Ordering::Equal => {
                    self.nodes[id].value = value;
                    return Placement::Replaced;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            path.push((id, side));
            cur = match side {
                Side::Left => self.nodes[id].left,
                Side::Right => self.nodes[id].right,
            };
        }

        let leaf = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            left: None,
            right: None,
            meta,
        });
        match path.last() {
            Some(&(parent, side)) => self.set_child(parent, side, Some(leaf)),
            None => self.root = Some(leaf),
        }
        Placement::Attached { leaf, path }
    }

    pub fn in_order(&self) -> InOrder<'_, K, V, M> {
        InOrder {
            nodes: &self.nodes,
            stack: Vec::new(),
            current: self.root,
        }
    }

    /// 树高（空树为 0），逐层展开计算
    pub fn height(&self) -> usize {
        let mut level: Vec<NodeId> = self.root.into_iter().collect();
        let mut height = 0;
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|&id| [self.nodes[id].left, self.nodes[id].right])
                .flatten()
                .collect();
        }
        height
    }
}

/// 惰性中序遍历（显式栈）。每次调用 `in_order()` 得到一个新的遍历。
pub struct InOrder<'a, K, V, M> {
    nodes: &'a [Node<K, V, M>],
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a, K, V, M> Iterator for InOrder<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.nodes[id].left;
        }
        let id = self.stack.pop()?;
        let node = &self.nodes[id];
        self.current = node.right;
        Some((&node.key, &node.value))
    }
}
