mod arena;
pub mod avl;
pub mod bst;
pub mod heap;
pub mod rbtree;

/// 有序索引抽象：BST / AVL / 红黑树共享同一外部契约。
///
/// ## 契约（重要）
/// - `insert` 遇到已存在的 key 时覆盖 value（last write wins），不新增条目。
/// - `in_order` 返回惰性、有限、可重复获取的升序 (key, value) 序列；实现走显式栈，不递归。
/// - `try_get` 以 `None` 表达缺失，任何实现都不 panic。
/// - 不支持删除：索引只会整体重建。
pub trait OrderedIndex<K: Ord, V> {
    fn insert(&mut self, key: K, value: V);
    fn try_get(&self, key: &K) -> Option<&V>;
    fn in_order<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a;
    /// 不同 key 的数量
    fn len(&self) -> usize;
    fn height(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub use arena::InOrder;
pub use avl::AvlTree;
pub use bst::Bst;
pub use heap::{HeapOrder, MinHeap, NaturalOrder};
pub use rbtree::{Color, RedBlackTree};
