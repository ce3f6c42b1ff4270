use std::cmp::Ordering;

/// 堆的排序规则（可插拔）
pub trait HeapOrder<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// 使用 `T: Ord` 的自然序
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord> HeapOrder<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> HeapOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// 二叉最小堆：根始终是比较键最小的元素
#[derive(Clone, Debug)]
pub struct MinHeap<T, O = NaturalOrder> {
    data: Vec<T>,
    order: O,
}

impl<T: Ord> MinHeap<T, NaturalOrder> {
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<T: Ord> Default for MinHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O: HeapOrder<T>> MinHeap<T, O> {
    pub fn with_order(order: O) -> Self {
        Self {
            data: Vec::new(),
            order,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let root = self.data.pop();
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        root
    }

    /// 当前存储的全部元素，不保证顺序
    pub fn unordered(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// 依次 pop 到空，得到非递减序列
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.order.compare(&self.data[a], &self.data[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.data.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_heap_pops_none() {
        let mut h: MinHeap<i32> = MinHeap::new();
        assert!(h.peek().is_none());
        assert!(h.pop().is_none());
    }

    #[test]
    fn custom_order_turns_it_into_a_max_heap() {
        let mut h = MinHeap::with_order(|a: &i32, b: &i32| b.cmp(a));
        for x in [3, 9, 1, 7] {
            h.push(x);
        }
        assert_eq!(h.peek(), Some(&9));
        assert_eq!(h.into_sorted_vec(), vec![9, 7, 3, 1]);
    }

    #[test]
    fn unordered_yields_every_item() {
        let mut h = MinHeap::new();
        for x in [5, 2, 8, 2] {
            h.push(x);
        }
        let mut all: Vec<i32> = h.unordered().copied().collect();
        all.sort();
        assert_eq!(all, vec![2, 2, 5, 8]);
        assert_eq!(h.len(), 4);
    }

    proptest! {
        #[test]
        fn pops_are_non_decreasing(items in prop::collection::vec(any::<i16>(), 0..200)) {
            let mut h = MinHeap::new();
            for x in &items {
                h.push(*x);
            }
            let popped = h.into_sorted_vec();
            let mut want = items.clone();
            want.sort();
            prop_assert_eq!(popped, want);
        }

        #[test]
        fn push_then_pop_returns_pushed_minimum(items in prop::collection::vec(0i32..1000, 0..50), x in -1000i32..2000) {
            let mut h = MinHeap::new();
            for v in &items {
                h.push(*v);
            }
            h.push(x);
            let popped = h.pop();
            prop_assert_eq!(popped == Some(x), items.iter().all(|v| x <= *v));
        }
    }
}
