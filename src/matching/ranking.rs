use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::marker::PhantomData;

use crate::models::{Order, TopRow};

/// A total order over resting orders of one side. `Greater` means "ranks
/// ahead", matching the max-heap convention of `BinaryHeap`.
pub trait Ranking {
    fn rank(a: &Order, b: &Order) -> Ordering;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuyRanking;

#[derive(Debug, Clone, Copy, Default)]
pub struct SellRanking;

impl Ranking for BuyRanking {
    fn rank(a: &Order, b: &Order) -> Ordering {
        a.price.total_cmp(&b.price).then_with(|| b.id.cmp(&a.id))
    }
}

impl Ranking for SellRanking {
    fn rank(a: &Order, b: &Order) -> Ordering {
        b.price.total_cmp(&a.price).then_with(|| b.id.cmp(&a.id))
    }
}

struct Ranked<R> {
    order: Order,
    _ranking: PhantomData<R>,
}

impl<R> Ranked<R> {
    fn new(order: Order) -> Self {
        Self {
            order,
            _ranking: PhantomData,
        }
    }
}

impl<R> Clone for Ranked<R> {
    fn clone(&self) -> Self {
        Self::new(self.order.clone())
    }
}

impl<R: Ranking> PartialEq for Ranked<R> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<R: Ranking> Eq for Ranked<R> {}

impl<R: Ranking> PartialOrd for Ranked<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Ranking> Ord for Ranked<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        R::rank(&self.order, &other.order)
    }
}

pub struct Ladder<R: Ranking> {
    heap: BinaryHeap<Ranked<R>>,
}

pub type BidLadder = Ladder<BuyRanking>;
pub type AskLadder = Ladder<SellRanking>;

impl<R: Ranking> Default for Ladder<R> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }
}

impl<R: Ranking> fmt::Debug for Ladder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ladder").field("len", &self.heap.len()).finish()
    }
}

impl<R: Ranking> Ladder<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        debug_assert!(order.quantity > 0, "filled orders never rest");
        self.heap.push(Ranked::new(order));
    }

    pub fn peek(&self) -> Option<&Order> {
        self.heap.peek().map(|ranked| &ranked.order)
    }

    pub fn pop(&mut self) -> Option<Order> {
        self.heap.pop().map(|ranked| ranked.order)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Best `n` orders, best first. Works on a clone; the ladder is untouched.
    pub fn top(&self, n: usize) -> Vec<TopRow> {
        let mut copy = self.heap.clone();
        let mut rows = Vec::with_capacity(n.min(copy.len()));
        while rows.len() < n {
            let Some(ranked) = copy.pop() else { break };
            rows.push(TopRow::from(&ranked.order));
        }
        rows
    }
}
