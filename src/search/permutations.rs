// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lazy k-permutation and cartesian-power enumeration.
//!
//! Both iterators yield index vectors in lexicographic order, so a search
//! visits candidates in the same order on every run.

/// Ordered selections of `k` distinct indices out of `0..n`.
#[derive(Debug, Clone)]
pub struct Permutations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    cycles: Vec<usize>,
    first: bool,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..n).collect(),
            cycles: (0..k).map(|i| n.saturating_sub(i)).collect(),
            first: true,
            done: k > n,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        if self.first {
            self.first = false;
            return Some(self.indices[..self.k].to_vec());
        }

        for i in (0..self.k).rev() {
            self.cycles[i] -= 1;
            if self.cycles[i] == 0 {
                self.indices[i..].rotate_left(1);
                self.cycles[i] = self.n - i;
            } else {
                let j = self.n - self.cycles[i];
                self.indices.swap(i, j);
                return Some(self.indices[..self.k].to_vec());
            }
        }

        self.done = true;
        None
    }
}

/// Every `k`-tuple over `0..n`, repeats allowed. The last slot turns fastest.
#[derive(Debug, Clone)]
pub struct Product {
    n: usize,
    current: Vec<usize>,
    done: bool,
}

impl Product {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            current: vec![0; k],
            done: n == 0 && k > 0,
        }
    }
}

impl Iterator for Product {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        self.done = true;
        for slot in self.current.iter_mut().rev() {
            *slot += 1;
            if *slot < self.n {
                self.done = false;
                break;
            }
            *slot = 0;
        }
        Some(item)
    }
}

/// Ordered selections of `k` distinct items from `pool`.
pub fn permutations_of<T>(pool: Vec<T>, k: usize) -> impl Iterator<Item = Vec<T>> + Send
where
    T: Clone + Send,
{
    Permutations::new(pool.len(), k)
        .map(move |picked| picked.iter().map(|&i| pool[i].clone()).collect())
}

/// Every `k`-tuple over `pool`, repeats allowed.
pub fn product_of<T>(pool: Vec<T>, k: usize) -> impl Iterator<Item = Vec<T>> + Send
where
    T: Clone + Send,
{
    Product::new(pool.len(), k)
        .map(move |picked| picked.iter().map(|&i| pool[i].clone()).collect())
}
