/// Lexicographic k-of-n index combinations.
///
/// `Combinations::new(7, 5)` yields the 21 five-card subsets of a seven-card hand.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self { n, indices: (0..k).collect(), done: k > n }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.indices.clone();
        let k = self.indices.len();

        // rightmost index that still has room to move
        match (0..k).rev().find(|&i| self.indices[i] < self.n - (k - i)) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
