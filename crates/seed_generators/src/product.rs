/// Lazy cartesian product over lists of alternatives.
///
/// Combinations come out in odometer order: the last list varies fastest.
/// No lists yield a single empty combination; any empty list yields none.
#[derive(Debug, Clone)]
pub struct Product {
    lists: Vec<Vec<String>>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl Product {
    pub fn new(lists: Vec<Vec<String>>) -> Self {
        Self {
            cursor: vec![0; lists.len()],
            exhausted: lists.iter().any(Vec::is_empty),
            lists,
        }
    }

    /// Number of combinations `lists` produce, saturating at `usize::MAX`.
    pub fn total(lists: &[Vec<String>]) -> usize {
        lists
            .iter()
            .fold(1usize, |total, list| total.saturating_mul(list.len()))
    }

    fn advance(&mut self) {
        for slot in (0..self.cursor.len()).rev() {
            self.cursor[slot] += 1;
            if self.cursor[slot] < self.lists[slot].len() {
                return;
            }
            self.cursor[slot] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Product {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let combination = self
            .cursor
            .iter()
            .zip(&self.lists)
            .map(|(&index, list)| list[index].clone())
            .collect();
        self.advance();
        Some(combination)
    }
}
