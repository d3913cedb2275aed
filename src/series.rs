use std::collections::VecDeque;

/// An ordered, appendable sequence with O(1) append and O(1) removal from
/// either end. The plot driver collects its sample coordinates in one of
/// these; removal never mixes ends implicitly, callers pick `pop_back` or
/// `pop_front` explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<T> {
  items: VecDeque<T>,
}

impl<T> Series<T> {
  pub fn new() -> Self {
    Series {
      items: VecDeque::new(),
    }
  }

  pub fn push(&mut self, item: T) {
    self.items.push_back(item);
  }

  pub fn pop_back(&mut self) -> Option<T> {
    self.items.pop_back()
  }

  pub fn pop_front(&mut self) -> Option<T> {
    self.items.pop_front()
  }

  pub fn get(&self, index: usize) -> Option<&T> {
    self.items.get(index)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
    self.items.iter()
  }
}

impl<T> Default for Series<T> {
  fn default() -> Self {
    Series::new()
  }
}

impl<T> FromIterator<T> for Series<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Series {
      items: iter.into_iter().collect(),
    }
  }
}

impl<'a, T> IntoIterator for &'a Series<T> {
  type Item = &'a T;
  type IntoIter = std::collections::vec_deque::Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<T> IntoIterator for Series<T> {
  type Item = T;
  type IntoIter = std::collections::vec_deque::IntoIter<T>;

  fn into_iter(self) -> Self::IntoIter {
    self.items.into_iter()
  }
}
