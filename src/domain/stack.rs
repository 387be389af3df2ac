//! LIFO stack used by both converters

/// Unbounded last-in-first-out stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionStack<T> {
    items: Vec<T>,
}

impl<T> Default for ConversionStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConversionStack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Pop everything, yielding the top first.
    pub fn drain_top_down(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..).rev()
    }

    /// Remaining items, bottom first.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}
