//! Array container (BUKKIT)

use std::cmp::Ordering;

use crate::error::{Result, StdlibError};
use crate::value::{sort_order, Value};

/// An ordered, growable sequence of heterogeneous values.
///
/// Length is always the length of the backing storage; there is no separate
/// counter to drift out of sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bukkit {
    items: Vec<Value>,
}

impl Bukkit {
    /// Create an empty array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Borrow the elements.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Consume into the backing vector.
    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    fn check_index(&self, index: i64) -> Result<usize> {
        if index < 0 || index as usize >= self.items.len() {
            return Err(StdlibError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(index as usize)
    }

    /// Element at `index`.
    pub fn at(&self, index: i64) -> Result<Value> {
        let i = self.check_index(index)?;
        Ok(self.items[i].clone())
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: i64, value: Value) -> Result<()> {
        let i = self.check_index(index)?;
        self.items[i] = value;
        Ok(())
    }

    /// Append; returns the new length.
    pub fn push(&mut self, value: Value) -> usize {
        self.items.push(value);
        self.items.len()
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Result<Value> {
        self.items
            .pop()
            .ok_or(StdlibError::EmptyContainer { operation: "pop" })
    }

    /// Remove and return the first element.
    pub fn shift(&mut self) -> Result<Value> {
        if self.items.is_empty() {
            return Err(StdlibError::EmptyContainer { operation: "shift" });
        }
        Ok(self.items.remove(0))
    }

    /// Prepend; returns the new length.
    pub fn unshift(&mut self, value: Value) -> usize {
        self.items.insert(0, value);
        self.items.len()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Reverse in place.
    pub fn reverse(&mut self) {
        let len = self.items.len();
        for i in 0..len / 2 {
            self.items.swap(i, len - 1 - i);
        }
    }

    /// Sort in place with [`sort_order`].
    ///
    /// Stable merge sort. `sort_order` is not a total order across mixed
    /// kinds; the result is still a permutation of the input.
    pub fn sort(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.items = merge_sort(items);
    }

    /// Join canonical renderings with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.items
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Copy `[start, end)` into a new array. Negative bounds count from the end.
    pub fn slice(&self, start: i64, end: i64) -> Result<Bukkit> {
        let len = self.items.len() as i64;
        let start = if start < 0 { start + len } else { start };
        let end = if end < 0 { end + len } else { end };

        if start < 0 || end > len || start > end {
            return Err(StdlibError::SliceOutOfRange {
                start,
                end,
                len: self.items.len(),
            });
        }
        Ok(Bukkit::from(self.items[start as usize..end as usize].to_vec()))
    }

    /// Index of the first element equal to `value`, or -1.
    pub fn find(&self, value: &Value) -> i64 {
        self.items
            .iter()
            .position(|item| item == value)
            .map(|i| i as i64)
            .unwrap_or(-1)
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: &Value) -> bool {
        self.find(value) >= 0
    }
}

fn merge_sort(mut items: Vec<Value>) -> Vec<Value> {
    if items.len() <= 1 {
        return items;
    }
    let right = merge_sort(items.split_off(items.len() / 2));
    let left = merge_sort(items);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties keep the left element first
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => sort_order(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}

impl From<Vec<Value>> for Bukkit {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl FromIterator<Value> for Bukkit {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Bukkit {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
