//! Statistical reducers.
//!
//! Each reducer has a plain form over the items themselves and a `_by` form
//! over a derived key. Items without a numeric reading (see
//! [`Value::to_number`]) are skipped by the numeric reducers.

use core::cmp::Ordering;

use super::Collection;
use crate::{Key, Value};

impl Collection {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.sum_by(|v, _| v.clone())
    }

    /// Sum of the derived numbers. An empty collection sums to zero.
    pub fn sum_by<F>(&self, f: F) -> f64
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.numbers(f).iter().sum()
    }

    #[must_use]
    pub fn avg(&self) -> Option<f64> {
        self.avg_by(|v, _| v.clone())
    }

    /// Mean of the derived numbers, `None` when there are none.
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_by<F>(&self, f: F) -> Option<f64>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let numbers = self.numbers(f);
        if numbers.is_empty() {
            return None;
        }
        Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
    }

    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.median_by(|v, _| v.clone())
    }

    /// Middle of the sorted derived numbers; the mean of the two middle
    /// values for an even count.
    pub fn median_by<F>(&self, f: F) -> Option<f64>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut numbers = self.numbers(f);
        if numbers.is_empty() {
            return None;
        }
        numbers.sort_by(f64::total_cmp);
        let mid = numbers.len() / 2;
        if numbers.len() % 2 == 0 {
            Some((numbers[mid - 1] + numbers[mid]) / 2.0)
        } else {
            Some(numbers[mid])
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<Collection> {
        self.mode_by(|v, _| v.clone())
    }

    /// The most frequent derived values, ascending. Ties all appear.
    ///
    /// ```rust
    /// use datapath::Collection;
    ///
    /// let modes = Collection::from(vec![3, 1, 3, 1, 2]).mode().unwrap();
    /// assert_eq!(modes, Collection::from(vec![1, 3]));
    /// ```
    pub fn mode_by<F>(&self, f: F) -> Option<Collection>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut counts: Vec<(Value, usize)> = Vec::new();
        for (k, v) in &self.items {
            let derived = f(v, k);
            if derived.is_null() {
                continue;
            }
            match counts.iter_mut().find(|(seen, _)| *seen == derived) {
                Some((_, n)) => *n += 1,
                None => counts.push((derived, 1)),
            }
        }
        let top = counts.iter().map(|(_, n)| *n).max()?;
        let mut modes: Vec<Value> = counts
            .into_iter()
            .filter(|(_, n)| *n == top)
            .map(|(v, _)| v)
            .collect();
        modes.sort_by(Value::compare);
        Some(modes.into_iter().collect())
    }

    #[must_use]
    pub fn min(&self) -> Option<Value> {
        self.min_by(|v, _| v.clone())
    }

    /// Smallest derived value by [`Value::compare`], nulls ignored.
    pub fn min_by<F>(&self, f: F) -> Option<Value>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.extreme(f, Ordering::Less)
    }

    #[must_use]
    pub fn max(&self) -> Option<Value> {
        self.max_by(|v, _| v.clone())
    }

    /// Largest derived value by [`Value::compare`], nulls ignored.
    pub fn max_by<F>(&self, f: F) -> Option<Value>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.extreme(f, Ordering::Greater)
    }

    fn extreme<F>(&self, f: F, wanted: Ordering) -> Option<Value>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut best: Option<Value> = None;
        for (k, v) in &self.items {
            let derived = f(v, k);
            if derived.is_null() {
                continue;
            }
            match &best {
                Some(current) if derived.compare(current) != wanted => {}
                _ => best = Some(derived),
            }
        }
        best
    }

    fn numbers<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.items
            .iter()
            .filter_map(|(k, v)| f(v, k).to_number())
            .collect()
    }
}
