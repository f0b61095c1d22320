//! # Grouping Engine
//!
//! Partition a collection by a derived key and return the partitions in
//! ascending key order.
//!
//! ## Guarantees
//!
//! - Every input item lands in exactly one group
//! - Group keys are strictly ascending
//! - Within a group, items keep their input order
//! - Groups are never empty
//!
//! Grouping is a single pass over the input into a hash index of group
//! slots, followed by a merge sort of the distinct keys. Keys are compared
//! only while sorting, so a single key of any shape never fails.

use crate::primitives::MAX_GROUP_ITEMS;
use crate::types::json_kind;
use crate::{Fields, GroupError, KeySelector, Record, Value};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// GROUPING RESULT
// =============================================================================

/// Ordered mapping from group key to the items in that group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, T> {
    groups: Vec<(K, Vec<T>)>,
}

impl<K, T> Default for Grouping<K, T> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<K, T> Grouping<K, T> {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all groups.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    /// Group keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    /// Groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[T])> {
        self.groups.iter().map(|(key, items)| (key, items.as_slice()))
    }

    /// All items, group by group, in key order.
    #[must_use]
    pub fn flatten(self) -> Vec<T> {
        self.groups
            .into_iter()
            .flat_map(|(_, items)| items)
            .collect()
    }
}

impl<K: PartialEq, T> Grouping<K, T> {
    /// Items of the group with this key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&[T]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, items)| items.as_slice())
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = (K, Vec<T>);
    type IntoIter = std::vec::IntoIter<(K, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Serialized form of one group.
#[derive(Serialize)]
struct GroupEntry<'a, K, T> {
    key: &'a K,
    items: &'a [T],
}

/// Serializes as `[{"key": .., "items": [..]}, ..]` so key order and key
/// type survive formats whose maps only take string keys.
impl<K: Serialize, T: Serialize> Serialize for Grouping<K, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(
            self.groups
                .iter()
                .map(|(key, items)| GroupEntry { key, items }),
        )
    }
}

// =============================================================================
// GROUP BY (dynamic keys)
// =============================================================================

/// Group items by a field name or key function.
///
/// # Errors
/// - `GroupError::InvalidArgument` if the selector cannot be resolved
/// - `GroupError::KeyComparison` if two keys met while sorting cannot be
///   ordered against each other
pub fn group_by<T, I>(
    items: I,
    selector: &KeySelector<T>,
) -> Result<Grouping<Value, T>, GroupError>
where
    T: Fields,
    I: IntoIterator<Item = T>,
{
    let key = selector.resolve()?;
    group_with(items, |item| key.key_of(item))
}

/// Group items of any type by a key function.
///
/// Same contract as [`group_by`]; the items need no field access.
pub fn group_by_fn<T, I, F>(items: I, key_of: F) -> Result<Grouping<Value, T>, GroupError>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Value,
{
    group_with(items, key_of)
}

fn group_with<T, I, F>(items: I, mut key_of: F) -> Result<Grouping<Value, T>, GroupError>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Value,
{
    let mut index: HashMap<Value, usize> = HashMap::new();
    let mut groups: Vec<(Value, Vec<T>)> = Vec::new();

    for item in items {
        match index.entry(key_of(&item)) {
            Entry::Occupied(slot) => groups[*slot.get()].1.push(item),
            Entry::Vacant(slot) => {
                groups.push((slot.key().clone(), vec![item]));
                slot.insert(groups.len() - 1);
            }
        }
    }

    let groups = sort_groups(groups)?;
    tracing::trace!(groups = groups.len(), "grouped items");
    Ok(Grouping { groups })
}

/// Stable merge sort on the group keys that stops at the first pair
/// `Value::try_cmp` cannot order.
///
/// Every adjacent pair of the output is compared by some merge step, so a
/// successful sort is strictly ascending. Keys are distinct, and distinct
/// comparable values are never `Equal`.
fn sort_groups<T>(
    mut groups: Vec<(Value, Vec<T>)>,
) -> Result<Vec<(Value, Vec<T>)>, GroupError> {
    if groups.len() <= 1 {
        return Ok(groups);
    }

    let right = groups.split_off(groups.len() / 2);
    let left = sort_groups(groups)?;
    let right = sort_groups(right)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some((a, _)), Some((b, _))) = (left.peek(), right.peek()) {
        let next = if b.try_cmp(a)? == Ordering::Less {
            right.next()
        } else {
            left.next()
        };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);

    Ok(merged)
}

// =============================================================================
// GROUP BY KEY (statically typed keys)
// =============================================================================

/// Group items by a key with a total order.
///
/// Infallible counterpart of [`group_by`] for callers whose key type is
/// already `Ord`.
pub fn group_by_key<T, K, I, F>(items: I, mut key_of: F) -> Grouping<K, T>
where
    K: Ord,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> K,
{
    let mut buckets: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        buckets.entry(key_of(&item)).or_default().push(item);
    }
    Grouping {
        groups: buckets.into_iter().collect(),
    }
}

// =============================================================================
// GROUP JSON
// =============================================================================

/// Group a JSON array of objects.
///
/// Fields of any JSON type are kept; only the selected key is compared.
///
/// # Errors
/// `GroupError::InvalidArgument` if `input` is not an array, holds more
/// than `MAX_GROUP_ITEMS` elements, or an element is not an object;
/// otherwise as [`group_by`].
pub fn group_json(
    input: &serde_json::Value,
    selector: &KeySelector<Record>,
) -> Result<Grouping<Value, Record>, GroupError> {
    selector.validate()?;

    let serde_json::Value::Array(elements) = input else {
        return Err(GroupError::InvalidArgument(format!(
            "items must be an array of records, found {}",
            json_kind(input)
        )));
    };

    if elements.len() > MAX_GROUP_ITEMS {
        return Err(GroupError::InvalidArgument(format!(
            "item count {} exceeds maximum {}",
            elements.len(),
            MAX_GROUP_ITEMS
        )));
    }

    let records = elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            Record::try_from(element).map_err(|e| e.in_context(&format!("item {i}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    group_by(records, selector)
}

// =============================================================================
// TESTS
// =============================================================================
