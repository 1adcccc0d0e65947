//! Cart item and cart state types
//!
//! This module defines the canonical cart model for all cartbox operations.
//! The serialized form is a bare JSON array of line objects:
//!
//! ```json
//! [{"id":5,"quantity":2},{"id":9,"quantity":1}]
//! ```
//!
//! ## Update Discipline
//!
//! `CartState` is never mutated in place. Every update operation
//! (`with_increment`, `with_decrement`, `without`) returns a fresh state
//! derived from the receiver, so snapshots handed out earlier stay valid.
//!
//! ## Quantity Invariant
//!
//! A line with quantity zero cannot be represented: `CartItem::quantity`
//! is a `NonZeroU32`. Decrementing a quantity-1 line removes the line,
//! and persisted text containing `"quantity":0` fails to parse.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// One product line in a cart: a product id and how many of it.
///
/// Items compare by value and are `Copy`; cart updates clone them freely.
/// The quantity is structurally non-zero, so "present with quantity 0"
/// is unrepresentable rather than merely discouraged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable product identifier
    pub id: u64,

    /// Number of units, always at least 1
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// Create an item with the given quantity.
    ///
    /// Returns `None` when `quantity` is zero, since a zero-quantity
    /// line has no representation.
    pub fn new(id: u64, quantity: u32) -> Option<Self> {
        NonZeroU32::new(quantity).map(|quantity| Self { id, quantity })
    }

    /// Create a single-unit line, the shape produced by a first increment.
    pub fn one(id: u64) -> Self {
        Self {
            id,
            quantity: NonZeroU32::MIN,
        }
    }
}

/// The full contents of a cart: an ordered collection of [`CartItem`]s.
///
/// Serializes transparently as a bare JSON array, matching the persisted
/// wire form. At most one line exists per product id, and insertion order
/// of distinct ids is preserved across updates.
///
/// All update operations are pure: they build and return a new state and
/// leave the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from existing lines.
    ///
    /// The lines are adopted as given; callers seeding by hand are
    /// responsible for id uniqueness, just as parsed persisted data is
    /// adopted as stored.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// All lines, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// True when a line for `id` exists.
    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Quantity of the line for `id`, or 0 when absent.
    ///
    /// Absence and zero are deliberately collapsed here: callers asking
    /// "how many of X" want a number, not an `Option`.
    pub fn item_quantity(&self, id: u64) -> u32 {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity.get())
            .unwrap_or(0)
    }

    /// Total units across all lines.
    ///
    /// Accumulation saturates at `u32::MAX`, so adopted stored carts
    /// whose lines sum past it report `u32::MAX` rather than wrapping.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity.get()))
    }

    /// A new state with the quantity for `id` one higher.
    ///
    /// Absent ids gain a quantity-1 line at the end; present ids keep
    /// their position. A quantity already at `u32::MAX` stays there.
    pub fn with_increment(&self, id: u64) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.quantity = item.quantity.checked_add(1).unwrap_or(NonZeroU32::MAX);
            }
            None => items.push(CartItem::one(id)),
        }
        Self { items }
    }

    /// A new state with the quantity for `id` one lower.
    ///
    /// A quantity-1 line is removed outright, never left at zero.
    /// Decrementing an absent id returns an equal state.
    pub fn with_decrement(&self, id: u64) -> Self {
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                if item.id != id {
                    return Some(*item);
                }
                NonZeroU32::new(item.quantity.get() - 1)
                    .map(|quantity| CartItem { id, quantity })
            })
            .collect();
        Self { items }
    }

    /// A new state with the line for `id` removed regardless of quantity.
    ///
    /// Removing an absent id returns an equal state.
    pub fn without(&self, id: u64) -> Self {
        Self {
            items: self
                .items
                .iter()
                .copied()
                .filter(|item| item.id != id)
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CartState {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_of(pairs: &[(u64, u32)]) -> CartState {
        CartState::from_items(
            pairs
                .iter()
                .map(|&(id, quantity)| CartItem::new(id, quantity).unwrap())
                .collect(),
        )
    }

    // ========================================================================
    // Construction
    // ========================================================================

    mod construction {
        use super::*;

        #[test]
        fn test_zero_quantity_item_is_unrepresentable() {
            assert!(CartItem::new(7, 0).is_none());
            assert!(CartItem::new(7, 1).is_some());
        }

        #[test]
        fn test_one_starts_at_quantity_1() {
            let item = CartItem::one(3);
            assert_eq!(item.id, 3);
            assert_eq!(item.quantity.get(), 1);
        }

        #[test]
        fn test_new_state_is_empty() {
            let state = CartState::new();
            assert!(state.is_empty());
            assert_eq!(state.len(), 0);
            assert_eq!(state.total_quantity(), 0);
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    mod queries {
        use super::*;

        #[test]
        fn test_item_quantity_reports_0_for_absent_id() {
            let state = state_of(&[(1, 2)]);
            assert_eq!(state.item_quantity(1), 2);
            assert_eq!(state.item_quantity(99), 0);
        }

        #[test]
        fn test_total_quantity_sums_all_lines() {
            let state = state_of(&[(1, 2), (2, 1), (3, 4)]);
            assert_eq!(state.total_quantity(), 7);
        }

        #[test]
        fn test_total_quantity_saturates_at_u32_max() {
            // two max-quantity lines are representable via from_items,
            // so the aggregate must not wrap or panic
            let state = state_of(&[(1, u32::MAX), (2, u32::MAX), (3, 2)]);
            assert_eq!(state.total_quantity(), u32::MAX);
        }

        #[test]
        fn test_contains_tracks_line_presence() {
            let state = state_of(&[(5, 1)]);
            assert!(state.contains(5));
            assert!(!state.contains(6));
        }

        #[test]
        fn test_iteration_follows_insertion_order() {
            let state = state_of(&[(9, 1), (2, 1), (5, 1)]);
            let ids: Vec<u64> = state.iter().map(|item| item.id).collect();
            assert_eq!(ids, vec![9, 2, 5]);

            let borrowed: Vec<u64> = (&state).into_iter().map(|item| item.id).collect();
            assert_eq!(borrowed, ids);
        }
    }

    // ========================================================================
    // Update operations
    // ========================================================================

    mod updates {
        use super::*;

        #[test]
        fn test_increment_absent_id_appends_quantity_1_line() {
            let state = CartState::new().with_increment(42);
            assert_eq!(state.len(), 1);
            assert_eq!(state.item_quantity(42), 1);
        }

        #[test]
        fn test_increment_present_id_bumps_in_place() {
            let state = state_of(&[(1, 1), (2, 3)]).with_increment(1);
            assert_eq!(state.item_quantity(1), 2);
            assert_eq!(state.item_quantity(2), 3);

            let ids: Vec<u64> = state.iter().map(|item| item.id).collect();
            assert_eq!(ids, vec![1, 2]);
        }

        #[test]
        fn test_n_increments_yield_quantity_n() {
            let mut state = CartState::new();
            for _ in 0..17 {
                state = state.with_increment(8);
            }
            assert_eq!(state.item_quantity(8), 17);
            assert_eq!(state.len(), 1);
        }

        #[test]
        fn test_increment_saturates_at_u32_max() {
            let state = state_of(&[(1, u32::MAX)]).with_increment(1);
            assert_eq!(state.item_quantity(1), u32::MAX);
        }

        #[test]
        fn test_decrement_above_1_lowers_quantity() {
            let state = state_of(&[(1, 3)]).with_decrement(1);
            assert_eq!(state.item_quantity(1), 2);
            assert!(state.contains(1));
        }

        #[test]
        fn test_decrement_at_quantity_1_removes_line() {
            let state = state_of(&[(1, 1), (2, 2)]).with_decrement(1);
            assert!(!state.contains(1));
            assert_eq!(state.item_quantity(2), 2);
            assert_eq!(state.len(), 1);
        }

        #[test]
        fn test_decrement_absent_id_is_a_noop() {
            let before = state_of(&[(1, 2)]);
            let after = before.with_decrement(99);
            assert_eq!(before, after);
        }

        #[test]
        fn test_without_removes_line_regardless_of_quantity() {
            let state = state_of(&[(1, 5), (2, 1)]).without(1);
            assert!(!state.contains(1));
            assert_eq!(state.item_quantity(2), 1);
        }

        #[test]
        fn test_without_absent_id_is_a_noop() {
            let before = state_of(&[(1, 2)]);
            let after = before.without(7);
            assert_eq!(before, after);
        }

        #[test]
        fn test_updates_leave_receiver_untouched() {
            let original = state_of(&[(1, 1)]);
            let _ = original.with_increment(1);
            let _ = original.with_decrement(1);
            let _ = original.without(1);
            assert_eq!(original, state_of(&[(1, 1)]));
        }
    }

    // ========================================================================
    // Serialized form
    // ========================================================================

    mod wire_format {
        use super::*;

        #[test]
        fn test_state_serializes_as_bare_array() {
            let state = state_of(&[(5, 2)]);
            let text = serde_json::to_string(&state).unwrap();
            assert_eq!(text, r#"[{"id":5,"quantity":2}]"#);
        }

        #[test]
        fn test_empty_state_serializes_as_empty_array() {
            let text = serde_json::to_string(&CartState::new()).unwrap();
            assert_eq!(text, "[]");
        }

        #[test]
        fn test_state_parses_from_bare_array() {
            let state: CartState = serde_json::from_str(r#"[{"id":5,"quantity":2}]"#).unwrap();
            assert_eq!(state.item_quantity(5), 2);
            assert_eq!(state.len(), 1);
        }

        #[test]
        fn test_zero_quantity_rejected_at_parse() {
            let result = serde_json::from_str::<CartState>(r#"[{"id":1,"quantity":0}]"#);
            assert!(result.is_err());
        }

        #[test]
        fn test_missing_field_rejected_at_parse() {
            let result = serde_json::from_str::<CartState>(r#"[{"id":1}]"#);
            assert!(result.is_err());
        }

        #[test]
        fn test_object_form_rejected_at_parse() {
            let result = serde_json::from_str::<CartState>(r#"{"id":1,"quantity":2}"#);
            assert!(result.is_err());
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn apply(state: CartState, op: u8, id: u64) -> CartState {
            match op % 3 {
                0 => state.with_increment(id),
                1 => state.with_decrement(id),
                _ => state.without(id),
            }
        }

        proptest! {
            #[test]
            fn invariants_hold_under_random_op_sequences(
                ops in proptest::collection::vec((0u8..3, 0u64..8), 0..64)
            ) {
                let mut state = CartState::new();
                for (op, id) in ops {
                    state = apply(state, op, id);

                    // one line per id
                    let mut ids: Vec<u64> = state.iter().map(|item| item.id).collect();
                    let line_count = ids.len();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), line_count);

                    // total is the sum over lines
                    let summed: u32 = state.iter().map(|item| item.quantity.get()).sum();
                    prop_assert_eq!(state.total_quantity(), summed);
                }
            }

            #[test]
            fn increment_then_decrement_is_identity(
                ops in proptest::collection::vec((0u8..3, 0u64..8), 0..32),
                id in 0u64..8
            ) {
                let mut state = CartState::new();
                for (op, op_id) in ops {
                    state = apply(state, op, op_id);
                }
                let round_tripped = state.with_increment(id).with_decrement(id);
                prop_assert_eq!(round_tripped, state);
            }

            #[test]
            fn serde_round_trip_preserves_state(
                ops in proptest::collection::vec((0u8..3, 0u64..8), 0..32)
            ) {
                let mut state = CartState::new();
                for (op, id) in ops {
                    state = apply(state, op, id);
                }
                let text = serde_json::to_string(&state).unwrap();
                let parsed: CartState = serde_json::from_str(&text).unwrap();
                prop_assert_eq!(parsed, state);
            }
        }
    }
}
