//! Property-based invariant tests for selector memoization.
//!
//! These tests verify invariants that must hold for any call sequence:
//!
//! 1. A memoized selector runs its combiner exactly when some dependency
//!    output changed since the previous call (or on the first call).
//! 2. A cache hit returns the previous result allocation.
//! 3. A plain selector runs its combiner on every call.
//! 4. Sequence and variadic forms produce the same results and recompute
//!    counts.
//! 5. Structured selectors emit their keys in declaration order.
//! 6. A memoized selector's result always equals the plain selector's.

use memo_select::{
    Input, SelectorCreator, StructuredSpec, Value, build_memoized_selector, build_selector,
};
use proptest::prelude::*;

type In = Input<Value, Value>;

const KEYS: [&str; 5] = ["a", "b", "c", "d", "e"];

// ── Helpers ─────────────────────────────────────────────────────────────

fn field(key: &'static str) -> In {
    Input::state(move |s: &Value| s.get(key))
}

fn fields(arity: usize) -> Vec<In> {
    KEYS[..arity].iter().copied().map(field).collect()
}

fn tagged(values: &[Value]) -> Value {
    Value::list(values.iter().cloned())
}

fn make_state(values: &[i32]) -> Value {
    Value::record(KEYS.iter().copied().zip(values.iter().map(|&v| Value::from(v))))
}

/// Call sequences over a small value range, so repeats are common.
fn states_strategy() -> impl Strategy<Value = Vec<Vec<i32>>> {
    proptest::collection::vec(proptest::collection::vec(0i32..3, KEYS.len()), 1..24)
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Recompute iff changed; hits reuse the allocation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn memo_recomputes_iff_inputs_changed(
        arity in 1usize..=5,
        states in states_strategy(),
    ) {
        let sel = build_memoized_selector((fields(arity), tagged)).unwrap();
        let mut previous: Option<(Vec<i32>, Value)> = None;
        let mut expected_recomputes = 0u64;

        for raw in &states {
            let inputs = raw[..arity].to_vec();
            let result = sel.select(&make_state(raw));
            match &previous {
                Some((last_inputs, last_result)) if *last_inputs == inputs => {
                    prop_assert!(result.ptr_eq(last_result));
                }
                _ => {
                    expected_recomputes += 1;
                    if let Some((_, last_result)) = &previous {
                        prop_assert!(!result.ptr_eq(last_result));
                    }
                }
            }
            prop_assert_eq!(sel.recomputations(), expected_recomputes);
            previous = Some((inputs, result));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Plain selectors always recompute
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plain_recomputes_every_call(
        arity in 1usize..=5,
        states in states_strategy(),
    ) {
        let sel = build_selector((fields(arity), tagged)).unwrap();
        for raw in &states {
            let _ = sel.select(&make_state(raw));
        }
        prop_assert_eq!(sel.recomputations(), states.len() as u64);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Sequence form == variadic form
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sequence_form_matches_variadic_form(
        arity in 0usize..=5,
        states in states_strategy(),
    ) {
        let creator = SelectorCreator::default();
        let variadic = creator.from_inputs(fields(arity), tagged).unwrap();
        let sequence = creator.from_sequence(fields(arity), tagged).unwrap();
        for raw in &states {
            let state = make_state(raw);
            prop_assert_eq!(variadic.select(&state), sequence.select(&state));
        }
        prop_assert_eq!(variadic.recomputations(), sequence.recomputations());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Structured key order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn structured_keys_follow_declaration_order(
        order in Just(KEYS.to_vec()).prop_shuffle(),
        raw in proptest::collection::vec(0i32..3, KEYS.len()),
    ) {
        let spec: StructuredSpec<Value, Value> = order
            .iter()
            .map(|&key| (format!("out_{key}"), field(key)))
            .collect();
        let sel = build_memoized_selector(spec).unwrap();
        let out = sel.select(&make_state(&raw));
        let record = out.as_record().unwrap();

        let keys: Vec<String> = record.keys().map(str::to_owned).collect();
        let expected: Vec<String> = order.iter().map(|k| format!("out_{k}")).collect();
        prop_assert_eq!(keys, expected);
        for key in &order {
            let idx = KEYS.iter().position(|k| k == key).unwrap();
            prop_assert_eq!(out.get(&format!("out_{key}")), Value::from(raw[idx]));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Memoized and plain agree on values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn memoized_matches_plain(
        arity in 1usize..=5,
        states in states_strategy(),
    ) {
        let memo = build_memoized_selector((fields(arity), tagged)).unwrap();
        let plain = build_selector((fields(arity), tagged)).unwrap();
        for raw in &states {
            let state = make_state(raw);
            prop_assert_eq!(memo.select(&state), plain.select(&state));
        }
        prop_assert!(memo.recomputations() <= plain.recomputations());
    }
}
