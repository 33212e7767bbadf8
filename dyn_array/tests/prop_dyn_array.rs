//! Property-based tests for DynArray growth and mutation.

use proptest::prelude::*;

use dyn_array::{DynArray, DynArrayConfig, DynArrayError, GrowthMode, GrowthPolicy};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck_derive::Pod, bytemuck_derive::Zeroable)]
struct P {
    a: u32,
    b: u32,
}

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Pop,
    InsertShift(usize, u32),
    InsertSwap(usize, u32),
    RemoveShift(usize),
    RemoveSwap(usize),
    ShrinkToFit,
    Reserve(usize),
    Truncate(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::Push),
        2 => Just(Op::Pop),
        2 => (0usize..40, any::<u32>()).prop_map(|(i, v)| Op::InsertShift(i, v)),
        2 => (0usize..40, any::<u32>()).prop_map(|(i, v)| Op::InsertSwap(i, v)),
        2 => (0usize..40).prop_map(Op::RemoveShift),
        2 => (0usize..40).prop_map(Op::RemoveSwap),
        1 => Just(Op::ShrinkToFit),
        1 => (0usize..20).prop_map(Op::Reserve),
        1 => (0usize..40).prop_map(Op::Truncate),
    ]
}

fn policy() -> impl Strategy<Value = GrowthPolicy> {
    prop_oneof![
        (2usize..5).prop_map(|f| GrowthPolicy::multiply(f).unwrap()),
        (1usize..17).prop_map(|n| GrowthPolicy::add(n).unwrap()),
    ]
}

/// Applies `op` to both the array and a `Vec` model, checking they agree.
fn apply(array: &mut DynArray<u32>, model: &mut Vec<u32>, op: &Op) -> Result<(), TestCaseError> {
    let len = model.len();

    match *op {
        Op::Push(v) => {
            array.push(v).unwrap();
            model.push(v);
        }
        Op::Pop => match model.pop() {
            Some(v) => {
                prop_assert_eq!(array.pop(), Ok(v));
            }
            None => {
                prop_assert_eq!(array.pop(), Err(DynArrayError::EmptyContainer));
            }
        },
        Op::InsertShift(i, v) => {
            if i <= len {
                array.insert_shift(i, v).unwrap();
                model.insert(i, v);
            } else {
                prop_assert_eq!(
                    array.insert_shift(i, v),
                    Err(DynArrayError::IndexOutOfBounds(i, len))
                );
            }
        }
        Op::InsertSwap(i, v) => {
            if i <= len {
                array.insert_swap(i, v).unwrap();
                model.push(v);
                model.swap(i, len);
            } else {
                prop_assert_eq!(
                    array.insert_swap(i, v),
                    Err(DynArrayError::IndexOutOfBounds(i, len))
                );
            }
        }
        Op::RemoveShift(i) => {
            if i < len {
                prop_assert_eq!(array.remove_shift(i), Ok(model.remove(i)));
            } else {
                prop_assert_eq!(
                    array.remove_shift(i),
                    Err(DynArrayError::IndexOutOfBounds(i, len))
                );
            }
        }
        Op::RemoveSwap(i) => {
            if i < len {
                prop_assert_eq!(array.remove_swap(i), Ok(model.swap_remove(i)));
            } else {
                prop_assert_eq!(
                    array.remove_swap(i),
                    Err(DynArrayError::IndexOutOfBounds(i, len))
                );
            }
        }
        Op::ShrinkToFit => {
            array.shrink_to_fit().unwrap();
            prop_assert_eq!(array.capacity(), len);
        }
        Op::Reserve(n) => {
            let before = array.capacity();
            array.reserve(n).unwrap();
            prop_assert_eq!(array.capacity(), before.max(len + n));
        }
        Op::Truncate(n) => {
            array.truncate(n);
            model.truncate(n);
        }
    }

    Ok(())
}

//
// -----------------------------------------------------------------------------
// Model equivalence
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_matches_vec_model(
        initial in 0usize..8,
        growth in policy(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let config = DynArrayConfig::new()
            .with_initial_capacity(initial)
            .with_growth(growth);
        let mut array = DynArray::with_config(config).unwrap();
        let mut model = Vec::new();

        for op in &ops {
            apply(&mut array, &mut model, op)?;

            prop_assert!(array.len() <= array.capacity());
            prop_assert_eq!(array.is_allocated(), array.capacity() > 0);
            prop_assert_eq!(array.as_slice(), model.as_slice());
        }
    }
}

//
// -----------------------------------------------------------------------------
// Stack behaviour
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_push_pop_is_lifo(values: Vec<(u32, u32)>, growth in policy()) {
        let config = DynArrayConfig::new().with_growth(growth);
        let mut array = DynArray::<P>::with_config(config).unwrap();

        for (a, b) in &values {
            array.push(P { a: *a, b: *b }).unwrap();
        }
        prop_assert_eq!(array.len(), values.len());

        for (a, b) in values.iter().rev() {
            prop_assert_eq!(array.pop(), Ok(P { a: *a, b: *b }));
        }
        prop_assert_eq!(array.pop(), Err(DynArrayError::EmptyContainer));
    }
}

proptest! {
    #[test]
    fn prop_push_then_pop_is_identity(values: Vec<u32>, extra: u32) {
        let mut array = DynArray::new(0, GrowthMode::Multiply, 2).unwrap();
        for v in &values {
            array.push(*v).unwrap();
        }

        let len = array.len();
        array.push(extra).unwrap();
        prop_assert_eq!(array.pop(), Ok(extra));
        prop_assert_eq!(array.len(), len);
        prop_assert_eq!(array.as_slice(), values.as_slice());
    }
}

//
// -----------------------------------------------------------------------------
// Indexed insertion and removal
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_insert_shift_moves_tail_up(values: Vec<u32>, index in 0usize..1000, v: u32) {
        let mut array = DynArray::new(values.len(), GrowthMode::Add, 3).unwrap();
        array.extend_from_slice(&values).unwrap();

        let i = index % (values.len() + 1);
        array.insert_shift(i, v).unwrap();

        prop_assert_eq!(array[i], v);
        prop_assert_eq!(&array.as_slice()[..i], &values[..i]);
        prop_assert_eq!(&array.as_slice()[i + 1..], &values[i..]);
    }
}

proptest! {
    #[test]
    fn prop_insert_swap_moves_one_to_end(values: Vec<u32>, index in 0usize..1000, v: u32) {
        let mut array = DynArray::new(values.len(), GrowthMode::Multiply, 2).unwrap();
        array.extend_from_slice(&values).unwrap();

        let i = index % (values.len() + 1);
        array.insert_swap(i, v).unwrap();

        prop_assert_eq!(array[i], v);
        prop_assert_eq!(array.len(), values.len() + 1);
        if i < values.len() {
            prop_assert_eq!(array[array.len() - 1], values[i]);
        }
        for (j, expected) in values.iter().enumerate() {
            if j != i {
                prop_assert_eq!(array[j], *expected);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_remove_shift_moves_tail_down(values in prop::collection::vec(any::<u32>(), 1..200), index in 0usize..1000) {
        let mut array = DynArray::new(0, GrowthMode::Add, 7).unwrap();
        array.extend_from_slice(&values).unwrap();

        let i = index % values.len();
        prop_assert_eq!(array.remove_shift(i), Ok(values[i]));
        prop_assert_eq!(&array.as_slice()[..i], &values[..i]);
        prop_assert_eq!(&array.as_slice()[i..], &values[i + 1..]);
    }
}

proptest! {
    #[test]
    fn prop_remove_swap_fills_hole_with_last(values in prop::collection::vec(any::<u32>(), 1..200), index in 0usize..1000) {
        let mut array = DynArray::new(0, GrowthMode::Multiply, 3).unwrap();
        array.extend_from_slice(&values).unwrap();

        let i = index % values.len();
        let last = values.len() - 1;
        prop_assert_eq!(array.remove_swap(i), Ok(values[i]));
        prop_assert_eq!(array.len(), last);
        if i != last {
            prop_assert_eq!(array[i], values[last]);
        }
    }
}

//
// -----------------------------------------------------------------------------
// Capacity management
// -----------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_shrink_then_push_grows_by_policy(values: Vec<u32>, growth in policy()) {
        let config = DynArrayConfig::new().with_growth(growth);
        let mut array = DynArray::with_config(config).unwrap();
        for v in &values {
            array.push(*v).unwrap();
        }

        array.shrink_to_fit().unwrap();
        prop_assert_eq!(array.capacity(), values.len());

        array.push(0).unwrap();
        let expected = match growth.mode() {
            GrowthMode::Multiply => values.len().max(1) * growth.step(),
            GrowthMode::Add => values.len() + growth.step(),
        };
        prop_assert_eq!(array.capacity(), expected);
    }
}

proptest! {
    #[test]
    fn prop_never_exceeds_ceiling(ceiling in 0usize..64, growth in policy(), pushes in 0usize..100) {
        let config = DynArrayConfig::new()
            .with_growth(growth)
            .with_max_capacity(ceiling);
        let mut array = DynArray::with_config(config).unwrap();

        for i in 0..pushes {
            let result = array.push(i);
            if i < ceiling {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result, Err(DynArrayError::CapacityExhausted(ceiling)));
            }
            prop_assert!(array.capacity() <= ceiling);
        }
        prop_assert_eq!(array.len(), pushes.min(ceiling));
    }
}

// Invariant: the byte view covers exactly the live elements.
proptest! {
    #[test]
    fn prop_bytes_cover_live_prefix(values: Vec<(u32, u32)>) {
        let mut array = DynArray::new(64, GrowthMode::Add, 64).unwrap();
        for (a, b) in &values {
            array.push(P { a: *a, b: *b }).unwrap();
        }

        let bytes = array.as_bytes();
        prop_assert_eq!(bytes.len(), values.len() * std::mem::size_of::<P>());
        let expected: Vec<P> = values.iter().map(|&(a, b)| P { a, b }).collect();
        prop_assert_eq!(bytes, bytemuck::cast_slice::<P, u8>(&expected));
    }
}
