use bytemuck_derive::{Pod, Zeroable};
use dyn_array::{DynArray, DynArrayConfig, DynArrayError, GrowthMode, GrowthPolicy};

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Car {
    year: i32,
    mass_kg: i32,
}

fn main() {
    println!("=== DynArray Examples ===\n");

    // Example 1: Linear growth and shrinking
    if let Err(e) = example_linear_growth() {
        println!("  failed: {}", e);
    }

    // Example 2: Shift vs. swap
    if let Err(e) = example_shift_and_swap() {
        println!("  failed: {}", e);
    }

    // Example 3: Hitting the ceiling
    if let Err(e) = example_ceiling() {
        println!("  failed: {}", e);
    }
}

fn example_linear_growth() -> Result<(), DynArrayError> {
    println!("Example 1: Cars, growing 2 slots at a time");

    let mut cars = DynArray::new(3, GrowthMode::Add, 2)?;
    for i in 0..4 {
        cars.push(Car {
            year: 2000 + i,
            mass_kg: 1000 + i,
        })?;
        println!("  len {:>2}  capacity {:>2}", cars.len(), cars.capacity());
    }

    println!("  last car: {:?}", cars.get(cars.len() - 1)?);
    println!("  raw bytes: {}", cars.as_bytes().len());

    cars.pop()?;
    cars.shrink_to_fit()?;
    println!("  after pop + shrink: capacity {}", cars.capacity());
    println!();

    Ok(())
}

fn example_shift_and_swap() -> Result<(), DynArrayError> {
    println!("Example 2: Order-preserving vs. O(1) edits");

    let mut letters = DynArray::new(1, GrowthMode::Multiply, 2)?;
    letters.extend_from_slice(&['a', 'b', 'c', 'd'])?;
    println!("  start:            {:?}", letters);

    letters.insert_swap(1, '1')?;
    println!("  insert_swap(1):   {:?}", letters);

    letters.insert_shift(0, '2')?;
    println!("  insert_shift(0):  {:?}", letters);

    let removed = letters.remove_swap(2)?;
    println!("  remove_swap(2):   {:?} (removed {:?})", letters, removed);

    let removed = letters.remove_shift(0)?;
    println!("  remove_shift(0):  {:?} (removed {:?})", letters, removed);
    println!();

    Ok(())
}

fn example_ceiling() -> Result<(), DynArrayError> {
    println!("Example 3: Tripling growth capped at 10 slots");

    let config = DynArrayConfig::new()
        .with_initial_capacity(1)
        .with_growth(GrowthPolicy::multiply(3)?)
        .with_max_capacity(10);
    let mut ids = DynArray::with_config(config)?;

    for id in 0u32.. {
        match ids.push(id) {
            Ok(()) => println!("  pushed {:>2}, capacity {:>2}", id, ids.capacity()),
            Err(e) => {
                println!("  push {} rejected: {}", id, e);
                break;
            }
        }
    }

    Ok(())
}
