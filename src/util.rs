/// Step a cursor forward, stopping at the last index below `maximum`.
pub fn increment_to_max(value: &mut usize, maximum: usize) {
    if *value + 1 < maximum {
        *value += 1;
    }
}

/// Step a cursor back, stopping at `minimum`.
pub fn decrement_to_min(value: &mut usize, minimum: usize) {
    if *value > minimum {
        *value -= 1;
    }
}
