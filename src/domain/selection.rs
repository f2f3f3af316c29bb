/// Resolve a 1-based menu selection against the list the user was shown.
///
/// Returns `None` for non-numeric input and for positions outside `1..=items.len()`.
pub fn select<'a, T>(items: &'a [T], input: &str) -> Option<&'a T> {
    let position: usize = input.trim().parse().ok()?;
    position.checked_sub(1).and_then(|index| items.get(index))
}
