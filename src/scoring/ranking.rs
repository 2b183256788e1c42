/// 1-based dense ranks for `keys` already in ranking order.
///
/// Equal neighbouring keys share the rank of the first of them; the next
/// distinct key is ranked by its own position (1, 1, 3, not 1, 1, 2).
pub fn dense_ranks<K: PartialEq>(keys: &[K]) -> Vec<usize> {
    let mut ranks: Vec<usize> = Vec::with_capacity(keys.len());

    for (idx, key) in keys.iter().enumerate() {
        let rank = match idx.checked_sub(1) {
            Some(prev) if keys[prev] == *key => ranks[prev],
            _ => idx + 1,
        };
        ranks.push(rank);
    }

    ranks
}
