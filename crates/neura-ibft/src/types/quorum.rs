//! Quorum arithmetic for a validator set of size `n = 3f + 1`.

/// Number of distinct agreements needed for a round property: `ceil(2n / 3)`,
/// which is `2f + 1` when `n = 3f + 1`.
pub fn quorum_size(validator_count: usize) -> usize {
    (2 * validator_count).div_ceil(3)
}

/// Prepares needed besides the proposal; the proposer's agreement is implied by its proposal.
pub fn prepare_message_count_for_quorum(quorum_size: usize) -> usize {
    quorum_size.saturating_sub(1)
}

/// Largest number of faulty validators the set tolerates.
pub fn fault_tolerance(validator_count: usize) -> usize {
    validator_count.saturating_sub(1) / 3
}
