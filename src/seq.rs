// Sequence and move-vector utilities shared by the split engine.

/// Reverse-complement a base sequence in place. Bases outside {A,C,G,T}
/// (notably N) are kept as-is.
pub fn reverse_complement(seq: &mut [u8]) {
    seq.reverse();
    for base in seq.iter_mut() {
        *base = match *base {
            b'A' => b'T',
            b'C' => b'G',
            b'G' => b'C',
            b'T' => b'A',
            other => other,
        };
    }
}

/// Cumulative sums of the move vector. Entry `i` is the number of bases
/// emitted up to and including move slot `i`.
pub fn move_cum_sums(moves: &[u8]) -> Vec<usize> {
    let mut sums = Vec::with_capacity(moves.len());
    let mut total = 0usize;
    for &m in moves {
        total += m as usize;
        sums.push(total);
    }
    sums
}

/// Invert the move vector into a sequence-position → signal-sample map.
///
/// The result has `reserve_size` entries (`seq_len + 1`): entry `i` is the
/// signal sample at which the `i`-th base boundary sits, and the final entry
/// equals `signal_len`.
pub fn moves_to_map(
    moves: &[u8],
    stride: usize,
    signal_len: usize,
    reserve_size: usize,
) -> Vec<usize> {
    let mut seq_to_sig = Vec::with_capacity(reserve_size);
    for (i, &m) in moves.iter().enumerate() {
        if m == 1 {
            seq_to_sig.push(i * stride);
        }
    }
    seq_to_sig.push(signal_len);
    seq_to_sig
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        let mut seq = b"ACGTN".to_vec();
        reverse_complement(&mut seq);
        assert_eq!(seq, b"NACGT");
    }

    #[test]
    fn test_reverse_complement_involution() {
        let original = b"AACGTTGCANNTA".to_vec();
        let mut seq = original.clone();
        reverse_complement(&mut seq);
        reverse_complement(&mut seq);
        assert_eq!(seq, original);
    }

    #[test]
    fn test_move_cum_sums() {
        //                T  A     T        T  C     A     G        T     A  C
        let moves = vec![1, 1, 0, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 1, 0, 0];
        let sums = move_cum_sums(&moves);
        assert_eq!(sums.len(), moves.len());
        assert_eq!(sums[0], 1);
        assert_eq!(sums[2], 2);
        assert_eq!(*sums.last().unwrap(), 10);
    }

    #[test]
    fn test_move_cum_sums_empty() {
        assert!(move_cum_sums(&[]).is_empty());
    }

    #[test]
    fn test_moves_to_map() {
        let moves = vec![1, 0, 1, 1, 0, 0];
        let stride = 5;
        let map = moves_to_map(&moves, stride, 30, 4);
        assert_eq!(map, vec![0, 10, 15, 30]);
    }

    #[test]
    fn test_moves_to_map_last_entry_is_signal_len() {
        let moves = vec![1, 1, 1, 1];
        let map = moves_to_map(&moves, 3, 12, 5);
        assert_eq!(map.len(), 5);
        assert_eq!(*map.last().unwrap(), 12);
    }
}
