//! Score vector postprocessing.

/// Finds the index and value of the maximum score, scanning left to right.
///
/// Ties are broken by the lowest index: only a strictly greater score
/// displaces the current maximum, so the first occurrence wins.
///
/// Returns `None` for an empty score slice.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best_value = *scores.first()?;
    let mut best_index = 0usize;

    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > best_value {
            best_value = score;
            best_index = index;
        }
    }

    Some((best_index, best_value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_basic() {
        let scores = vec![0.1, 0.8, 0.1];
        assert_eq!(argmax(&scores), Some((1, 0.8)));
    }

    #[test]
    fn test_argmax_first_occurrence_wins_on_tie() {
        let scores = vec![0.1, 0.1, 0.4, 0.1, 0.1, 0.4, 0.1, 0.1, 0.1, 0.1];
        assert_eq!(argmax(&scores), Some((2, 0.4)));
    }

    #[test]
    fn test_argmax_first_element() {
        let scores = vec![0.9, 0.05, 0.05];
        assert_eq!(argmax(&scores), Some((0, 0.9)));
    }

    #[test]
    fn test_argmax_empty() {
        assert_eq!(argmax(&[]), None);
    }
}
