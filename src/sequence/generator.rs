//! Sequence generation and growth.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Alphabet, EngineError, IndexSource, Result, Symbol};

/// An ordered target list of symbols for one round.
///
/// Backed by a persistent vector, so the engine can keep the previous
/// round's sequence around and hand out snapshots in O(1).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence(Vector<Symbol>);

impl Sequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbol at a position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.0.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }

    /// Check whether `prefix` matches the start of this sequence exactly.
    #[must_use]
    pub fn starts_with(&self, prefix: &[Symbol]) -> bool {
        prefix.len() <= self.len() && self.0.iter().zip(prefix).all(|(a, b)| a == b)
    }

    fn push(&mut self, symbol: Symbol) {
        self.0.push_back(symbol);
    }
}

impl FromIterator<Symbol> for Sequence {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", symbol)?;
        }
        write!(f, "]")
    }
}

/// Produce a sequence of `target_length` symbols drawn from `alphabet`.
///
/// - Without `previous` (or with an empty one), every symbol is sampled
///   independently, uniformly, with replacement.
/// - With `previous`, its symbols are kept as an exact prefix and new
///   samples are appended until the target length is reached.
/// - If `previous` is already at least `target_length` long it is returned
///   unchanged. It is never truncated.
///
/// Fails with [`EngineError::InvalidArgument`] when symbols still need to be
/// drawn and `alphabet` is empty. Indices past the end of the alphabet are
/// wrapped back into range.
pub fn generate<R>(
    alphabet: &Alphabet,
    target_length: usize,
    previous: Option<&Sequence>,
    rng: &mut R,
) -> Result<Sequence>
where
    R: IndexSource + ?Sized,
{
    let mut sequence = previous.cloned().unwrap_or_default();
    if sequence.len() >= target_length {
        return Ok(sequence);
    }

    if alphabet.is_empty() {
        return Err(EngineError::InvalidArgument(format!(
            "cannot draw {} symbols from an empty alphabet",
            target_length - sequence.len()
        )));
    }

    let symbols = alphabet.symbols();
    while sequence.len() < target_length {
        let index = rng.next_index(symbols.len()) % symbols.len();
        sequence.push(symbols[index].clone());
    }

    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn abcd() -> Alphabet {
        Alphabet::new(["a", "b", "c", "d"].map(Symbol::new))
    }

    fn seq(ids: &[&str]) -> Sequence {
        ids.iter().map(|id| Symbol::new(*id)).collect()
    }

    #[test]
    fn test_generate_length() {
        let mut rng = GameRng::new(42);

        for n in 0..10 {
            let sequence = generate(&abcd(), n, None, &mut rng).unwrap();
            assert_eq!(sequence.len(), n);
        }
    }

    #[test]
    fn test_generate_extends_prefix() {
        let mut rng = GameRng::new(42);
        let prev = seq(&["d", "d", "a"]);

        let sequence = generate(&abcd(), 5, Some(&prev), &mut rng).unwrap();

        assert_eq!(sequence.len(), 5);
        assert_eq!(sequence.get(0), Some(&Symbol::new("d")));
        assert_eq!(sequence.get(1), Some(&Symbol::new("d")));
        assert_eq!(sequence.get(2), Some(&Symbol::new("a")));
    }

    #[test]
    fn test_generate_does_not_truncate() {
        let mut rng = GameRng::new(42);
        let prev = seq(&["a", "b", "c", "d"]);

        let sequence = generate(&abcd(), 2, Some(&prev), &mut rng).unwrap();
        assert_eq!(sequence, prev);
    }

    #[test]
    fn test_empty_previous_is_fresh() {
        let mut rng1 = GameRng::new(3);
        let mut rng2 = GameRng::new(3);

        let fresh = generate(&abcd(), 4, None, &mut rng1).unwrap();
        let from_empty = generate(&abcd(), 4, Some(&Sequence::new()), &mut rng2).unwrap();

        assert_eq!(fresh, from_empty);
    }

    #[test]
    fn test_empty_alphabet() {
        let mut rng = GameRng::new(42);
        let empty = Alphabet::new(Vec::new());

        let err = generate(&empty, 3, None, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        // Zero symbols can always be produced
        assert!(generate(&empty, 0, None, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_empty_alphabet_with_long_enough_previous() {
        let mut rng = GameRng::new(1);
        let empty = Alphabet::new(Vec::new());
        let prev = seq(&["a", "b", "c"]);

        assert_eq!(generate(&empty, 2, Some(&prev), &mut rng).unwrap(), prev);
        assert!(generate(&empty, 4, Some(&prev), &mut rng).is_err());
    }

    struct OutOfRange;

    impl IndexSource for OutOfRange {
        fn next_index(&mut self, bound: usize) -> usize {
            bound + 1
        }
    }

    #[test]
    fn test_out_of_range_index_wraps() {
        let sequence = generate(&abcd(), 3, None, &mut OutOfRange).unwrap();
        assert_eq!(sequence, seq(&["b", "b", "b"]));
    }

    #[test]
    fn test_sequence_display() {
        assert_eq!(format!("{}", seq(&["r", "g", "g"])), "[r, g, g]");
        assert_eq!(format!("{}", Sequence::new()), "[]");
    }

    #[test]
    fn test_starts_with() {
        let sequence = seq(&["a", "b", "c"]);
        assert!(sequence.starts_with(&[Symbol::new("a"), Symbol::new("b")]));
        assert!(!sequence.starts_with(&[Symbol::new("b")]));
        assert!(sequence.starts_with(&[]));
    }
}
