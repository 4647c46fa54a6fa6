//! Board symbols and the alphabet they are drawn from.
//!
//! A `Symbol` names one playable square on the board. The engine never
//! interprets symbols beyond equality - boards decide what they mean
//! (a colour, a key, a grid cell).
//!
//! ## Usage
//!
//! ```
//! use simon_engine::core::{Alphabet, Symbol};
//!
//! let alphabet = Alphabet::new(["r", "g", "b", "y"].map(Symbol::new));
//!
//! assert_eq!(alphabet.len(), 4);
//! assert!(alphabet.contains(&Symbol::new("g")));
//! assert!(!alphabet.contains(&Symbol::new("x")));
//! assert_eq!(alphabet.get(2), Some(&Symbol::new("b")));
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One playable board position.
///
/// Immutable once created; compared by equality only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<char> for Symbol {
    fn from(key: char) -> Self {
        Self(key.to_string())
    }
}

/// The set of valid symbols for one session.
///
/// Keeps board order (sampling is by index) and rejects duplicates so that
/// uniform sampling over indices stays uniform over symbols.
#[derive(Clone, Debug, Default)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
    members: FxHashSet<Symbol>,
}

impl Alphabet {
    /// Build an alphabet, dropping repeated symbols after their first
    /// occurrence.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut alphabet = Self::default();
        for symbol in symbols {
            if alphabet.members.insert(symbol.clone()) {
                alphabet.symbols.push(symbol);
            }
        }
        alphabet
    }

    /// Number of distinct symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.members.contains(symbol)
    }

    /// Get the symbol at a sampling index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    /// Symbols in board order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl FromIterator<Symbol> for Alphabet {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_display() {
        let symbol = Symbol::new("r");
        assert_eq!(symbol.as_str(), "r");
        assert_eq!(format!("{}", symbol), "r");
        assert_eq!(Symbol::from('r'), symbol);
    }

    #[test]
    fn test_alphabet_keeps_board_order() {
        let alphabet: Alphabet = ["y", "b", "g", "r"].into_iter().map(Symbol::from).collect();

        let ids: Vec<_> = alphabet.symbols().iter().map(Symbol::as_str).collect();
        assert_eq!(ids, vec!["y", "b", "g", "r"]);
    }

    #[test]
    fn test_alphabet_drops_duplicates() {
        let alphabet = Alphabet::new(["a", "b", "a", "c", "b"].map(Symbol::new));

        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.get(2), Some(&Symbol::new("c")));
        assert_eq!(alphabet.get(3), None);
    }

    #[test]
    fn test_empty_alphabet() {
        let alphabet = Alphabet::new(Vec::new());
        assert!(alphabet.is_empty());
        assert!(!alphabet.contains(&Symbol::new("a")));
    }
}
