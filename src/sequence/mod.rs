//! Sequence generator.
//!
//! Builds the target sequence for each round. Generation is pure: it depends
//! only on the alphabet, the target length, an optional previous sequence and
//! the index source. The engine decides which alphabet to use and where the
//! result is stored.
//!
//! ## Example
//!
//! ```
//! use simon_engine::core::{Alphabet, GameRng, Symbol};
//! use simon_engine::sequence::generate;
//!
//! let alphabet = Alphabet::new(["r", "g", "b", "y"].map(Symbol::new));
//! let mut rng = GameRng::new(7);
//!
//! let round1 = generate(&alphabet, 2, None, &mut rng).unwrap();
//! let round2 = generate(&alphabet, 3, Some(&round1), &mut rng).unwrap();
//!
//! assert_eq!(round2.len(), 3);
//! assert_eq!(round2.get(0), round1.get(0));
//! assert_eq!(round2.get(1), round1.get(1));
//! ```

mod generator;

pub use generator::{generate, Sequence};
