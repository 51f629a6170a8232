use std::{fmt::Display, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};

/// A single input symbol.
pub type Symbol = u8;

/// A contiguous, finite range of symbols. Every transition of an automaton
/// must be labelled with a symbol from its alphabet.
///
/// `first <= last` always holds, deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AlphabetBounds")]
pub struct Alphabet {
    first: Symbol,
    last: Symbol,
}

/// Unchecked wire form of an [Alphabet].
#[derive(Debug, Clone, Copy, Deserialize)]
struct AlphabetBounds {
    first: Symbol,
    last: Symbol,
}

impl TryFrom<AlphabetBounds> for Alphabet {
    type Error = String;

    fn try_from(bounds: AlphabetBounds) -> Result<Self, Self::Error> {
        Alphabet::from_bounds(bounds.first, bounds.last)
    }
}

impl Alphabet {
    /// The 7-bit ASCII range `0..=127`.
    pub const ASCII: Alphabet = Alphabet {
        first: 0,
        last: 127,
    };

    pub fn new(range: RangeInclusive<Symbol>) -> Self {
        assert!(!range.is_empty(), "An alphabet needs at least one symbol");

        Alphabet {
            first: *range.start(),
            last: *range.end(),
        }
    }

    /// Checked form of [Alphabet::new] for bounds that come from outside.
    pub fn from_bounds(first: Symbol, last: Symbol) -> Result<Self, String> {
        if first > last {
            return Err(format!(
                "An alphabet needs at least one symbol, got {}..={}",
                symbol_label(first),
                symbol_label(last)
            ));
        }

        Ok(Alphabet { first, last })
    }

    pub fn ascii() -> Self {
        Self::ASCII
    }

    pub fn lowercase() -> Self {
        Self::new(b'a'..=b'z')
    }

    pub fn binary() -> Self {
        Self::new(b'0'..=b'1')
    }

    pub fn digits() -> Self {
        Self::new(b'0'..=b'9')
    }

    pub fn first(&self) -> Symbol {
        self.first
    }

    pub fn last(&self) -> Symbol {
        self.last
    }

    pub fn len(&self) -> usize {
        (self.last - self.first) as usize + 1
    }

    /// An alphabet always contains at least one symbol.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        (self.first..=self.last).contains(&symbol)
    }

    /// Iterates over all symbols in ascending order.
    pub fn iter(&self) -> RangeInclusive<Symbol> {
        self.first..=self.last
    }

    /// Returns the symbol back if it belongs to the alphabet.
    pub fn check(&self, symbol: Symbol) -> AutomatonResult<Symbol> {
        if self.contains(symbol) {
            Ok(symbol)
        } else {
            Err(AutomatonError::InvalidSymbol {
                symbol,
                alphabet: *self,
            })
        }
    }

    /// Offset of `symbol` from the first symbol, usable as a dense index.
    pub fn offset(&self, symbol: Symbol) -> Option<usize> {
        self.contains(symbol)
            .then(|| (symbol - self.first) as usize)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::ASCII
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}-{}]",
            symbol_label(self.first),
            symbol_label(self.last)
        )
    }
}

/// Human readable form of a symbol: printable ASCII is shown as is, anything
/// else as a hex escape.
pub fn symbol_label(symbol: Symbol) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        b'"' => "\\\"".to_string(),
        b'\\' => "\\\\".to_string(),
        0x21..=0x7e => (symbol as char).to_string(),
        _ => format!("\\x{symbol:02x}"),
    }
}
