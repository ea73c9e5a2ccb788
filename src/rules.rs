//! Production rule table and its compact text notation.
//!
//! Rules are written as comma-separated `symbol:replacement` pairs, for example
//! `X:F+[[X]-X]-F[-FX]+X,F:FF`.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Mapping from a symbol to its replacement. Symbols without an entry rewrite to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: BTreeMap<char, String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse rule text. Never fails: fragments without a `:` or with an empty symbol are
    /// dropped, and a later duplicate overwrites an earlier one.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();

        for pair in text.split(',') {
            let Some((symbol, replacement)) = pair.split_once(':') else {
                if !pair.trim().is_empty() {
                    tracing::debug!(fragment = pair, "dropping rule without ':'");
                }
                continue;
            };

            let symbol = symbol.trim();
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => table.insert(ch, replacement.trim()),
                (None, _) => tracing::debug!(fragment = pair, "dropping rule with empty symbol"),
                (Some(_), Some(_)) => {
                    tracing::debug!(symbol, "dropping rule with multi-character symbol")
                }
            }
        }

        table
    }

    pub fn insert(&mut self, symbol: char, replacement: impl Into<String>) {
        self.rules.insert(symbol, replacement.into());
    }

    /// Replacement for `symbol`, if one is defined.
    pub fn get(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromStr for RuleTable {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for RuleTable {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, replacement) in iter {
            table.insert(symbol, replacement);
        }
        table
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (symbol, replacement)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}:{}", symbol, replacement)?;
        }
        Ok(())
    }
}
