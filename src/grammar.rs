//! L-system string rewriting.

use crate::rules::RuleTable;
use std::collections::BTreeMap;

/// Rewrite `axiom` for `iterations` generations.
///
/// Every generation is a single parallel pass: each symbol is replaced by its rule, or kept
/// as-is when no rule exists. Output length grows exponentially with `iterations`; use
/// [`expanded_len`] to check the size before expanding.
pub fn generate(axiom: &str, rules: &RuleTable, iterations: u32) -> String {
    let mut current = axiom.to_string();
    for _ in 0..iterations {
        current = rewrite(&current, rules);
    }
    tracing::debug!(iterations, len = current.len(), "expanded sequence");
    current
}

fn rewrite(sequence: &str, rules: &RuleTable) -> String {
    let mut next = String::with_capacity(sequence.len() * 2);
    for symbol in sequence.chars() {
        match rules.get(symbol) {
            Some(replacement) => next.push_str(replacement),
            None => next.push(symbol),
        }
    }
    next
}

/// Number of symbols `generate(axiom, rules, iterations)` would return, computed without
/// building the string. Saturates at `u64::MAX`.
pub fn expanded_len(axiom: &str, rules: &RuleTable, iterations: u32) -> u64 {
    let mut counts: BTreeMap<char, u64> = BTreeMap::new();
    for symbol in axiom.chars() {
        *counts.entry(symbol).or_insert(0) += 1;
    }

    for _ in 0..iterations {
        let mut next: BTreeMap<char, u64> = BTreeMap::new();
        for (&symbol, &count) in &counts {
            match rules.get(symbol) {
                Some(replacement) => {
                    for produced in replacement.chars() {
                        let slot = next.entry(produced).or_insert(0);
                        *slot = slot.saturating_add(count);
                    }
                }
                None => {
                    let slot = next.entry(symbol).or_insert(0);
                    *slot = slot.saturating_add(count);
                }
            }
        }
        counts = next;
    }

    counts.values().fold(0u64, |acc, &c| acc.saturating_add(c))
}

/// An axiom together with its production rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LSystem {
    pub axiom: String,
    pub rules: RuleTable,
}

impl LSystem {
    pub fn new(axiom: impl Into<String>, rules: RuleTable) -> Self {
        Self { axiom: axiom.into(), rules }
    }

    pub fn generate(&self, iterations: u32) -> String {
        generate(&self.axiom, &self.rules, iterations)
    }

    pub fn expanded_len(&self, iterations: u32) -> u64 {
        expanded_len(&self.axiom, &self.rules, iterations)
    }

    /// Lazily yields generation 0 (the axiom), 1, 2, ... without end.
    pub fn generations(&self) -> Generations<'_> {
        Generations { axiom: &self.axiom, rules: &self.rules, last: None }
    }
}

/// Iterator returned by [`LSystem::generations`].
pub struct Generations<'a> {
    axiom: &'a str,
    rules: &'a RuleTable,
    last: Option<String>,
}

impl Iterator for Generations<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Rewrite only on demand so `take(n)` never expands past generation n - 1.
        let current = match &self.last {
            None => self.axiom.to_string(),
            Some(prev) => rewrite(prev, self.rules),
        };
        self.last = Some(current.clone());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant() -> RuleTable {
        RuleTable::parse("X:F+[[X]-X]-F[-FX]+X,F:FF")
    }

    #[test]
    fn generation_zero_is_axiom() {
        assert_eq!(generate("X", &plant(), 0), "X");
        assert_eq!(generate("", &plant(), 3), "");
    }

    #[test]
    fn single_step_rewrite() {
        assert_eq!(generate("X", &plant(), 1), "F+[[X]-X]-F[-FX]+X");
        assert_eq!(generate("F", &plant(), 1), "FF");
    }

    #[test]
    fn rewrite_is_parallel() {
        // A sequential rewrite would expand the freshly produced B in the same pass.
        let rules = RuleTable::parse("A:AB,B:A");
        assert_eq!(generate("A", &rules, 1), "AB");
        assert_eq!(generate("A", &rules, 2), "ABA");
        assert_eq!(generate("A", &rules, 3), "ABAAB");
    }

    #[test]
    fn doubling_rule_grows_as_power_of_two() {
        let rules = RuleTable::parse("F:FF");
        for n in 0..12 {
            assert_eq!(generate("F", &rules, n).len(), 1usize << n);
        }
    }

    #[test]
    fn unmapped_symbols_are_preserved() {
        let rules = RuleTable::parse("F:FF");
        let out = generate("F+Q-F", &rules, 4);
        assert_eq!(out.matches('+').count(), 1);
        assert_eq!(out.matches('Q').count(), 1);
        assert_eq!(out.matches('-').count(), 1);
        assert_eq!(out.matches('F').count(), 32);
    }

    #[test]
    fn generate_is_deterministic() {
        let rules = plant();
        assert_eq!(generate("X", &rules, 5), generate("X", &rules, 5));
    }

    #[test]
    fn expanded_len_matches_generate() {
        let rules = plant();
        for n in 0..6 {
            assert_eq!(expanded_len("X", &rules, n), generate("X", &rules, n).len() as u64);
        }
    }

    #[test]
    fn expanded_len_saturates() {
        let rules = RuleTable::parse("F:FF");
        assert_eq!(expanded_len("F", &rules, 100), u64::MAX);
    }

    #[test]
    fn generations_iterator_matches_generate() {
        let system = LSystem::new("X", plant());
        let gens: Vec<String> = system.generations().take(4).collect();
        assert_eq!(gens.len(), 4);
        for (n, g) in gens.iter().enumerate() {
            assert_eq!(*g, system.generate(n as u32));
        }
    }
}
