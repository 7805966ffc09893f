//! Tf-idf weighting over token-id multisets.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::vocab::Bow;

/// Inverse document frequencies, accumulated one document at a time.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Idf {
    counter: HashMap<u32, u32>,
    num_docs: u32,
}

impl Idf {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts each id in the bow once towards its document frequency.
    pub fn add(&mut self, bow: &Bow) {
        // a bow holds one entry per distinct id
        for &(id, _) in bow {
            *self.counter.entry(id).or_insert(0) += 1;
        }
        self.num_docs += 1;
    }

    /// Returns the number of accumulated documents.
    pub const fn num_docs(&self) -> u32 {
        self.num_docs
    }

    /// Returns the standard idf of the given id, or zero for an id never
    /// seen.
    pub fn idf(&self, id: u32) -> f64 {
        let m = self.counter.get(&id).copied().unwrap_or(0);
        if m == 0 {
            return 0.;
        }
        (f64::from(self.num_docs) / f64::from(m)).log10() + 1.
    }

    /// Returns the smoothed idf of the given id.
    pub fn idf_smooth(&self, id: u32) -> f64 {
        let m = self.counter.get(&id).copied().unwrap_or(0);
        let n = f64::from(self.num_docs + 1);
        (n / f64::from(m + 1)).log10() + 1.
    }
}

/// Turns a bow into weighted terms carrying their raw counts.
pub fn weigh(bow: &Bow) -> Vec<(u32, f64)> {
    bow.iter().map(|&(id, cnt)| (id, f64::from(cnt))).collect()
}

/// Replaces raw counts with term frequencies relative to the document
/// length.
pub fn tf(terms: &mut [(u32, f64)]) {
    let total: f64 = terms.iter().map(|&(_, w)| w).sum();
    if total == 0. {
        return;
    }
    for (_, weight) in terms {
        *weight /= total;
    }
}

/// Replaces raw counts with sublinear (logarithmic) term frequencies.
pub fn tf_sublinear(terms: &mut [(u32, f64)]) {
    for (_, weight) in terms {
        *weight = weight.log10() + 1.;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf() {
        let mut idf = Idf::new();
        idf.add(&vec![(0, 2), (2, 1)]);
        idf.add(&vec![(0, 1), (2, 1)]);
        idf.add(&vec![(0, 1), (1, 1)]);

        assert_eq!(idf.num_docs(), 3);

        assert_eq!(idf.idf(0), (3f64 / 3f64).log10() + 1.);
        assert_eq!(idf.idf(1), (3f64 / 1f64).log10() + 1.);
        assert_eq!(idf.idf(2), (3f64 / 2f64).log10() + 1.);

        assert_eq!(idf.idf_smooth(0), (4f64 / 4f64).log10() + 1.);
        assert_eq!(idf.idf_smooth(1), (4f64 / 2f64).log10() + 1.);
        assert_eq!(idf.idf_smooth(2), (4f64 / 3f64).log10() + 1.);
    }

    #[test]
    fn test_unseen_id() {
        let mut idf = Idf::new();
        idf.add(&vec![(0, 1)]);
        assert_eq!(idf.idf(7), 0.);
    }

    #[test]
    fn test_tf() {
        let mut terms = weigh(&vec![(0, 2), (1, 1)]);
        tf(&mut terms);
        assert_eq!(terms, vec![(0, 2. / 3.), (1, 1. / 3.)]);

        let mut terms = weigh(&vec![(0, 2), (1, 1)]);
        tf_sublinear(&mut terms);
        assert_eq!(
            terms,
            vec![(0, 2f64.log10() + 1.), (1, 1f64.log10() + 1.)]
        );
    }
}
