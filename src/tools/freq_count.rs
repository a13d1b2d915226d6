/// Occurrence count of every byte value in one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: [u64; 256],
    total: u64,
}

impl Frequencies {
    /// Count for `symbol`.
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// (symbol, count) for every byte value seen, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(sym, &c)| (sym as u8, c))
    }
}

/// Returns a frequency count of the input data in a single pass.
pub fn freqs(data: &[u8]) -> Frequencies {
    let mut counts = [0_u64; 256];
    data.iter().for_each(|&el| counts[el as usize] += 1);
    Frequencies {
        counts,
        total: data.len() as u64,
    }
}

#[cfg(test)]
mod test {
    use super::freqs;

    #[test]
    fn freqs_test() {
        let f = freqs(&[0xaa, 0xaa, 0xaa, 0xbb]);
        assert_eq!(f.get(0xaa), 3);
        assert_eq!(f.get(0xbb), 1);
        assert_eq!(f.get(0), 0);
        assert_eq!(f.total(), 4);
        assert_eq!(f.distinct(), 2);
        assert_eq!(f.iter().collect::<Vec<_>>(), vec![(0xaa, 3), (0xbb, 1)]);
    }

    #[test]
    fn empty_test() {
        let f = freqs(&[]);
        assert_eq!(f.total(), 0);
        assert_eq!(f.distinct(), 0);
        assert_eq!(f.iter().count(), 0);
    }
}
