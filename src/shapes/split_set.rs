use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

pub const DEFAULT_SEED: u64 = 42;
// Split points as fractions of the input: [0, 0.7) train, [0.7, 0.85) dev, [0.85, 1] test
pub const DEFAULT_SPLITS: [f64; 2] = [0.7, 0.85];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitKind {
    Train,
    Dev,
    Test,
}

impl SplitKind {
    pub const ALL: [SplitKind; 3] = [SplitKind::Train, SplitKind::Dev, SplitKind::Test];

    pub fn label(self) -> &'static str {
        match self {
            SplitKind::Train => "train",
            SplitKind::Dev => "dev",
            SplitKind::Test => "test",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SplitKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SplitKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| Error::UnknownSplit(s.to_string()))
    }
}

// The train/dev/test parts of something
#[derive(Debug, Clone, PartialEq)]
pub struct Split<T> {
    pub train: T,
    pub dev: T,
    pub test: T,
}

impl<T> Split<T> {
    pub fn get(&self, kind: SplitKind) -> &T {
        match kind {
            SplitKind::Train => &self.train,
            SplitKind::Dev => &self.dev,
            SplitKind::Test => &self.test,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Split<U> {
        Split {
            train: f(self.train),
            dev: f(self.dev),
            test: f(self.test),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SplitKind, &T)> {
        SplitKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }
}

// Turn fractional split points into slice boundaries for a sequence of `len` elements.
// For the 100-sample buckets the defaults give exactly 70 and 85.
pub fn split_points(len: usize, splits: [f64; 2]) -> Result<(usize, usize)> {
    let [first, second] = splits;
    // Written so that NaN is rejected too
    if !(0.0 <= first && first <= second && second <= 1.0) {
        return Err(Error::InvalidSplits { first, second });
    }
    let boundary = |fraction: f64| ((len as f64 * fraction).round() as usize).min(len);
    Ok((boundary(first), boundary(second)))
}

// Shuffle in place with an RNG seeded from `seed`, so the same input order always
// ends up in the same output order
pub fn shuffle<T>(data: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    data.shuffle(&mut rng);
}

// Shuffle `data` deterministically and cut it into train/dev/test at the split points.
// The three parts are contiguous ranges of the shuffled sequence.
pub fn split_set<T>(mut data: Vec<T>, splits: [f64; 2], seed: u64) -> Result<Split<Vec<T>>> {
    let (first, second) = split_points(data.len(), splits)?;
    shuffle(&mut data, seed);

    let test = data.split_off(second);
    let dev = data.split_off(first);
    Ok(Split {
        train: data,
        dev,
        test,
    })
}
