use std::path::{Path, PathBuf};

use image::RgbImage;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;

use super::load_images::{load_images, ClassBuckets, Sample};
use super::split_set::{split_set, Split, DEFAULT_SPLITS};
use crate::error::{Error, Result};
use crate::shape::Shape;

// Parallel arrays: images[i] is labelled labels[i] and was read from paths[i]
#[derive(Debug, Clone, Default)]
pub struct LabeledSet {
    pub images: Vec<RgbImage>,
    pub labels: Vec<Shape>,
    pub paths: Vec<PathBuf>,
}

impl LabeledSet {
    // Separate the samples into columns, keeping their order
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let mut set = LabeledSet {
            images: Vec::with_capacity(samples.len()),
            labels: Vec::with_capacity(samples.len()),
            paths: Vec::with_capacity(samples.len()),
        };
        for Sample { image, shape, path } in samples {
            set.images.push(image);
            set.labels.push(shape);
            set.paths.push(path);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<(&RgbImage, Shape)> {
        match (self.images.get(index), self.labels.get(index)) {
            (Some(image), Some(&shape)) => Ok((image, shape)),
            _ => Err(Error::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    pub fn count(&self, shape: Shape) -> usize {
        self.labels.iter().filter(|&&label| label == shape).count()
    }
}

pub type ShapesData = Split<LabeledSet>;

// Split every class bucket with the same seed, concatenate the matching parts
// (circles, then squares, then triangles), shuffle each combined part and
// separate it into images and labels.
// The combined parts are shuffled in turn from one RNG stream, so dev and test
// do not share a permutation.
pub fn partition(buckets: ClassBuckets, splits: [f64; 2], seed: u64) -> Result<ShapesData> {
    let mut combined: Split<Vec<Sample>> = Split {
        train: Vec::new(),
        dev: Vec::new(),
        test: Vec::new(),
    };

    for bucket in buckets.into_array() {
        let split = split_set(bucket, splits, seed)?;
        combined.train.extend(split.train);
        combined.dev.extend(split.dev);
        combined.test.extend(split.test);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let data = combined.map(|mut samples| {
        samples.shuffle(&mut rng);
        LabeledSet::from_samples(samples)
    });
    info!(
        train = data.train.len(),
        dev = data.dev.len(),
        test = data.test.len(),
        seed,
        "partitioned shapes dataset"
    );
    Ok(data)
}

// Load the dataset under `root` and partition it with the default split points
pub fn load_data(root: &Path, seed: u64) -> Result<ShapesData> {
    let buckets = load_images(root)?;
    partition(buckets, DEFAULT_SPLITS, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SplitKind;
    use image::Rgb;

    // Tiny images whose red channel encodes the class and green channel the file index
    fn bucket(shape: Shape) -> Vec<Sample> {
        (1..=100u8)
            .map(|i| Sample {
                image: RgbImage::from_pixel(2, 2, Rgb([shape as u8, i, 0])),
                shape,
                path: PathBuf::from(format!("{}/drawing({}).png", shape.folder(), i)),
            })
            .collect()
    }

    fn buckets() -> ClassBuckets {
        ClassBuckets {
            circles: bucket(Shape::Circle),
            squares: bucket(Shape::Square),
            triangles: bucket(Shape::Triangle),
        }
    }

    #[test]
    fn combined_sizes() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        assert_eq!(data.train.len(), 210);
        assert_eq!(data.dev.len(), 45);
        assert_eq!(data.test.len(), 45);
        for (_, set) in data.iter() {
            assert_eq!(set.images.len(), set.labels.len());
            assert_eq!(set.paths.len(), set.labels.len());
        }
    }

    #[test]
    fn each_class_contributes_equally() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        for shape in Shape::ALL {
            assert_eq!(data.train.count(shape), 70);
            assert_eq!(data.dev.count(shape), 15);
            assert_eq!(data.test.count(shape), 15);
        }
    }

    #[test]
    fn labels_stay_with_images() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        for (_, set) in data.iter() {
            for (image, &label) in set.images.iter().zip(&set.labels) {
                assert_eq!(image.get_pixel(0, 0)[0], label as u8);
            }
        }
    }

    #[test]
    fn combined_sets_are_mixed() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        // Without the final shuffle the first 70 would all be circles
        assert!(data.train.labels[..70].iter().any(|&l| l != Shape::Circle));
    }

    #[test]
    fn dev_and_test_get_different_orders() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        assert_eq!(data.dev.len(), data.test.len());
        assert_ne!(data.dev.labels, data.test.labels);
    }

    #[test]
    fn partition_is_reproducible() {
        let a = partition(buckets(), DEFAULT_SPLITS, 3).unwrap();
        let b = partition(buckets(), DEFAULT_SPLITS, 3).unwrap();
        for kind in SplitKind::ALL {
            assert_eq!(a.get(kind).paths, b.get(kind).paths);
        }
    }

    #[test]
    fn get_past_end_fails() {
        let data = partition(buckets(), DEFAULT_SPLITS, 42).unwrap();
        assert!(data.dev.get(44).is_ok());
        assert!(matches!(
            data.dev.get(45),
            Err(Error::IndexOutOfRange { index: 45, len: 45 })
        ));
    }
}
