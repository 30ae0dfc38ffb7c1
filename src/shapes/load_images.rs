use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::shape::Shape;

// Number of drawings in every class folder, named drawing(1).png ..= drawing(100).png
pub const CLASS_SIZE: usize = 100;
pub const DEFAULT_ROOT: &str = "shapes";

// One decoded drawing together with its class
#[derive(Debug, Clone)]
pub struct Sample {
    pub image: RgbImage,
    pub shape: Shape,
    // Where the drawing was decoded from
    pub path: PathBuf,
}

// One bucket of CLASS_SIZE samples per shape, each in file-index order
#[derive(Debug, Clone)]
pub struct ClassBuckets {
    pub circles: Vec<Sample>,
    pub squares: Vec<Sample>,
    pub triangles: Vec<Sample>,
}

impl ClassBuckets {
    pub fn get(&self, shape: Shape) -> &[Sample] {
        match shape {
            Shape::Circle => &self.circles,
            Shape::Square => &self.squares,
            Shape::Triangle => &self.triangles,
        }
    }

    // Buckets in Shape::ALL order
    pub fn into_array(self) -> [Vec<Sample>; 3] {
        [self.circles, self.squares, self.triangles]
    }
}

pub fn image_path(root: &Path, shape: Shape, index: usize) -> PathBuf {
    root.join(shape.folder()).join(format!("drawing({}).png", index))
}

fn load_sample(root: &Path, shape: Shape, index: usize) -> Result<Sample> {
    let path = image_path(root, shape, index);
    let file = File::open(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;
    let image = image::load(BufReader::new(file), ImageFormat::Png)
        .map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?
        // Drop any alpha channel, the dataset is plain RGB
        .to_rgb8();
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded drawing"
    );
    Ok(Sample { image, shape, path })
}

// Load the CLASS_SIZE drawings of a single shape
pub fn load_bucket(root: &Path, shape: Shape) -> Result<Vec<Sample>> {
    let bucket = (1..=CLASS_SIZE)
        .map(|index| load_sample(root, shape, index))
        .collect::<Result<Vec<_>>>()?;
    info!(shape = %shape, samples = bucket.len(), "loaded class bucket");
    Ok(bucket)
}

// Load all three class buckets from `root`.
// Files are read one index at a time across the classes; the first missing or
// undecodable file aborts the whole load.
pub fn load_images(root: &Path) -> Result<ClassBuckets> {
    let mut circles = Vec::with_capacity(CLASS_SIZE);
    let mut squares = Vec::with_capacity(CLASS_SIZE);
    let mut triangles = Vec::with_capacity(CLASS_SIZE);

    for index in 1..=CLASS_SIZE {
        circles.push(load_sample(root, Shape::Circle, index)?);
        squares.push(load_sample(root, Shape::Square, index)?);
        triangles.push(load_sample(root, Shape::Triangle, index)?);
    }

    info!(
        root = %root.display(),
        per_class = CLASS_SIZE,
        "loaded circles, squares and triangles"
    );
    Ok(ClassBuckets {
        circles,
        squares,
        triangles,
    })
}
