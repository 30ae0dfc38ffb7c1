// Loading and partitioning of the hand-drawn shapes dataset

mod load_images;
pub use load_images::{
    image_path, load_bucket, load_images, ClassBuckets, Sample, CLASS_SIZE, DEFAULT_ROOT,
};

mod split_set;
pub use split_set::{
    shuffle, split_points, split_set, Split, SplitKind, DEFAULT_SEED, DEFAULT_SPLITS,
};

mod load_data;
pub use load_data::{load_data, partition, LabeledSet, ShapesData};
