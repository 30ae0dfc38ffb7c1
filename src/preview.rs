use std::io::Write;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::shapes::LabeledSet;

// Upper half block: the foreground colour paints the top pixel, the background the bottom one
const HALF_BLOCK: char = '\u{2580}';

// Draw an image with 24-bit ANSI colours, two pixel rows per line of text
fn render(image: &RgbImage, out: &mut impl Write) -> std::io::Result<()> {
    let (width, height) = image.dimensions();
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = image.get_pixel(x, y);
            // An odd last row gets a black lower half
            let bottom = if y + 1 < height {
                *image.get_pixel(x, y + 1)
            } else {
                Rgb([0, 0, 0])
            };
            write!(
                out,
                "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}",
                top[0], top[1], top[2], bottom[0], bottom[1], bottom[2], HALF_BLOCK
            )?;
        }
        writeln!(out, "\x1b[0m")?;
    }
    Ok(())
}

// Show the image at `index` and say which shape it is
pub fn print_img(set: &LabeledSet, index: usize, out: &mut impl Write) -> Result<()> {
    let (image, shape) = set.get(index)?;
    render(image, out).map_err(Error::Write)?;
    writeln!(out, "This image is a {}", shape).map_err(Error::Write)?;
    Ok(())
}

// Write the image at `index` to a PNG, each pixel blown up to a `scale` x `scale` square
pub fn save_img(set: &LabeledSet, index: usize, path: &Path, scale: u32) -> Result<()> {
    let (image, _) = set.get(index)?;
    let scale = scale.max(1);
    let (width, height) = image.dimensions();
    let (scaled_width, scaled_height) = width
        .checked_mul(scale)
        .zip(height.checked_mul(scale))
        .ok_or(Error::ScaleTooLarge {
            scale,
            width,
            height,
        })?;
    let scaled = imageops::resize(image, scaled_width, scaled_height, FilterType::Nearest);
    scaled
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use std::path::PathBuf;

    fn one_square() -> LabeledSet {
        LabeledSet {
            images: vec![RgbImage::from_pixel(3, 3, Rgb([10, 20, 30]))],
            labels: vec![Shape::Square],
            paths: vec![PathBuf::from("squares/drawing(1).png")],
        }
    }

    #[test]
    fn prints_label_after_image() {
        let mut out = Vec::new();
        print_img(&one_square(), 0, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // 3 rows of pixels fit in 2 lines of text
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\x1b[38;2;10;20;30m"));
        assert_eq!(lines[0].matches(HALF_BLOCK).count(), 3);
        assert!(lines[1].contains("\x1b[48;2;0;0;0m"));
        assert_eq!(lines[2], "This image is a square");
    }

    #[test]
    fn index_past_end_is_an_error() {
        let mut out = Vec::new();
        let err = print_img(&one_square(), 1, &mut out).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 1, len: 1 }));
        assert!(out.is_empty());
    }

    #[test]
    fn oversized_scale_is_an_error() {
        let err = save_img(&one_square(), 0, Path::new("never-written.png"), u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            Error::ScaleTooLarge {
                scale: u32::MAX,
                width: 3,
                height: 3
            }
        ));
    }
}
