// CSV record of which drawing ended up where.
// The format is:
// - A header row: split,index,label,path, checked on read
// - One row per sample, in split order (train, dev, test) then position
// - index is the sample's position inside its split

use std::io::{Read, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::shape::Shape;
use crate::shapes::{ShapesData, SplitKind};

const HEADER: [&str; 4] = ["split", "index", "label", "path"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub split: SplitKind,
    pub index: usize,
    pub shape: Shape,
    pub path: PathBuf,
}

pub fn write_manifest(data: &ShapesData, writer: impl Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(HEADER)?;
    for (kind, set) in data.iter() {
        for (index, (shape, path)) in set.labels.iter().zip(&set.paths).enumerate() {
            let index = index.to_string();
            let path = path.to_string_lossy();
            writer.write_record([kind.label(), index.as_str(), shape.label(), &*path])?;
        }
    }
    writer.flush().map_err(Error::Write)
}

pub fn read_manifest(reader: impl Read) -> Result<Vec<ManifestRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?;
    if !headers.iter().eq(HEADER) {
        return Err(Error::Manifest {
            row: 0,
            reason: format!(
                "expected header {:?}, found {:?}",
                HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        });
    }

    reader
        .records()
        .enumerate()
        .map(|(row, result)| -> Result<ManifestRecord> {
            let record = result?;
            // Every row has the header's four fields, csv rejects anything else
            let split = record[0].parse::<SplitKind>()?;
            let index = record[1].parse::<usize>().map_err(|e| Error::Manifest {
                row: row + 1,
                reason: format!("bad index {:?}: {}", &record[1], e),
            })?;
            let shape = record[2].parse::<Shape>()?;
            Ok(ManifestRecord {
                split,
                index,
                shape,
                path: PathBuf::from(&record[3]),
            })
        })
        .collect()
}
