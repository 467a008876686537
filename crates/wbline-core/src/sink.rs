//! Output sink — CSV file writer with atomic tmp→rename

use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Buffered CSV writer with atomic tmp→rename
pub struct CsvSink {
    writer: csv::Writer<File>,
    tmp_path: PathBuf,
    final_path: PathBuf,
    row_count: usize,
}

impl std::fmt::Debug for CsvSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("final_path", &self.final_path)
            .field("row_count", &self.row_count)
            .finish_non_exhaustive()
    }
}

impl CsvSink {
    /// Create a new sink writing to a temporary file.
    ///
    /// The header row is written immediately; `finalize` renames the file
    /// to `<output_dir>/<name>.csv`, replacing any previous export.
    pub fn new<I, T>(name: &str, output_dir: &Path, header: I) -> Result<Self, std::io::Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let filename = format!("{name}.csv");
        let final_path = output_dir.join(&filename);
        let tmp_path = output_dir.join(format!("{filename}.tmp"));

        // Clean up stale tmp file
        if tmp_path.exists() {
            fs::remove_file(&tmp_path)?;
        }

        let file = File::create(&tmp_path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(header).map_err(std::io::Error::other)?;

        Ok(Self {
            writer,
            tmp_path,
            final_path,
            row_count: 0,
        })
    }

    /// Write a single record in header order
    pub fn write_record<I, T>(&mut self, record: I) -> Result<(), std::io::Error>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.row_count += 1;
        self.writer.write_record(record).map_err(std::io::Error::other)
    }

    /// Finalize: flush and atomically rename tmp → final.
    ///
    /// Returns the number of data rows written (header excluded).
    pub fn finalize(self) -> Result<usize, std::io::Error> {
        let Self {
            writer,
            tmp_path,
            final_path,
            row_count,
        } = self;
        writer.into_inner().map_err(std::io::Error::other)?;
        fs::rename(&tmp_path, &final_path)?;
        Ok(row_count)
    }
}

/// Remove stale .tmp files in the output directory
pub fn cleanup_tmp_files(output_dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "tmp") {
            log::warn!("Removing stale tmp file: {}", path.display());
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
