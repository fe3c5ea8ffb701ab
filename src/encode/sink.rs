use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::encode::image_file::{OutputFormat, save_photo};
use crate::foundation::error::{StampError, StampResult};
use crate::raster::photo::Photo;

/// Downstream consumer of finished, watermarked photos.
///
/// `name` identifies the photo within one run (usually the input file stem).
pub trait PhotoSink: Send {
    /// Consume one finished photo.
    fn commit(&mut self, name: &str, photo: &Photo) -> StampResult<()>;
}

/// Writes every committed photo into one directory as `<name><suffix>.<ext>`.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
    format: OutputFormat,
    suffix: String,
    overwrite: bool,
    written: Vec<PathBuf>,
}

impl DirSink {
    /// Sink writing `format` files into `dir`, overwriting by default.
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            suffix: "_stamped".to_string(),
            overwrite: true,
            written: Vec::new(),
        }
    }

    /// Replace the `_stamped` suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Whether existing files may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output path for an input named `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let ext = match self.format {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        };
        self.dir.join(format!("{name}{}.{ext}", self.suffix))
    }

    /// Paths committed so far, in commit order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write one photo without recording it. Safe to call from several threads at once, as long
    /// as the names are distinct (see [`unique_names`]).
    pub fn write(&self, name: &str, photo: &Photo) -> StampResult<PathBuf> {
        let path = self.path_for(name);
        write_checked(photo, &path, self.format, self.overwrite)?;
        Ok(path)
    }
}

impl PhotoSink for DirSink {
    fn commit(&mut self, name: &str, photo: &Photo) -> StampResult<()> {
        let path = self.write(name, photo)?;
        self.written.push(path);
        Ok(())
    }
}

/// Make output names distinct, keeping the first occurrence as is.
///
/// Repeats get `-2`, `-3`, ... appended, skipping any candidate already taken, so two inputs
/// `a/img.png` and `b/img.png` land in `img` and `img-2`.
pub fn unique_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if seen.insert(name.to_string()) {
                return name.to_string();
            }
            let mut n = 2usize;
            loop {
                let candidate = format!("{name}-{n}");
                if taken.insert(candidate.clone()) {
                    seen.insert(candidate.clone());
                    return candidate;
                }
                n += 1;
            }
        })
        .collect()
}

/// Writes to one fixed path; the format follows the file extension.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
    overwrite: bool,
}

impl FileSink {
    /// Sink writing to `path`, overwriting by default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            overwrite: true,
        }
    }
/// Whether existing files may be replaced.

    /// Whether existing files may be replaced.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PhotoSink for FileSink {
    fn commit(&mut self, _name: &str, photo: &Photo) -> StampResult<()> {
        let format = OutputFormat::from_path(&self.path);
        write_checked(photo, &self.path, format, self.overwrite)
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    photos: Vec<(String, Photo)>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed photos in commit order.
    pub fn photos(&self) -> &[(String, Photo)] {
        &self.photos
    }
}

impl PhotoSink for InMemorySink {
    fn commit(&mut self, name: &str, photo: &Photo) -> StampResult<()> {
        self.photos.push((name.to_string(), photo.clone()));
        Ok(())
    }
}

fn write_checked(
    photo: &Photo,
    path: &Path,
    format: OutputFormat,
    overwrite: bool,
) -> StampResult<()> {
    if !overwrite && path.exists() {
        return Err(StampError::encode(format!(
            "refusing to overwrite '{}'",
            path.display()
        )));
    }
    save_photo(photo, path, format)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
