// Python bindings (built with the `python` feature)

use pyo3::prelude::*;

use crate::{ChapterReader, ReaderOptions};

/// Chapter marker
#[pyclass(name = "Chapter", frozen)]
pub struct PyChapter {
    #[pyo3(get)]
    pub name: Option<String>,
    /// Start offset in seconds
    #[pyo3(get)]
    pub start: f64,
}

#[pymethods]
impl PyChapter {
    /// String representation
    fn __str__(&self) -> String {
        format!(
            "Chapter(name={}, start={:.3})",
            self.name.as_deref().unwrap_or("None"),
            self.start
        )
    }

    /// Representation
    fn __repr__(&self) -> String {
        self.__str__()
    }
}

/// Read chapters from an OGG Vorbis/Opus file; empty list when there are none
#[pyfunction]
#[pyo3(signature = (path, verify_checksums = false, strict = false))]
fn read_chapters(path: String, verify_checksums: bool, strict: bool) -> Vec<PyChapter> {
    let options = ReaderOptions::new()
        .verify_checksums(verify_checksums)
        .strict(strict);
    ChapterReader::new(options)
        .read_path(&path)
        .into_iter()
        .map(|chapter| PyChapter {
            name: chapter.name,
            start: chapter.start.as_secs_f64(),
        })
        .collect()
}

/// oggchapters - chapter markers from OGG Vorbis and Opus files
#[pymodule]
fn oggchapters(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChapter>()?;
    m.add_function(wrap_pyfunction!(read_chapters, m)?)?;
    Ok(())
}
