use crate::error::{Error, StorageFailure};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, trace};

/// Reads a `.json` file from `path`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path)
        .await
        .map_err(|err| Error::storage(path, err))?;
    trace!("file read; deserializing bytes ...");
    serde_json::from_slice(&file).map_err(|err| Error::storage(path, err))
}

/// Serializes `data` to a `.json` file at `path`, creating parent directories as needed.
pub async fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let bytes = serde_json::to_vec(data).map_err(|err| Error::storage(path, err))?;
    write(path, &bytes).await
}

/// Writes `rows` to a `.csv` file at `path`, with a header row taken from the field names
/// of `R`.
pub async fn write_csv<R: Serialize>(path: &Path, rows: &[R]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| Error::storage(path, err))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| Error::storage(path, err.into_error()))?;
    write(path, &bytes).await
}

/// Reads the named `column` of a headed `.csv` file, returning each cell in row order.
pub async fn read_csv_column(path: &Path, column: &'static str) -> Result<Vec<String>> {
    trace!("reading file path: {}", path.display());
    let file = tokio::fs::read(path)
        .await
        .map_err(|err| Error::storage(path, err))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(file.as_slice());
    let headers = reader.headers().map_err(|err| Error::storage(path, err))?;

    // an exchange without listings is written as an empty file
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let index = headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| Error::storage(path, StorageFailure::MissingColumn(column)))?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| Error::storage(path, err))?;
        if let Some(cell) = record.get(index) {
            cells.push(cell.to_string());
        }
    }
    Ok(cells)
}

/// Writes `text` to `path`, creating parent directories as needed.
pub async fn write_text(path: &Path, text: &str) -> Result<()> {
    write(path, text.as_bytes()).await
}

/// Lists the files directly inside `dir` carrying the extension `ext`, sorted by path.
pub async fn list_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|err| Error::storage(dir, err))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| Error::storage(dir, err))?
    {
        let is_file = entry
            .file_type()
            .await
            .map_err(|err| Error::storage(entry.path(), err))?
            .is_file();
        let path = entry.path();
        if is_file && path.extension().is_some_and(|e| e == ext) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Deletes the file at `path`.
pub async fn remove_file(path: &Path) -> Result<()> {
    trace!("removing file: {}", path.display());
    tokio::fs::remove_file(path).await.map_err(|err| {
        error!("failed to remove {}, error({err})", path.display());
        Error::storage(path, err)
    })
}

async fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        trace!("checking directory path: {}", dir.display());
        tokio::fs::create_dir_all(dir).await.map_err(|err| {
            error!("failed to create directory {}, error({err})", dir.display());
            Error::storage(dir, err)
        })?;
    }

    tokio::fs::write(path, bytes).await.map_err(|err| {
        error!("failed to write {}, error({err})", path.display());
        Error::storage(path, err)
    })
}
