//! Artifact persistence layer.
//!
//! RULE: Only store.rs touches the data directory.
//! The engine and the loader call store methods; they never open files
//! directly.
//!
//! A sequence collection is either one JSON array (`<name>.json`) or
//! JSON Lines (`<name>.jsonl`, one record per line). Readers prefer the
//! `.jsonl` file when both exist; writers remove the stale encoding.

use crate::error::{DataError, DataResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactEncoding {
    Json,
    JsonLines,
}

impl ArtifactEncoding {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json      => "json",
            Self::JsonLines => "jsonl",
        }
    }

    /// Encoding chosen for a sequence of `len` items.
    pub fn for_len(len: usize, jsonl_threshold: usize) -> Self {
        if len > jsonl_threshold { Self::JsonLines } else { Self::Json }
    }
}

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// A store rooted at `dir`. Nothing is touched until a read or write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Open (or create) the data directory for writing.
    pub fn create(dir: impl Into<PathBuf>) -> DataResult<Self> {
        let store = Self::new(dir);
        fs::create_dir_all(&store.dir).map_err(|e| DataError::io(&store.dir, e))?;
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str, encoding: ArtifactEncoding) -> PathBuf {
        self.dir.join(format!("{name}.{}", encoding.extension()))
    }

    // ── Writing ────────────────────────────────────────────────

    /// Write a sequence, picking the encoding from its length.
    pub fn write_sequence<T: Serialize>(
        &self,
        name: &str,
        items: &[T],
        jsonl_threshold: usize,
    ) -> DataResult<ArtifactEncoding> {
        let encoding = ArtifactEncoding::for_len(items.len(), jsonl_threshold);
        match encoding {
            ArtifactEncoding::JsonLines => self.write_jsonl(name, items)?,
            ArtifactEncoding::Json      => self.write_document(name, items)?,
        }
        Ok(encoding)
    }

    /// Write one pretty-printed JSON document to `<name>.json`.
    pub fn write_document<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> DataResult<()> {
        let path = self.path_for(name, ArtifactEncoding::Json);
        let file = File::create(&path).map_err(|e| DataError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush().map_err(|e| DataError::io(&path, e))?;
        self.remove_stale(name, ArtifactEncoding::JsonLines)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    /// Stream records to `<name>.jsonl`, one compact document per line.
    pub fn write_jsonl<T: Serialize>(&self, name: &str, items: &[T]) -> DataResult<()> {
        let path = self.path_for(name, ArtifactEncoding::JsonLines);
        let file = File::create(&path).map_err(|e| DataError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        for item in items {
            serde_json::to_writer(&mut writer, item)?;
            writer.write_all(b"\n").map_err(|e| DataError::io(&path, e))?;
        }
        writer.flush().map_err(|e| DataError::io(&path, e))?;
        self.remove_stale(name, ArtifactEncoding::Json)?;
        log::debug!("wrote {} ({} lines)", path.display(), items.len());
        Ok(())
    }

    fn remove_stale(&self, name: &str, encoding: ArtifactEncoding) -> DataResult<()> {
        let path = self.path_for(name, encoding);
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("removed stale {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DataError::io(&path, e)),
        }
    }

    // ── Reading ────────────────────────────────────────────────

    /// Which encoding is on disk for `name`, if any.
    pub fn encoding_of(&self, name: &str) -> Option<ArtifactEncoding> {
        [ArtifactEncoding::JsonLines, ArtifactEncoding::Json]
            .into_iter()
            .find(|enc| self.path_for(name, *enc).is_file())
    }

    /// Load a sequence written in either encoding.
    pub fn load_sequence<T: DeserializeOwned>(&self, name: &str) -> DataResult<Vec<T>> {
        match self.encoding_of(name) {
            Some(ArtifactEncoding::JsonLines) => self.load_jsonl(name),
            Some(ArtifactEncoding::Json)      => self.load_document(name),
            None => Err(self.missing(name)),
        }
    }

    /// Load `<name>.json` as a single document.
    pub fn load_document<T: DeserializeOwned>(&self, name: &str) -> DataResult<T> {
        let path = self.path_for(name, ArtifactEncoding::Json);
        if !path.is_file() {
            return Err(self.missing(name));
        }
        let file = File::open(&path).map_err(|e| DataError::io(&path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DataError::MalformedRecord {
            path,
            line: source.line(),
            source,
        })
    }

    /// Read `<name>.jsonl` line by line. Blank lines are skipped.
    pub fn load_jsonl<T: DeserializeOwned>(&self, name: &str) -> DataResult<Vec<T>> {
        let path = self.path_for(name, ArtifactEncoding::JsonLines);
        let file = File::open(&path).map_err(|e| DataError::io(&path, e))?;
        let mut items = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| DataError::io(&path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let item = serde_json::from_str(&line).map_err(|source| DataError::MalformedRecord {
                path: path.clone(),
                line: index + 1,
                source,
            })?;
            items.push(item);
        }
        Ok(items)
    }

    fn missing(&self, name: &str) -> DataError {
        DataError::MissingArtifact {
            name: name.to_string(),
            dir:  self.dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id:   u32,
        name: String,
    }

    fn rows(n: u32) -> Vec<Row> {
        (0..n).map(|id| Row { id, name: format!("row-{id}") }).collect()
    }

    #[test]
    fn encoding_follows_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();

        assert_eq!(store.write_sequence("small", &rows(3), 3).unwrap(), ArtifactEncoding::Json);
        assert_eq!(store.write_sequence("big", &rows(4), 3).unwrap(), ArtifactEncoding::JsonLines);

        assert!(store.path_for("small", ArtifactEncoding::Json).is_file());
        assert!(store.path_for("big", ArtifactEncoding::JsonLines).is_file());
        assert_eq!(store.load_sequence::<Row>("small").unwrap(), rows(3));
        assert_eq!(store.load_sequence::<Row>("big").unwrap(), rows(4));
    }

    #[test]
    fn rewriting_in_other_encoding_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();

        store.write_sequence("flip", &rows(10), 5).unwrap();
        store.write_sequence("flip", &rows(2), 5).unwrap();

        assert!(!store.path_for("flip", ArtifactEncoding::JsonLines).exists());
        assert_eq!(store.encoding_of("flip"), Some(ArtifactEncoding::Json));
        assert_eq!(store.load_sequence::<Row>("flip").unwrap(), rows(2));
    }

    #[test]
    fn jsonl_skips_blank_lines_and_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::create(dir.path()).unwrap();
        let path = store.path_for("hand", ArtifactEncoding::JsonLines);

        fs::write(&path, "{\"id\":1,\"name\":\"a\"}\n\n{\"id\":2,\"name\":\"b\"}\n").unwrap();
        let loaded: Vec<Row> = store.load_sequence("hand").unwrap();
        assert_eq!(loaded.len(), 2);

        fs::write(&path, "{\"id\":1,\"name\":\"a\"}\nnot json\n").unwrap();
        match store.load_sequence::<Row>("hand") {
            Err(DataError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn missing_artifact_names_both_encodings() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());
        let err = store.load_sequence::<Row>("nothing").unwrap_err();
        assert!(matches!(err, DataError::MissingArtifact { .. }));
        assert!(err.to_string().contains("nothing.jsonl"));
    }
}
