use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{DateTime, Local};

use super::loader::{file_time, find_latest, load_file};
use super::model::Dataset;
use crate::config::DATA_STAMP_FORMAT;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Where the dataset comes from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// Newest file in `dir` named `prefix*.<ext>`.
    Latest {
        dir: PathBuf,
        prefix: String,
        extensions: Vec<String>,
    },
    /// One explicitly chosen file.
    File(PathBuf),
}

impl DatasetSource {
    fn resolve(&self) -> Result<PathBuf, LoadError> {
        match self {
            DatasetSource::File(path) => Ok(path.clone()),
            DatasetSource::Latest {
                dir,
                prefix,
                extensions,
            } => find_latest(dir, prefix, extensions)
                .map_err(|e| LoadError::read(dir, &e))?
                .ok_or_else(|| LoadError::NoData {
                    dir: dir.clone(),
                    prefix: prefix.clone(),
                }),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot – one immutable load
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Snapshot {
    pub dataset: Dataset,
    pub path: PathBuf,
    /// File time rendered for the "data from" caption.
    pub data_stamp: String,
}

/// Resolve the source and read it into a fresh snapshot.
pub fn load_snapshot(source: &DatasetSource) -> Result<Snapshot, LoadError> {
    let path = source.resolve()?;

    let stamp = std::fs::metadata(&path)
        .context("reading file metadata")
        .and_then(|meta| file_time(&meta))
        .map_err(|e| LoadError::read(&path, &e))?;
    let data_stamp = DateTime::<Local>::from(stamp)
        .format(DATA_STAMP_FORMAT)
        .to_string();

    let dataset = load_file(&path).map_err(|e| LoadError::read(&path, &e))?;
    log::info!(
        "Loaded {} listings from {} ({} localities)",
        dataset.len(),
        path.display(),
        dataset.localities.len()
    );

    Ok(Snapshot {
        dataset,
        path,
        data_stamp,
    })
}

// ---------------------------------------------------------------------------
// DatasetCache – snapshot plus refresh policy
// ---------------------------------------------------------------------------

type Entry = Result<Arc<Snapshot>, LoadError>;

/// Holds the current snapshot for `ttl`, then re-reads the source.
///
/// Failures are cached for the same window so a missing file is not polled
/// every frame. A refresh never touches the previous snapshot: readers keep
/// their `Arc` and the cache swaps in a new one.
#[derive(Debug)]
pub struct DatasetCache {
    source: DatasetSource,
    ttl: Duration,
    entry: Option<(Instant, Entry)>,
}

impl DatasetCache {
    pub fn new(source: DatasetSource, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: None,
        }
    }

    /// Switch to another source; the next read loads it.
    pub fn set_source(&mut self, source: DatasetSource) {
        self.source = source;
        self.invalidate();
    }

    /// Drop the cached entry so the next read reloads.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match &self.entry {
            Some((at, _)) => now.saturating_duration_since(*at) >= self.ttl,
            None => true,
        }
    }

    pub fn get(&mut self) -> Entry {
        self.get_at(Instant::now())
    }

    /// Current entry as of `now`, reloading when expired.
    pub fn get_at(&mut self, now: Instant) -> Entry {
        if !self.is_expired_at(now) {
            if let Some((_, entry)) = &self.entry {
                return entry.clone();
            }
        }

        log::debug!("Dataset cache expired, reloading {:?}", self.source);
        let entry = load_snapshot(&self.source).map(Arc::new);
        if let Err(e) = &entry {
            log::warn!("Dataset reload failed: {e}");
        }
        self.entry = Some((now, entry.clone()));
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Lokalita,Výnos %,Cena,Obrazek,Zdroj,Název,m2,URL";

    fn write_export(dir: &std::path::Path, name: &str, rows: usize) {
        let mut f = std::fs::File::create(dir.join(name)).unwrap();
        writeln!(f, "{HEADER}").unwrap();
        for i in 0..rows {
            writeln!(f, "Kladno,5,{},,Sreality,Byt {i},40,https://x/{i}", 2_000_000 + i).unwrap();
        }
    }

    fn latest(dir: &std::path::Path) -> DatasetSource {
        DatasetSource::Latest {
            dir: dir.to_path_buf(),
            prefix: "INVESTICNI_HITPARADA".into(),
            extensions: vec!["csv".into()],
        }
    }

    #[test]
    fn missing_export_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new(latest(dir.path()), Duration::from_secs(60));
        let err = cache.get().unwrap_err();
        assert!(matches!(err, LoadError::NoData { .. }));
    }

    #[test]
    fn snapshot_is_reused_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "INVESTICNI_HITPARADA_a.csv", 2);
        let mut cache = DatasetCache::new(latest(dir.path()), Duration::from_secs(60));

        let t0 = Instant::now();
        let first = cache.get_at(t0).unwrap();
        write_export(dir.path(), "INVESTICNI_HITPARADA_a.csv", 5);
        let second = cache.get_at(t0 + Duration::from_secs(59)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.dataset.len(), 2);
    }

    #[test]
    fn expired_snapshot_is_replaced_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "INVESTICNI_HITPARADA_a.csv", 2);
        let mut cache = DatasetCache::new(latest(dir.path()), Duration::from_secs(60));

        let t0 = Instant::now();
        let old = cache.get_at(t0).unwrap();
        write_export(dir.path(), "INVESTICNI_HITPARADA_a.csv", 5);
        let new = cache.get_at(t0 + Duration::from_secs(60)).unwrap();

        assert!(!Arc::ptr_eq(&old, &new));
        assert_eq!(old.dataset.len(), 2);
        assert_eq!(new.dataset.len(), 5);
        let again = cache.get_at(t0 + Duration::from_secs(119)).unwrap();
        assert!(Arc::ptr_eq(&new, &again));
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = DatasetCache::new(latest(dir.path()), Duration::from_secs(3600));
        let t0 = Instant::now();
        assert!(cache.get_at(t0).is_err());

        write_export(dir.path(), "INVESTICNI_HITPARADA_b.csv", 1);
        assert!(cache.get_at(t0).is_err());

        cache.invalidate();
        assert_eq!(cache.get_at(t0).unwrap().dataset.len(), 1);
    }

    #[test]
    fn pinned_file_bypasses_discovery() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path(), "anything.csv", 3);
        let mut cache = DatasetCache::new(latest(dir.path()), Duration::from_secs(3600));
        assert!(cache.get().is_err());

        cache.set_source(DatasetSource::File(dir.path().join("anything.csv")));
        let snap = cache.get().unwrap();
        assert_eq!(snap.dataset.len(), 3);
        assert_eq!(snap.data_stamp.len(), "14:05 03.11.".len());
    }
}
