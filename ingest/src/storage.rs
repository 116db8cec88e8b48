use std::collections::HashMap;
use std::sync::Arc;

use analysis::SourceError;
use futures::FutureExt;

use crate::catalog::MatchRef;

#[derive(Debug, Clone)]
pub enum RecordingData {
    MemMapped(Arc<memmap2::Mmap>),
    Preloaded(Arc<[u8]>),
}

impl RecordingData {
    pub fn data(&self) -> &[u8] {
        match self {
            Self::MemMapped(v) => v,
            Self::Preloaded(v) => v,
        }
    }
}

pub trait RecordingStorage: Send + Sync {
    fn duplicate(&self) -> Box<dyn RecordingStorage>;

    fn load<'f, 'own>(
        &'own self,
        recording: &MatchRef,
    ) -> futures::future::BoxFuture<'f, Result<RecordingData, SourceError>>
    where
        'own: 'f;
}

pub struct FileStorage {
    folder: Arc<std::path::PathBuf>,
}

impl FileStorage {
    pub fn new<P>(folder: P) -> Self
    where
        P: Into<std::path::PathBuf>,
    {
        Self {
            folder: Arc::new(folder.into()),
        }
    }
}

impl RecordingStorage for FileStorage {
    fn duplicate(&self) -> Box<dyn RecordingStorage> {
        Box::new(Self {
            folder: self.folder.clone(),
        })
    }

    fn load<'f, 'own>(
        &'own self,
        recording: &MatchRef,
    ) -> futures::future::BoxFuture<'f, Result<RecordingData, SourceError>>
    where
        'own: 'f,
    {
        let path = self.folder.join(&recording.filename);

        async move {
            let file = tokio::fs::File::open(&path).await?.into_std().await;

            if file.metadata()?.len() == 0 {
                return Ok(RecordingData::Preloaded(Arc::from(Vec::new())));
            }

            // Recordings are written once and never modified while they are being parsed
            let mmap = unsafe { memmap2::MmapOptions::new().map(&file)? };

            tracing::trace!(path = %path.display(), size = mmap.len(), "Mapped recording");

            Ok::<_, SourceError>(RecordingData::MemMapped(Arc::new(mmap)))
        }
        .boxed()
    }
}

/// Keeps recordings in memory, keyed by their file name.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    recordings: Arc<HashMap<String, Arc<[u8]>>>,
}

impl MemoryStorage {
    pub fn new<I, N, D>(recordings: I) -> Self
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<Arc<[u8]>>,
    {
        Self {
            recordings: Arc::new(
                recordings
                    .into_iter()
                    .map(|(name, data)| (name.into(), data.into()))
                    .collect(),
            ),
        }
    }
}

impl RecordingStorage for MemoryStorage {
    fn duplicate(&self) -> Box<dyn RecordingStorage> {
        Box::new(self.clone())
    }

    fn load<'f, 'own>(
        &'own self,
        recording: &MatchRef,
    ) -> futures::future::BoxFuture<'f, Result<RecordingData, SourceError>>
    where
        'own: 'f,
    {
        let data = self.recordings.get(&recording.filename).cloned();
        let filename = recording.filename.clone();

        async move {
            data.map(RecordingData::Preloaded).ok_or_else(|| {
                SourceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no recording named {:?}", filename),
                ))
            })
        }
        .boxed()
    }
}
