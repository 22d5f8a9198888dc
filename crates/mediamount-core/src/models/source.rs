//! Sources handed to the storage adapter and the payloads built from them.

use bytes::Bytes;
use std::fmt;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::error::MountResult;

/// Readable and rewindable byte stream.
pub trait SeekableStream: AsyncRead + AsyncSeek + Send + Unpin {}

impl<T: AsyncRead + AsyncSeek + Send + Unpin> SeekableStream for T {}

/// A file available locally, either on disk or as an open stream.
pub enum LocalFile {
    /// Identified by a filesystem path; read from disk as-is.
    Path(PathBuf),
    /// An open stream, possibly already consumed; rewound before reading.
    Stream {
        reader: Box<dyn SeekableStream>,
        filename: Option<String>,
    },
}

impl LocalFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        LocalFile::Path(path.into())
    }

    pub fn from_stream(reader: impl SeekableStream + 'static, filename: Option<String>) -> Self {
        LocalFile::Stream {
            reader: Box::new(reader),
            filename,
        }
    }

    pub fn is_path(&self) -> bool {
        matches!(self, LocalFile::Path(_))
    }

    pub fn filename(&self) -> Option<String> {
        match self {
            LocalFile::Path(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from),
            LocalFile::Stream { filename, .. } => filename.clone(),
        }
    }

    /// Read the full content to upload.
    ///
    /// Streams are rewound to the start first; the stream itself stays open.
    pub async fn read_content(&mut self) -> MountResult<Bytes> {
        match self {
            LocalFile::Path(path) => {
                let data = tokio::fs::read(&path).await?;
                Ok(Bytes::from(data))
            }
            LocalFile::Stream { reader, .. } => {
                reader.seek(SeekFrom::Start(0)).await?;
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer).await?;
                Ok(Bytes::from(buffer))
            }
        }
    }
}

impl fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalFile::Path(path) => f.debug_tuple("Path").field(path).finish(),
            LocalFile::Stream { filename, .. } => f
                .debug_struct("Stream")
                .field("filename", filename)
                .finish_non_exhaustive(),
        }
    }
}

/// The file being stored, which determines the branch the adapter takes.
#[derive(Debug)]
pub enum UploadSource {
    /// Content available locally; uploaded as bytes.
    LocalFile(LocalFile),
    /// A URI the media API fetches itself.
    RemoteFileReference(String),
    /// Already uploaded (e.g. directly from a browser); only the reference is persisted.
    PreloadedRemoteVersion { version: String },
    /// Already stored remotely and referenced by the record; nothing to do.
    RemoteFileAlreadyStored,
}

impl UploadSource {
    pub fn local_path(path: impl AsRef<Path>) -> Self {
        UploadSource::LocalFile(LocalFile::from_path(path.as_ref()))
    }

    pub fn remote(uri: impl Into<String>) -> Self {
        UploadSource::RemoteFileReference(uri.into())
    }

    pub fn preloaded(version: impl Into<String>) -> Self {
        UploadSource::PreloadedRemoteVersion {
            version: version.into(),
        }
    }

    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            UploadSource::LocalFile(_) => "local_file",
            UploadSource::RemoteFileReference(_) => "remote_reference",
            UploadSource::PreloadedRemoteVersion { .. } => "preloaded",
            UploadSource::RemoteFileAlreadyStored => "already_stored",
        }
    }
}

/// What is actually sent to the media API.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload {
    File {
        filename: Option<String>,
        data: Bytes,
    },
    Uri(String),
}

impl UploadPayload {
    pub fn size_hint(&self) -> usize {
        match self {
            UploadPayload::File { data, .. } => data.len(),
            UploadPayload::Uri(uri) => uri.len(),
        }
    }
}
