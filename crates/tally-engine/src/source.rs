//! Read-only byte-range sources.

use std::fs::File;
use std::io;
use std::path::Path;

/// A read-only, byte-addressable view of the input with a known length.
///
/// Workers read disjoint ranges concurrently, so implementations must
/// support unsynchronized positional reads (hence the `Sync` bound). The
/// underlying bytes must not change for the lifetime of a pipeline run.
pub trait ByteSource: Sync {
    /// Total length in bytes.
    fn len(&self) -> u64;

    /// Reads bytes starting at `offset` into `buf`, returning the number of
    /// bytes read. `Ok(0)` signals end of input.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Returns true if the source has no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// File-backed source using positional reads, safe for concurrent use.
pub struct FileSource {
    file: File,
    len: u64,
}

impl FileSource {
    /// Opens the file and captures its length.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file.read_at(buf, offset)
        }
        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file.seek_read(buf, offset)
        }
    }
}

/// In-memory source over a borrowed byte slice.
///
/// Used by tests and benchmarks; behaves exactly like a file of the same
/// contents.
pub struct MemorySource<'a> {
    data: &'a [u8],
}

impl<'a> MemorySource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ByteSource for MemorySource<'_> {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
        if offset >= self.data.len() as u64 {
            return Ok(0);
        }
        let offset = offset as usize;
        let n = buf.len().min(self.data.len() - offset);
        buf[..n].copy_from_slice(&self.data[offset..offset + n]);
        Ok(n)
    }
}
