//! File handles (DOCUMENT)

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, StdlibError};
use crate::io::{Reader, Writer};

/// How a document is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// `R`: read only; the file must exist
    Read,
    /// `W`: write only; created or truncated
    Write,
    /// `RW`: read and write; created if missing, never truncated
    ReadWrite,
    /// `A`: write only, appending; created if missing
    Append,
}

impl FileMode {
    /// Whether READ is allowed
    pub fn can_read(self) -> bool {
        matches!(self, FileMode::Read | FileMode::ReadWrite)
    }

    /// Whether WRITE is allowed
    pub fn can_write(self) -> bool {
        !matches!(self, FileMode::Read)
    }

    /// The mode's letter code
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Read => "R",
            FileMode::Write => "W",
            FileMode::ReadWrite => "RW",
            FileMode::Append => "A",
        }
    }

    fn open_options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::Read => {
                options.read(true);
            }
            FileMode::Write => {
                options.write(true).create(true).truncate(true);
            }
            FileMode::ReadWrite => {
                options.read(true).write(true).create(true);
            }
            FileMode::Append => {
                options.append(true).create(true);
            }
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options
    }
}

impl FromStr for FileMode {
    type Err = StdlibError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "R" => Ok(FileMode::Read),
            "W" => Ok(FileMode::Write),
            "RW" => Ok(FileMode::ReadWrite),
            "A" => Ok(FileMode::Append),
            _ => Err(StdlibError::InvalidArgument(format!(
                "Invalid file mode: {}. Valid modes: R, W, RW, A",
                s
            ))),
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file that is opened explicitly and read or written as text.
///
/// Reads are byte-bounded. A UTF-8 character split by the bound is held
/// back and completed by the next read, so text is never corrupted.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    mode: FileMode,
    file: Option<File>,
    // Bytes of an incomplete trailing character from the last read
    partial: Vec<u8>,
}

impl Document {
    /// Describe a file; nothing is opened yet.
    pub fn new(path: impl Into<PathBuf>, mode: FileMode) -> Self {
        Self {
            path: path.into(),
            mode,
            file: None,
            partial: Vec::new(),
        }
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open mode
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Whether the file is open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn open_file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(StdlibError::NotOpen)
    }

    /// Open the file according to its mode.
    pub fn open(&mut self) -> Result<()> {
        if self.file.is_some() {
            return Err(StdlibError::AlreadyOpen);
        }
        let file = self
            .mode
            .open_options()
            .open(&self.path)
            .map_err(|e| StdlibError::io("Failed to open file", e))?;
        debug!(path = %self.path.display(), mode = %self.mode, "document opened");
        self.file = Some(file);
        self.partial.clear();
        Ok(())
    }

    /// Read up to `n` bytes of text. Returns `""` at end of file.
    pub fn read(&mut self, n: usize) -> Result<String> {
        let file = self.file.as_mut().ok_or(StdlibError::NotOpen)?;
        if !self.mode.can_read() {
            return Err(StdlibError::WrongMode { access: "reading" });
        }
        if n == 0 {
            return Ok(String::new());
        }

        // The buffer grows with the bytes actually read, not with `n`
        let mut chunk = Vec::new();
        loop {
            chunk.clear();
            let count = std::io::Read::by_ref(file)
                .take(n as u64)
                .read_to_end(&mut chunk)
                .map_err(|e| StdlibError::io("Read error", e))?;

            if count == 0 {
                // A dangling partial character at EOF is emitted as-is
                let rest = std::mem::take(&mut self.partial);
                return Ok(String::from_utf8_lossy(&rest).into_owned());
            }

            self.partial.extend_from_slice(&chunk[..count]);
            let complete = match std::str::from_utf8(&self.partial) {
                Ok(_) => self.partial.len(),
                Err(e) if e.error_len().is_none() => e.valid_up_to(),
                Err(_) => self.partial.len(),
            };
            if complete > 0 {
                let tail = self.partial.split_off(complete);
                let head = std::mem::replace(&mut self.partial, tail);
                return Ok(String::from_utf8_lossy(&head).into_owned());
            }
        }
    }

    /// Write text, returning the number of bytes written.
    pub fn write(&mut self, data: &str) -> Result<usize> {
        let mode = self.mode;
        let file = self.open_file()?;
        if !mode.can_write() {
            return Err(StdlibError::WrongMode { access: "writing" });
        }
        file.write_all(data.as_bytes())
            .map_err(|e| StdlibError::io("Write error", e))?;
        Ok(data.len())
    }

    /// Move to an absolute byte offset.
    pub fn seek(&mut self, position: u64) -> Result<()> {
        let file = self.open_file()?;
        file.seek(SeekFrom::Start(position))
            .map_err(|e| StdlibError::io("Seek error", e))?;
        self.partial.clear();
        Ok(())
    }

    /// Current byte offset, excluding bytes held back by a split character.
    pub fn tell(&mut self) -> Result<u64> {
        let held = self.partial.len() as u64;
        let file = self.open_file()?;
        let position = file
            .stream_position()
            .map_err(|e| StdlibError::io("Tell error", e))?;
        Ok(position.saturating_sub(held))
    }

    /// Commit written data to disk.
    pub fn flush(&mut self) -> Result<()> {
        let file = self.open_file()?;
        file.sync_all()
            .map_err(|e| StdlibError::io("Flush error", e))
    }

    /// Close the file. Closing a closed document succeeds.
    pub fn close(&mut self) -> Result<()> {
        if self.file.take().is_some() {
            self.partial.clear();
            debug!(path = %self.path.display(), "document closed");
        }
        Ok(())
    }

    /// Whether the path exists.
    pub fn exists(&self) -> bool {
        fs::metadata(&self.path).is_ok()
    }

    /// Close if open, then remove the file.
    pub fn delete(&mut self) -> Result<()> {
        self.close()?;
        fs::remove_file(&self.path).map_err(|e| StdlibError::io("DELETE: failed to delete file", e))
    }

    /// File size in bytes.
    pub fn size(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| StdlibError::io("failed to get file size", e))
    }

    /// Permission bits (`0o777` mask).
    pub fn permissions(&self) -> Result<u32> {
        let metadata =
            fs::metadata(&self.path).map_err(|e| StdlibError::io("failed to get file permissions", e))?;
        Ok(permission_bits(&metadata.permissions()))
    }

    /// Change permission bits.
    pub fn set_permissions(&self, bits: u32) -> Result<()> {
        let metadata =
            fs::metadata(&self.path).map_err(|e| StdlibError::io("failed to set file permissions", e))?;
        let mut permissions = metadata.permissions();
        apply_permission_bits(&mut permissions, bits);
        fs::set_permissions(&self.path, permissions)
            .map_err(|e| StdlibError::io("failed to set file permissions", e))
    }
}

#[cfg(unix)]
fn permission_bits(permissions: &fs::Permissions) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    permissions.mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(permissions: &fs::Permissions) -> u32 {
    if permissions.readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn apply_permission_bits(permissions: &mut fs::Permissions, bits: u32) {
    use std::os::unix::fs::PermissionsExt;
    permissions.set_mode(bits & 0o777);
}

#[cfg(not(unix))]
fn apply_permission_bits(permissions: &mut fs::Permissions, bits: u32) {
    permissions.set_readonly(bits & 0o222 == 0);
}

impl Reader for Document {
    fn read(&mut self, max: usize) -> Result<String> {
        Document::read(self, max)
    }

    fn close(&mut self) -> Result<()> {
        Document::close(self)
    }
}

impl Writer for Document {
    fn write(&mut self, data: &str) -> Result<usize> {
        Document::write(self, data)
    }

    fn close(&mut self) -> Result<()> {
        Document::close(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("rw".parse::<FileMode>().unwrap(), FileMode::ReadWrite);
        assert_eq!("A".parse::<FileMode>().unwrap(), FileMode::Append);
        assert_eq!(
            "X".parse::<FileMode>().unwrap_err().to_string(),
            "Invalid file mode: X. Valid modes: R, W, RW, A"
        );
    }

    #[test]
    fn test_mode_capabilities() {
        assert!(FileMode::Read.can_read());
        assert!(!FileMode::Read.can_write());
        assert!(FileMode::Append.can_write());
        assert!(!FileMode::Append.can_read());
        assert!(FileMode::ReadWrite.can_read() && FileMode::ReadWrite.can_write());
    }

    #[test]
    fn test_closed_document_errors() {
        let mut doc = Document::new("/nonexistent/never", FileMode::Read);
        assert!(matches!(doc.read(1), Err(StdlibError::NotOpen)));
        assert!(matches!(doc.tell(), Err(StdlibError::NotOpen)));
        doc.close().unwrap();
        doc.close().unwrap();
    }

    #[test]
    fn test_split_character_is_carried_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utf8.txt");
        std::fs::write(&path, "añb").unwrap();

        let mut doc = Document::new(&path, FileMode::Read);
        doc.open().unwrap();
        // 'ñ' is two bytes; the first read stops inside it
        assert_eq!(doc.read(2).unwrap(), "a");
        assert_eq!(doc.tell().unwrap(), 1);
        assert_eq!(doc.read(2).unwrap(), "ñb");
        assert_eq!(doc.read(2).unwrap(), "");
    }

    #[test]
    fn test_huge_read_returns_what_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.txt");
        std::fs::write(&path, "hi").unwrap();

        let mut doc = Document::new(&path, FileMode::Read);
        doc.open().unwrap();
        assert_eq!(doc.read(usize::MAX).unwrap(), "hi");
        assert_eq!(doc.read(usize::MAX).unwrap(), "");
    }
}
