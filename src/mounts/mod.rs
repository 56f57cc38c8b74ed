//! Kernel mount table reading.
//!
//! Parses the line-oriented, whitespace-delimited `/proc/mounts` format
//! (`<device> <mountpoint> <fstype> <options> <freq> <passno>`; only the
//! first two fields are consumed) into an index from device name to the
//! ordered list of paths where that device is mounted.

mod error;

pub use error::{Error, Result};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default location of the kernel mount table.
pub const MOUNT_TABLE_PATH: &str = "/proc/mounts";

/// Directory prefix stripped from device names before indexing.
pub(crate) const DEVICE_DIR: &str = "/dev/";

/// All mount paths of a single device, in mount table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMounts {
    /// Device name with the `/dev/` prefix stripped (e.g. `vda1`).
    pub device_name: String,
    /// Mount paths in table order. Duplicates are preserved since several
    /// subpaths of the same volume may be mounted from one device.
    pub mount_paths: Vec<String>,
}

/// Index from normalized device name to its [`DeviceMounts`].
///
/// Built fresh by every [`read_mount_table`] call and immutable once
/// returned; a re-read produces a new table rather than merging into an old
/// one.
#[derive(Debug, Default)]
pub struct MountTable(HashMap<String, DeviceMounts>);

impl MountTable {
    /// Looks up the mounts of `device`, accepting either the bare name
    /// (`vda1`) or the `/dev/`-prefixed form (`/dev/vda1`).
    pub fn device_mounts(&self, device: &str) -> Option<&DeviceMounts> {
        if let Some(mounts) = self.0.get(device) {
            return Some(mounts);
        }
        match device.strip_prefix(DEVICE_DIR) {
            Some(bare) => self.0.get(bare),
            None => self.0.get(&format!("{DEVICE_DIR}{device}")),
        }
    }

    /// Returns the number of indexed devices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all indexed devices, in no particular order.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceMounts> {
        self.0.values()
    }

    fn insert_mount(&mut self, device: &str, mount_path: &str) {
        let device = device.strip_prefix(DEVICE_DIR).unwrap_or(device);
        self.0
            .entry(device.to_owned())
            .or_insert_with(|| DeviceMounts {
                device_name: device.to_owned(),
                mount_paths: Vec::new(),
            })
            .mount_paths
            .push(mount_path.to_owned());
    }
}

/// Reads and parses the kernel mount table at [`MOUNT_TABLE_PATH`].
///
/// # Errors
///
/// See [`read_mount_table_from`].
pub fn read_mount_table() -> Result<MountTable> {
    read_mount_table_from(MOUNT_TABLE_PATH)
}

/// Reads and parses a mount table in `/proc/mounts` format from `path`.
///
/// Lines with fewer than two whitespace-delimited fields are skipped. There
/// is no partial success: any read failure aborts the whole call.
///
/// # Arguments
///
/// * `path` - Path to a file in `/proc/mounts` format, e.g. a
///   rootfs-prefixed copy when running inside a container.
///
/// # Errors
///
/// - [`Error::FileOpen`] if the file cannot be opened.
/// - [`Error::ReadLine`] if reading from the file fails.
pub fn read_mount_table_from(path: impl AsRef<Path>) -> Result<MountTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    read_from(BufReader::new(file), path)
}

/// Internal implementation reading a mount table from a reader.
///
/// `origin` is the logical origin of the data, used in error messages.
pub(crate) fn read_from<R: BufRead>(mut reader: R, origin: &Path) -> Result<MountTable> {
    let mut table = MountTable::default();
    let mut line = String::with_capacity(256);

    while reader
        .read_line(&mut line)
        .map_err(|source| Error::ReadLine {
            path: origin.to_path_buf(),
            source,
        })?
        != 0
    {
        let mut fields = line.split_whitespace();
        if let (Some(device), Some(mount_path)) = (fields.next(), fields.next()) {
            table.insert_mount(device, mount_path);
        }
        line.clear();
    }

    Ok(table)
}
