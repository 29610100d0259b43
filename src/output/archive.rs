//! Deterministic archive of the blended files
//!
//! Entries are sorted by path, with zeroed mtime, uid and gid and a fixed
//! mode. The gzip header carries no timestamp, so the same files always
//! produce the same bytes.

use flate2::{Compression, GzBuilder};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tar::{Builder, Header};

/// Archive file name inside the output directory
pub const ARCHIVE_FILE: &str = "blender.tar.gz";

/// Build a canonical `.tar.gz` from archive path -> contents
pub fn archive_bytes(entries: &BTreeMap<String, Vec<u8>>) -> io::Result<Vec<u8>> {
    let mut tar_buffer = Vec::new();

    {
        let mut builder = Builder::new(&mut tar_buffer);

        for (path, contents) in entries {
            let mut header = Header::new_gnu();
            header.set_path(path)?;
            header.set_size(contents.len() as u64);
            header.set_mtime(0);
            header.set_uid(0);
            header.set_gid(0);
            header.set_mode(0o644);
            header.set_cksum();

            builder.append(&header, contents.as_slice())?;
        }

        builder.finish()?;
    }

    let mut encoder = GzBuilder::new().mtime(0).write(Vec::new(), Compression::default());
    encoder.write_all(&tar_buffer)?;
    encoder.finish()
}

/// Write the archive and return its SHA-256
pub fn write_archive(entries: &BTreeMap<String, Vec<u8>>, path: &Path) -> io::Result<String> {
    let bytes = archive_bytes(entries)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    fs::write(path, bytes)?;
    Ok(digest)
}
