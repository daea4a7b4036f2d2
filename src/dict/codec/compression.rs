//! Decompression cache for gzip-framed dictionary files.
//!
//! DICT data files are usually shipped as dictzip (`.dict.dz`), which is gzip
//! with a random-access header extension. Rather than decoding chunks on each
//! lookup, the whole file is inflated once into a sibling
//! `<path>.decompressed` that plain seeks can address directly.
//!
//! The sibling is trusted on sight: once it exists it is never revalidated
//! against the source.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use log::{debug, info};

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{CompressionType, MaterializeOutcome};

/// Suffix appended to a compressed path to name its decompressed copy.
pub const DECOMPRESSED_SUFFIX: &str = ".decompressed";

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Returns the path of the decompressed sibling for `path`.
pub fn sibling_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(DECOMPRESSED_SUFFIX);
    PathBuf::from(name)
}

/// Returns a directly seekable path holding the contents of `path`.
///
/// Uncompressed paths are returned unchanged. Compressed paths are inflated
/// into their sibling on first use; later calls, in this process or another,
/// reuse that sibling.
///
/// # Errors
/// Returns `DictError::Io` if the source cannot be read or the sibling cannot
/// be written, and `DictError::Decompression` if the gzip envelope is invalid.
pub fn materialize(path: impl AsRef<Path>) -> Result<PathBuf> {
    materialize_with_outcome(path).map(|(resolved, _)| resolved)
}

/// Same as [`materialize`], also reporting whether any work was done.
pub fn materialize_with_outcome(path: impl AsRef<Path>) -> Result<(PathBuf, MaterializeOutcome)> {
    let path = path.as_ref();
    match CompressionType::from_path(path) {
        CompressionType::None => Ok((path.to_path_buf(), MaterializeOutcome::Passthrough)),
        CompressionType::Gzip => {
            let target = sibling_path(path);
            if target.try_exists()? {
                debug!("Reusing decompressed copy: {}", target.display());
                return Ok((target, MaterializeOutcome::CacheHit));
            }
            info!("Decompressing {} -> {}", path.display(), target.display());
            let written = decompress_to(path, &target)?;
            info!("Decompressed {} bytes into {}", written, target.display());
            Ok((target, MaterializeOutcome::Decompressed))
        }
    }
}

/// Materializes `path` and reads the resulting file fully into memory.
pub fn read_materialized(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let resolved = materialize(path)?;
    Ok(std::fs::read(resolved)?)
}

/// Inflates the gzip file at `source` into `target`.
///
/// The output is first written to a temporary file next to `target` and then
/// renamed over it, so a reader never sees a partially written sibling. Two
/// racing writers both produce identical bytes; the last rename wins.
fn decompress_to(source: &Path, target: &Path) -> Result<u64> {
    let input = BufReader::new(File::open(source)?);
    let mut decoder = MultiGzDecoder::new(input);

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = tempfile::Builder::new()
        .prefix(".dictd-")
        .suffix(".partial")
        .tempfile_in(dir)?;

    let written = {
        let mut writer = BufWriter::new(staging.as_file_mut());
        let written = copy_decompressed(&mut decoder, &mut writer)?;
        writer.flush()?;
        written
    };
    staging.as_file().sync_all()?;
    staging.persist(target).map_err(|e| DictError::Io(e.error))?;

    Ok(written)
}

/// Streams decoder output into `out`, separating envelope errors from I/O errors.
fn copy_decompressed<R: Read, W: Write>(decoder: &mut R, out: &mut W) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match decoder.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(classify_decode_error(e)),
        };
        out.write_all(&buf[..n])?;
        total += n as u64;
    }
}

fn classify_decode_error(e: std::io::Error) -> DictError {
    match e.kind() {
        ErrorKind::InvalidInput | ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
            DictError::Decompression(e.to_string())
        }
        _ => DictError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;

    fn write_gzip(path: &Path, data: &[u8]) {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        fs::write(path, encoder.finish().unwrap()).unwrap();
    }

    #[test]
    fn sibling_appends_suffix() {
        assert_eq!(
            sibling_path(Path::new("/tmp/web1913.dict.dz")),
            PathBuf::from("/tmp/web1913.dict.dz.decompressed")
        );
    }

    #[test]
    fn uncompressed_path_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("words.dict");
        fs::write(&plain, b"catdogfox").unwrap();

        let (resolved, outcome) = materialize_with_outcome(&plain).unwrap();
        assert_eq!(resolved, plain);
        assert_eq!(outcome, MaterializeOutcome::Passthrough);
        assert!(!sibling_path(&plain).exists());
    }

    #[test]
    fn second_call_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.dict.dz");
        write_gzip(&source, b"catdogfox");

        let (first, outcome) = materialize_with_outcome(&source).unwrap();
        assert_eq!(outcome, MaterializeOutcome::Decompressed);
        let first_bytes = fs::read(&first).unwrap();
        assert_eq!(first_bytes, b"catdogfox");

        let (second, outcome) = materialize_with_outcome(&source).unwrap();
        assert_eq!(outcome, MaterializeOutcome::CacheHit);
        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), first_bytes);
    }

    #[test]
    fn existing_sibling_is_trusted() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.gz");
        write_gzip(&source, b"fresh");
        fs::write(sibling_path(&source), b"stale").unwrap();

        let resolved = materialize(&source).unwrap();
        assert_eq!(fs::read(resolved).unwrap(), b"stale");
    }

    #[test]
    fn multi_member_gzip_is_fully_inflated() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("words.dict.dz");
        let mut bytes = Vec::new();
        for part in [&b"first "[..], &b"second"[..]] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
            encoder.write_all(part).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        fs::write(&source, bytes).unwrap();

        assert_eq!(read_materialized(&source).unwrap(), b"first second");
    }

    #[test]
    fn invalid_envelope_is_reported_and_leaves_no_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("broken.dz");
        fs::write(&source, b"definitely not gzip").unwrap();

        let err = materialize(&source).unwrap_err();
        assert!(matches!(err, DictError::Decompression(_)), "got {:?}", err);
        assert!(!sibling_path(&source).exists());
    }

    #[test]
    fn missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = materialize(dir.path().join("absent.dz")).unwrap_err();
        assert!(matches!(err, DictError::Io(_)));
    }
}
