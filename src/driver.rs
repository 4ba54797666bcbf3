//! File-level glue around the codec: path derivation, staged writes and the
//! compress/decompress commands.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::container;
use crate::error::Result;
use crate::frequency::prepare_text;
use crate::session::Session;

const RAW_EXT: &str = "bin";
const CONTAINER_EXT: &str = "huf";
const DECOMPRESSED_SUFFIX: &str = "_decompressed.txt";
const TEMP_EXT: &str = "tmp"; // For atomic writes

/// What one command read and wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub source: PathBuf,
    pub artifact: PathBuf,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub compressed: Report,
    pub decompressed: Report,
    pub matches: bool,
}

pub fn raw_path(source: &Path) -> PathBuf {
    source.with_extension(RAW_EXT)
}

pub fn container_path(source: &Path) -> PathBuf {
    source.with_extension(CONTAINER_EXT)
}

pub fn decompressed_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("{stem}{DECOMPRESSED_SUFFIX}"))
}

/// Writes to a sibling temp file and renames it over `path`, so a failed
/// write never leaves a truncated artifact behind.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let mut temp_name = path.file_name().map(OsString::from).unwrap_or_default();
    temp_name.push(".");
    temp_name.push(TEMP_EXT);
    let temp_path = path.with_file_name(temp_name);

    if let Err(e) = fs::write(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }
    fs::rename(&temp_path, path)?;
    debug!(path = %path.display(), bytes = data.len(), "artifact written");
    Ok(())
}

/// Reads a text source and trims trailing whitespace.
pub fn read_source(source: &Path) -> Result<String> {
    let raw = fs::read_to_string(source)?;
    Ok(prepare_text(&raw)?.to_owned())
}

/// Compresses `source` into a self-describing container.
pub fn compress_file(source: &Path, output: Option<&Path>) -> Result<Report> {
    let text = read_source(source)?;
    let packed = container::pack(&text)?;

    let artifact = output.map_or_else(|| container_path(source), Path::to_path_buf);
    write_atomic(&artifact, &packed)?;

    let report = Report {
        source: source.to_path_buf(),
        artifact,
        bytes_in: text.len() as u64,
        bytes_out: packed.len() as u64,
    };
    info!(
        source = %report.source.display(),
        artifact = %report.artifact.display(),
        bytes_in = report.bytes_in,
        bytes_out = report.bytes_out,
        "compressed"
    );
    Ok(report)
}

/// Decompresses a container written by [`compress_file`].
pub fn decompress_file(input: &Path, output: Option<&Path>) -> Result<Report> {
    let data = fs::read(input)?;
    let text = container::unpack(&data)?;

    let artifact = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);
    write_atomic(&artifact, text.as_bytes())?;

    let report = Report {
        source: input.to_path_buf(),
        artifact,
        bytes_in: data.len() as u64,
        bytes_out: text.len() as u64,
    };
    info!(
        source = %report.source.display(),
        artifact = %report.artifact.display(),
        bytes_out = report.bytes_out,
        "decompressed"
    );
    Ok(report)
}

/// Compresses `source` to a raw `.bin` artifact, reads it back and decodes
/// it with the same session's table into `<stem>_decompressed.txt`.
pub fn roundtrip_file(source: &Path) -> Result<RoundTrip> {
    let text = read_source(source)?;
    let session = Session::analyze(&text)?;

    let packed = session.compress(&text)?;
    let bin_path = raw_path(source);
    write_atomic(&bin_path, &packed)?;
    let compressed = Report {
        source: source.to_path_buf(),
        artifact: bin_path.clone(),
        bytes_in: text.len() as u64,
        bytes_out: packed.len() as u64,
    };
    info!(artifact = %bin_path.display(), bytes = packed.len(), "compressed");

    let data = fs::read(&bin_path)?;
    let restored = session.decompress(&data)?;
    let out_path = decompressed_path(source);
    write_atomic(&out_path, restored.as_bytes())?;
    let decompressed = Report {
        source: bin_path,
        artifact: out_path,
        bytes_in: data.len() as u64,
        bytes_out: restored.len() as u64,
    };
    info!(artifact = %decompressed.artifact.display(), "decompressed");

    let matches = restored == text;
    if !matches {
        warn!("decompressed text differs from the source");
    }
    Ok(RoundTrip {
        compressed,
        decompressed,
        matches,
    })
}
