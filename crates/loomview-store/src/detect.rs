use std::path::Path;

use crate::StoreFormat;

const HDF5_SIGNATURE: &[u8] = b"\x89HDF\r\n\x1a\n";

/// Auto-detect store format from the leading bytes of a file
pub fn detect_format(head: &[u8]) -> StoreFormat {
    if head.starts_with(HDF5_SIGNATURE) {
        return StoreFormat::Loom;
    }
    let trimmed = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|i| &head[i..])
        .unwrap_or_default();
    if trimmed.starts_with(b"{") {
        StoreFormat::Document
    } else {
        StoreFormat::Unknown
    }
}

/// Detect format from file extension
pub fn detect_format_from_extension(path: &Path) -> StoreFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("loom") | Some("h5") | Some("hdf5") => StoreFormat::Loom,
        Some("json") => StoreFormat::Document,
        _ => StoreFormat::Unknown,
    }
}
