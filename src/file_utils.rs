use anyhow::{Result, Context};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use encoding_rs::{Encoding, EUC_KR, SHIFT_JIS, UTF_16LE, UTF_16BE};

// @module: File and directory utilities

/// Decode candidates tried in order when no BOM identifies the encoding.
/// Subtitle files in the wild are frequently CP949 or Shift_JIS.
const FALLBACK_ENCODINGS: [&Encoding; 4] = [EUC_KR, SHIFT_JIS, UTF_16LE, UTF_16BE];

/// UTF-8 byte order mark prepended to output files for player compatibility
const UTF8_BOM: &str = "\u{feff}";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Collect files under a path matching one of the given extensions.
    ///
    /// A plain file is returned as a single-element list regardless of its
    /// extension; a directory is walked recursively. The result is sorted
    /// with the natural key so "ep2" orders before "ep10".
    pub fn collect_files<P: AsRef<Path>>(path: P, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();

        if path.is_file() {
            return Ok(vec![path.to_path_buf()]);
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let entry_path = entry.path();

            if !entry_path.is_file() {
                continue;
            }
            if let Some(ext) = entry_path.extension() {
                let ext = ext.to_string_lossy().to_lowercase();
                if extensions.iter().any(|candidate| *candidate == ext) {
                    result.push(entry_path.to_path_buf());
                }
            }
        }

        result.sort_by(|a, b| natural_compare(&a.to_string_lossy(), &b.to_string_lossy()));
        Ok(result)
    }

    /// Read a file trying a fixed list of candidate encodings.
    ///
    /// A BOM wins outright. Otherwise strict UTF-8 is tried first, then each
    /// fallback encoding in order, accepting the first that decodes without
    /// errors. As a last resort the content is decoded as UTF-8 with
    /// replacement characters.
    pub fn read_text_auto<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(Self::decode_auto(&bytes))
    }

    /// Decode raw bytes with the fixed candidate list
    pub fn decode_auto(bytes: &[u8]) -> String {
        if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
            let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            return decoded.into_owned();
        }

        if let Ok(text) = std::str::from_utf8(bytes) {
            return text.to_string();
        }

        for encoding in FALLBACK_ENCODINGS {
            let (decoded, had_errors) = encoding.decode_without_bom_handling(bytes);
            if !had_errors {
                return decoded.into_owned();
            }
        }

        String::from_utf8_lossy(bytes).into_owned()
    }

    /// Read a file to a string (UTF-8 only)
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Write a string to a file with a leading UTF-8 BOM
    pub fn write_with_bom<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let mut data = String::with_capacity(content.len() + UTF8_BOM.len());
        data.push_str(UTF8_BOM);
        data.push_str(content);
        Self::write_to_file(path, &data)
    }
}

/// Compare two strings treating digit runs as numbers
///
/// "episode 2" sorts before "episode 10"; non-digit parts compare
/// case-insensitively.
pub fn natural_compare(a: &str, b: &str) -> Ordering {
    let a_parts = natural_key(a);
    let b_parts = natural_key(b);
    a_parts.cmp(&b_parts)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalPart {
    Number(u64),
    Text(String),
}

fn natural_key(s: &str) -> Vec<NaturalPart> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for c in s.chars() {
        if c.is_ascii_digit() != in_digits && !current.is_empty() {
            parts.push(finish_part(&current, in_digits));
            current.clear();
        }
        in_digits = c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        parts.push(finish_part(&current, in_digits));
    }

    parts
}

fn finish_part(current: &str, in_digits: bool) -> NaturalPart {
    if in_digits {
        // Digit runs too long for u64 fall back to text comparison
        match current.parse() {
            Ok(n) => NaturalPart::Number(n),
            Err(_) => NaturalPart::Text(current.to_lowercase()),
        }
    } else {
        NaturalPart::Text(current.to_lowercase())
    }
}
