use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use encoding_rs::Encoding;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::codec::compression;
use super::format::{content, index};
use super::types::error::{DictError, Result};
use super::types::models::{DictOptions, WordEntry};

/// An in-memory DICT index bound to its data file.
///
/// The index is decoded once at construction and never changes afterwards.
/// Every lookup opens its own handle on the data file, so a `Dictionary` can be
/// shared between threads without further locking.
///
/// The random source used for suggestions is injected at construction. Use a
/// seeded generator to make [`random_sample`](Self::random_sample)
/// reproducible.
#[derive(Debug)]
pub struct Dictionary<R: Rng = StdRng> {
    data_path: PathBuf,
    entries: Vec<WordEntry>,
    /// Lowercased `entries[i].word`, computed once at construction.
    folded_words: Vec<String>,
    encoding: &'static Encoding,
    rng: Mutex<R>,
}

impl Dictionary<StdRng> {
    /// Opens a dictionary from an index file and a (possibly compressed) data
    /// file, with a clock-seeded random source.
    ///
    /// # Errors
    /// Returns an error if the index cannot be read or decoded.
    pub fn open(index_path: impl AsRef<Path>, data_path: impl AsRef<Path>) -> Result<Self> {
        let options = DictOptions::new(index_path.as_ref(), data_path.as_ref());
        Self::from_options(&options)
    }

    /// Opens a dictionary described by `options`, with a clock-seeded random source.
    pub fn from_options(options: &DictOptions) -> Result<Self> {
        Self::with_rng(options, clock_seeded_rng())
    }
}

impl<R: Rng> Dictionary<R> {
    /// Opens a dictionary described by `options`, drawing suggestions from `rng`.
    ///
    /// The data file is not touched here; a compressed data file is
    /// materialized on the first lookup.
    pub fn with_rng(options: &DictOptions, rng: R) -> Result<Self> {
        info!(
            "Opening dictionary: index={}, data={}",
            options.index_path.display(),
            options.data_path.display()
        );
        let encoding = options.resolve_encoding()?;
        let entries = index::read_index(&options.index_path)?;
        Ok(Self::from_entries(&options.data_path, entries, encoding, rng))
    }

    /// Builds a dictionary from already decoded entries.
    pub fn from_entries(
        data_path: impl Into<PathBuf>,
        entries: Vec<WordEntry>,
        encoding: &'static Encoding,
        rng: R,
    ) -> Self {
        let folded_words = entries.iter().map(|e| e.word.to_lowercase()).collect();
        Self {
            data_path: data_path.into(),
            entries,
            folded_words,
            encoding,
            rng: Mutex::new(rng),
        }
    }

    /// Returns the definition text for `word`, ignoring case.
    ///
    /// Every matching entry contributes one block; blocks are joined with a
    /// newline in index order. A word with no entry yields an empty string.
    ///
    /// # Errors
    /// Returns `DictError::Io` if the data file cannot be materialized, opened,
    /// sought or read.
    pub fn lookup(&self, word: &str) -> Result<String> {
        let needle = word.to_lowercase();
        let resolved = compression::materialize(&self.data_path)?;
        let mut file = File::open(&resolved)?;

        let mut blocks = Vec::new();
        let matches = self
            .entries
            .iter()
            .zip(&self.folded_words)
            .filter(|(_, folded)| **folded == needle);
        for (entry, _) in matches {
            let bytes = content::extract(&mut file, entry.offset, entry.length)?;
            blocks.push(content::decode_text(&bytes, self.encoding));
        }

        debug!("Lookup {:?}: {} matching entries", word, blocks.len());
        Ok(blocks.join("\n"))
    }

    /// Draws `n` headwords uniformly at random, with replacement.
    ///
    /// Used to offer suggestions after a miss. An empty dictionary yields an
    /// empty sample.
    ///
    /// # Errors
    /// Returns `DictError::Io` if the data file cannot be materialized or
    /// opened, and `DictError::LockPoisoned` if the random source's lock is
    /// poisoned.
    pub fn random_sample(&self, n: usize) -> Result<Vec<String>> {
        let resolved = compression::materialize(&self.data_path)?;
        File::open(&resolved)?;

        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let mut rng = self.rng.lock().map_err(|_| DictError::LockPoisoned)?;
        Ok((0..n)
            .map(|_| {
                let pick = rng.gen_range(0..self.entries.len());
                self.entries[pick].word.clone()
            })
            .collect())
    }

    /// Returns the number of index entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the decoded entries in index order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Returns the data file path as given, before materialization.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

fn clock_seeded_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos)
}
