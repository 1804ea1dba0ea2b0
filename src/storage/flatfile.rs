//! Flat-file quote store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Lines, Write};
use std::path::Path;

use log::{debug, info, warn};

use super::{RecordRange, SeedPolicy, StoreConfig};
use crate::error::{EwitError, Result};
use crate::quote::{Quote, bootstrap_quote};

/// Append-only quote store backed by a single text file.
///
/// Every operation opens the file, does its work and closes it again. The
/// only state kept besides the configuration is whether line 0 holds the
/// bootstrap record, which append-only writes can never change.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    config: StoreConfig,
    first_ordinal: usize,
}

impl QuoteStore {
    /// Open the store, creating the backing file if it does not exist.
    ///
    /// In bootstrap mode a new or empty file is seeded with the bootstrap
    /// record. A file that already holds quotes is never modified, so opening
    /// is idempotent. Ordinal 0 is reserved only when it really holds the
    /// bootstrap record.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut store = Self {
            config,
            first_ordinal: 0,
        };

        if let Some(parent) = store.path().parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let seeded = store.config.seed == SeedPolicy::Bootstrap;
        let seed_line = bootstrap_quote().to_line(store.delimiter());

        match OpenOptions::new().append(true).create_new(true).open(store.path()) {
            Ok(mut file) => {
                info!("Quotes file not found, created {}", store.path().display());
                if seeded {
                    write_line(&mut file, &seed_line)?;
                }
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Using existing quotes file {}", store.path().display());
                if seeded && store.size_bytes()? == 0 {
                    info!("Quotes file {} is empty, seeding it", store.path().display());
                    store.append_line(&seed_line)?;
                }
            }
            Err(e) => return Err(e.into()),
        }

        if seeded {
            match store.lines()?.next().transpose()? {
                Some(first) if first == seed_line => store.first_ordinal = 1,
                _ => warn!(
                    "Quotes file {} does not start with the bootstrap quote, numbering from 0",
                    store.path().display()
                ),
            }
        }

        Ok(store)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Field delimiter
    pub fn delimiter(&self) -> char {
        self.config.delimiter
    }

    /// Lowest ordinal holding a user quote: 1 when line 0 is the bootstrap
    /// record, otherwise 0
    pub fn first_ordinal(&self) -> usize {
        self.first_ordinal
    }

    /// Append a quote and return its ordinal.
    pub fn append(&self, quote: &Quote) -> Result<usize> {
        quote.validate(self.delimiter())?;
        let ordinal = self.count()?;
        let line = quote.to_line(self.delimiter());
        self.append_line(&line)?;
        debug!("Wrote row #{}: [ {} ]", ordinal, line);
        Ok(ordinal)
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(self.path())?;
        write_line(&mut file, line)
    }

    fn lines(&self) -> Result<Lines<BufReader<File>>> {
        let file = File::open(self.path())?;
        Ok(BufReader::new(file).lines())
    }

    /// Number of stored lines, bootstrap record included
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        for line in self.lines()? {
            line?;
            count += 1;
        }
        Ok(count)
    }

    /// Number of user quotes, bootstrap record excluded
    pub fn quote_count(&self) -> Result<usize> {
        Ok(self.count()?.saturating_sub(self.first_ordinal()))
    }

    /// Raw line at `ordinal`, without its terminator.
    pub fn read_at(&self, ordinal: usize) -> Result<String> {
        if ordinal >= self.first_ordinal() {
            for (position, line) in self.lines()?.enumerate() {
                let line = line?;
                if position == ordinal {
                    debug!("Got row #{}: [ {} ]", ordinal, line);
                    return Ok(line);
                }
            }
        }

        Err(EwitError::IndexOutOfRange {
            index: ordinal,
            count: self.count()?,
        })
    }

    /// Lazily read `(ordinal, line)` pairs inside `range`.
    ///
    /// The file is reopened on every call. Records appended while the iterator
    /// is live may or may not be seen.
    pub fn read_range(&self, range: RecordRange) -> Result<RecordLines> {
        range.validate()?;
        let min = range.min.map_or(self.first_ordinal(), |min| min.max(self.first_ordinal()));
        Ok(RecordLines {
            lines: self.lines()?,
            position: 0,
            min,
            max: range.max,
            done: false,
        })
    }

    /// Size of the backing file in bytes
    pub fn size_bytes(&self) -> Result<u64> {
        Ok(fs::metadata(self.path())?.len())
    }

    /// Entire backing file
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(fs::read(self.path())?)
    }
}

/// Write one terminated line with a single write call.
fn write_line(file: &mut File, line: &str) -> Result<()> {
    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');
    file.write_all(buf.as_bytes())?;
    Ok(())
}

/// Iterator over stored lines within an ordinal window
#[derive(Debug)]
pub struct RecordLines {
    lines: Lines<BufReader<File>>,
    position: usize,
    min: usize,
    max: Option<usize>,
    done: bool,
}

impl Iterator for RecordLines {
    type Item = Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if self.max.is_some_and(|max| self.position > max) {
                self.done = true;
                break;
            }

            let Some(line) = self.lines.next() else {
                self.done = true;
                break;
            };
            let ordinal = self.position;
            self.position += 1;

            match line {
                Ok(_) if ordinal < self.min => continue,
                Ok(line) => return Some(Ok((ordinal, line))),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}
