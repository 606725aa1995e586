use seq_io::fasta::{Reader, Record};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::alphabet::{is_residue_byte, PAD_BYTE, UTF8_SPACE};
use anyhow::{Context, Result};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unknown UTF8 sequence byte: {byte}")]
pub struct UnknownUtf8SequenceByteError {
    byte: u8,
}

#[derive(Error, Debug)]
#[error("expected {expected} sequences, found {found}")]
pub struct SequenceCountError {
    pub expected: usize,
    pub found: usize,
}

#[derive(Error, Debug)]
#[error("sequence is empty: {name}")]
pub struct EmptySequenceError {
    pub name: String,
}

/// This holds the string data of a biological sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The length of the sequence
    pub length: usize,
    /// The string data of the sequence. These are the UTF8 bytes that make up
    /// the sequence, buffered with a pad byte so that position 1 is at index 1
    pub utf8_bytes: Vec<u8>,
}

impl Sequence {
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let mut seqs: Vec<Self> = vec![];

        let mut reader = Reader::from_path(&path).with_context(|| {
            format!(
                "failed to open fasta file: {}",
                path.as_ref().to_string_lossy()
            )
        })?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read fasta record")?;
            let mut header_bytes = record.head().to_vec();
            let first_space_idx = header_bytes.iter().position(|&b| b == UTF8_SPACE);

            let error_context: fn() -> &'static str =
                || "failed to create String from fasta header bytes";

            let (name, details) = match first_space_idx {
                Some(idx) => {
                    let details_bytes = header_bytes.split_off(idx + 1);
                    header_bytes.pop();
                    (
                        String::from_utf8(header_bytes).with_context(error_context)?,
                        Some(String::from_utf8(details_bytes).with_context(error_context)?),
                    )
                }
                None => (
                    String::from_utf8(header_bytes).with_context(error_context)?,
                    None,
                ),
            };

            // We want position 1 of the sequence to be at index 1, so we'll buffer with 255
            let mut utf8_bytes: Vec<u8> = vec![PAD_BYTE];

            for line in record.seq_lines() {
                // stray blanks at line ends are not residues
                for &utf8_byte in line.iter().filter(|b| !b.is_ascii_whitespace()) {
                    if !is_residue_byte(utf8_byte) {
                        return Err(UnknownUtf8SequenceByteError { byte: utf8_byte })
                            .with_context(|| format!("in fasta record: {name}"));
                    }
                    utf8_bytes.push(utf8_byte);
                }
            }

            seqs.push(Sequence {
                name,
                details,
                length: utf8_bytes.len() - 1,
                utf8_bytes,
            });
        }
        Ok(seqs)
    }

    /// Read a fasta file that must hold exactly two non-empty records.
    pub fn pair_from_fasta<P: AsRef<Path>>(path: P) -> Result<(Self, Self)> {
        let seqs = Self::from_fasta(path)?;

        if seqs.len() != 2 {
            return Err(SequenceCountError {
                expected: 2,
                found: seqs.len(),
            }
            .into());
        }

        if let Some(empty) = seqs.iter().find(|s| s.length == 0) {
            return Err(EmptySequenceError {
                name: empty.name.clone(),
            }
            .into());
        }

        let mut seqs = seqs.into_iter();
        match (seqs.next(), seqs.next()) {
            (Some(s), Some(t)) => Ok((s, t)),
            _ => Err(SequenceCountError {
                expected: 2,
                found: 0,
            }
            .into()),
        }
    }

    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        let mut utf8_bytes: Vec<u8> = vec![PAD_BYTE; bytes.len() + 1];
        utf8_bytes[1..].copy_from_slice(bytes);

        if let Some(&byte) = bytes.iter().find(|&&b| !is_residue_byte(b)) {
            return Err(UnknownUtf8SequenceByteError { byte }.into());
        }

        Ok(Sequence {
            name: "".to_string(),
            details: None,
            length: bytes.len(),
            utf8_bytes,
        })
    }

    /// The residues of the sequence, without the leading pad byte.
    pub fn residues(&self) -> &[u8] {
        &self.utf8_bytes[1..]
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.residues().chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        // if we're not on the last
                        // line, add a linebreak
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.residues()))
    }
}
