use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use libpairdp::structs::Sequence;
use log::info;
use thiserror::Error;

use crate::args::OutputArgs;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PermutationError {
    #[error("permutation input is empty")]
    Empty,
    #[error("not a positive integer: {0}")]
    BadValue(String),
    #[error("expected {expected} values after the length, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Read the two sequences of a fasta file.
pub fn read_pair(path: &Path) -> anyhow::Result<(Sequence, Sequence)> {
    let (s, t) = Sequence::pair_from_fasta(path)?;
    info!(
        "read {} ({} residues) and {} ({} residues) from {}",
        s.name,
        s.length,
        t.name,
        t.length,
        path.to_string_lossy()
    );
    Ok((s, t))
}

/// Parse a length `n` followed by exactly `n` positive integers.
pub fn parse_permutation(text: &str) -> Result<Vec<usize>, PermutationError> {
    let mut tokens = text.split_whitespace();

    let length_token = tokens.next().ok_or(PermutationError::Empty)?;
    let length: usize = length_token
        .parse()
        .map_err(|_| PermutationError::BadValue(length_token.to_string()))?;

    let values = tokens
        .map(|token| match token.parse::<usize>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(PermutationError::BadValue(token.to_string())),
        })
        .collect::<Result<Vec<usize>, PermutationError>>()?;

    if values.len() != length {
        return Err(PermutationError::LengthMismatch {
            expected: length,
            found: values.len(),
        });
    }

    Ok(values)
}

pub fn read_permutation(path: &Path) -> anyhow::Result<Vec<usize>> {
    let text = std::fs::read_to_string(path).context(format!(
        "failed to read permutation file: {}",
        path.to_string_lossy()
    ))?;

    let values = parse_permutation(&text)
        .context(format!("malformed permutation in: {}", path.to_string_lossy()))?;
    info!(
        "read a permutation of {} values from {}",
        values.len(),
        path.to_string_lossy()
    );
    Ok(values)
}

/// Open a result or table file for writing. Unless `allow_overwrite`
/// is set, a file that already exists is left alone and is an error.
pub fn create_output_file(path: &Path, allow_overwrite: bool) -> anyhow::Result<BufWriter<File>> {
    let mut options = OpenOptions::new();
    options.write(true);
    match allow_overwrite {
        true => options.create(true).truncate(true),
        false => options.create_new(true),
    };

    let file = options.open(path).with_context(|| {
        let hint = if allow_overwrite { "" } else { " (pass --allow-overwrite to replace it)" };
        format!("failed to open output file: {}{hint}", path.to_string_lossy())
    })?;
    Ok(BufWriter::new(file))
}

impl OutputArgs {
    /// The destination for results: the output path if one was given, else stdout.
    pub fn writer(&self) -> anyhow::Result<Box<dyn Write>> {
        match self.output_path {
            Some(ref path) => Ok(Box::new(create_output_file(path, self.allow_overwrite)?)),
            None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
        }
    }
}
