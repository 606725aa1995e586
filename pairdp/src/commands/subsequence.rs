use std::io::Write;

use libpairdp::subsequence::{
    longest_common_subsequence, longest_decreasing_subsequence, longest_increasing_subsequence,
    subsequence_indices,
};
use libpairdp::util::space_separated;
use log::info;
use serde::Serialize;

use super::{write_report, Report};
use crate::args::RunArgs;
use crate::io::{read_pair, read_permutation};

#[derive(Serialize)]
pub struct LcsReport {
    pub subsequence: String,
}

impl Report for LcsReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.subsequence)?;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct LisReport {
    pub increasing: Vec<usize>,
    pub decreasing: Vec<usize>,
}

impl Report for LisReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", space_separated(&self.increasing))?;
        writeln!(out, "{}", space_separated(&self.decreasing))?;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct SseqReport {
    /// 1-based positions, or none if the second sequence is not a subsequence
    pub indices: Option<Vec<usize>>,
}

impl Report for SseqReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.indices {
            Some(ref indices) => writeln!(out, "{}", space_separated(indices))?,
            None => writeln!(out)?,
        }
        Ok(())
    }
}

pub fn lcs(args: &RunArgs) -> anyhow::Result<()> {
    let (s, t) = read_pair(&args.input_args.input_path)?;
    info!("finding a longest common subsequence");

    let report = LcsReport {
        subsequence: longest_common_subsequence(&s, &t),
    };

    write_report(&report, &args.output_args)
}

pub fn lis(args: &RunArgs) -> anyhow::Result<()> {
    let values = read_permutation(&args.input_args.input_path)?;
    info!("finding the longest increasing and decreasing subsequences");

    let report = LisReport {
        increasing: longest_increasing_subsequence(&values),
        decreasing: longest_decreasing_subsequence(&values),
    };

    write_report(&report, &args.output_args)
}

pub fn sseq(args: &RunArgs) -> anyhow::Result<()> {
    let (s, t) = read_pair(&args.input_args.input_path)?;
    info!("matching {} as a subsequence of {}", t.name, s.name);

    let report = SseqReport {
        indices: subsequence_indices(&s, &t),
    };

    write_report(&report, &args.output_args)
}
