use std::io::Write;

use anyhow::Context;
use serde::Serialize;

use crate::args::OutputArgs;

mod pairwise;
pub use pairwise::{count, edit, global, trace};

mod subsequence;
pub use subsequence::{lcs, lis, sseq};

/// A command result that can be written as plain text or as JSON.
pub trait Report: Serialize {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn write_report(report: &impl Report, output_args: &OutputArgs) -> anyhow::Result<()> {
    let mut out = output_args.writer()?;
    write_report_to(report, output_args.json, &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn write_report_to(report: &impl Report, json: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer(&mut *out, report).context("failed to serialize result")?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct NumberReport {
        number: i64,
    }

    impl Report for NumberReport {
        fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
            writeln!(out, "{}", self.number)?;
            Ok(())
        }
    }

    #[test]
    fn test_write_report_to() -> anyhow::Result<()> {
        let report = NumberReport { number: -3 };

        let mut out: Vec<u8> = vec![];
        write_report_to(&report, false, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "-3\n");

        let mut out: Vec<u8> = vec![];
        write_report_to(&report, true, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "{\"number\":-3}\n");
        Ok(())
    }
}
