use std::io::Write;
use std::path::Path;

use anyhow::Context;
use libpairdp::align::{
    align, count_optimal_alignments, edit_alignment, edit_distance, traceback, AlignmentTable,
    Modes, Objective, PairAlignment, SubstitutionMatrix, UnitCost, COUNT_MODULUS,
};
use log::info;
use serde::Serialize;

use super::{write_report, Report};
use crate::args::{EditArgs, GlobalArgs, RunArgs, TraceArgs};
use crate::io::{create_output_file, read_pair};

#[derive(Serialize)]
pub struct DistanceReport {
    pub distance: i64,
}

impl Report for DistanceReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.distance)?;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct CountReport {
    pub count: u32,
    pub modulus: u32,
}

impl Report for CountReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.count)?;
        Ok(())
    }
}

#[derive(Serialize)]
pub struct TraceReport {
    pub distance: i64,
    pub alignment: PairAlignment,
    #[serde(skip)]
    pub pretty: bool,
}

impl Report for TraceReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.distance)?;
        write_alignment(&self.alignment, self.pretty, out)
    }
}

#[derive(Serialize)]
pub struct GlobalReport {
    pub score: i64,
    pub gap_penalty: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<PairAlignment>,
}

impl Report for GlobalReport {
    fn write_text(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        writeln!(out, "{}", self.score)?;
        match self.alignment {
            Some(ref alignment) => write_alignment(alignment, false, out),
            None => Ok(()),
        }
    }
}

fn write_alignment(
    alignment: &PairAlignment,
    pretty: bool,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if pretty {
        writeln!(out, "{alignment}")?;
    } else {
        writeln!(out, "{}", alignment.s_aligned)?;
        writeln!(out, "{}", alignment.t_aligned)?;
    }
    Ok(())
}

fn dump_table(
    table: &AlignmentTable,
    path: &Path,
    allow_overwrite: bool,
) -> anyhow::Result<()> {
    info!("writing alignment table to {}", path.to_string_lossy());
    let mut out = create_output_file(path, allow_overwrite)?;
    table.dump(&mut out)?;
    out.flush()
        .context(format!("failed to write table: {}", path.to_string_lossy()))?;
    Ok(())
}

pub fn edit(args: &EditArgs) -> anyhow::Result<()> {
    let run_args = &args.run_args;
    let (s, t) = read_pair(&run_args.input_args.input_path)?;
    info!("computing the edit distance");

    let distance = match args.dump_table_path {
        Some(ref path) => {
            let table = align(&s, &t, &UnitCost, Objective::Minimize, Modes::VALUE)?;
            dump_table(&table, path, run_args.output_args.allow_overwrite)?;
            table.score()
        }
        None => edit_distance(&s, &t)?,
    };

    write_report(&DistanceReport { distance }, &run_args.output_args)
}

pub fn count(args: &RunArgs) -> anyhow::Result<()> {
    let (s, t) = read_pair(&args.input_args.input_path)?;
    info!("counting optimal alignments modulo {COUNT_MODULUS}");

    let report = CountReport {
        count: count_optimal_alignments(&s, &t)?,
        modulus: COUNT_MODULUS,
    };

    write_report(&report, &args.output_args)
}

pub fn trace(args: &TraceArgs) -> anyhow::Result<()> {
    let (s, t) = read_pair(&args.run_args.input_args.input_path)?;
    info!("computing an optimal edit alignment");

    let alignment = edit_alignment(&s, &t)?;
    let report = TraceReport {
        distance: alignment.score,
        alignment,
        pretty: args.pretty,
    };

    write_report(&report, &args.run_args.output_args)
}

pub fn global(args: &GlobalArgs) -> anyhow::Result<()> {
    let run_args = &args.run_args;
    let (s, t) = read_pair(&run_args.input_args.input_path)?;

    let matrix = match args.matrix_path {
        Some(ref path) => {
            info!("reading substitution matrix from {}", path.to_string_lossy());
            SubstitutionMatrix::from_path(path, args.gap_penalty)?
        }
        None => SubstitutionMatrix::blosum62(args.gap_penalty)?,
    };
    info!(
        "computing the global alignment score with gap penalty {}",
        args.gap_penalty
    );

    let modes = if args.alignment {
        Modes::VALUE | Modes::TRACEBACK
    } else {
        Modes::VALUE
    };
    let table = align(&s, &t, &matrix, Objective::Maximize, modes)?;

    if let Some(ref path) = args.dump_table_path {
        dump_table(&table, path, run_args.output_args.allow_overwrite)?;
    }

    let alignment = args
        .alignment
        .then(|| traceback(&table, &s, &t))
        .transpose()?;

    let report = GlobalReport {
        score: table.score(),
        gap_penalty: matrix.gap_penalty(),
        alignment,
    };

    write_report(&report, &run_args.output_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{CommonArgs, InputArgs, OutputArgs};
    use assert2::{check, let_assert};
    use std::path::PathBuf;

    struct Scratch {
        input_path: PathBuf,
        output_path: PathBuf,
    }

    impl Scratch {
        fn new(tag: &str, input: &str) -> anyhow::Result<Self> {
            let dir = std::env::temp_dir();
            let id = std::process::id();
            let scratch = Self {
                input_path: dir.join(format!("pairdp-{tag}-{id}.fasta")),
                output_path: dir.join(format!("pairdp-{tag}-{id}.out")),
            };
            std::fs::write(&scratch.input_path, input)?;
            Ok(scratch)
        }

        fn run_args(&self, json: bool) -> RunArgs {
            RunArgs {
                input_args: InputArgs {
                    input_path: self.input_path.clone(),
                },
                output_args: OutputArgs {
                    output_path: Some(self.output_path.clone()),
                    allow_overwrite: true,
                    json,
                },
                common_args: CommonArgs { verbosity: 0 },
            }
        }

        fn output(&self) -> anyhow::Result<String> {
            Ok(std::fs::read_to_string(&self.output_path)?)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.input_path);
            let _ = std::fs::remove_file(&self.output_path);
        }
    }

    const PAIR: &str = ">Rosalind_39\nPLEASANTLY\n>Rosalind_11\nMEANLY\n";

    #[test]
    fn test_edit_and_count() -> anyhow::Result<()> {
        let scratch = Scratch::new("edit", PAIR)?;

        edit(&EditArgs {
            run_args: scratch.run_args(false),
            dump_table_path: None,
        })?;
        check!(scratch.output()? == "5\n");

        count(&scratch.run_args(false))?;
        check!(scratch.output()? == "4\n");

        count(&scratch.run_args(true))?;
        check!(scratch.output()? == "{\"count\":4,\"modulus\":134217727}\n");
        Ok(())
    }

    #[test]
    fn test_edit_dump_table() -> anyhow::Result<()> {
        let scratch = Scratch::new("dump", ">a\nAB\n>b\nB\n")?;
        let table_path = scratch.output_path.with_extension("table");

        edit(&EditArgs {
            run_args: scratch.run_args(false),
            dump_table_path: Some(table_path.clone()),
        })?;
        check!(scratch.output()? == "1\n");

        let table = std::fs::read_to_string(&table_path)?;
        std::fs::remove_file(&table_path)?;
        check!(table == "       0   1\n0 V    0   1\n1 V    1   1\n2 V    2   1\n");
        Ok(())
    }

    #[test]
    fn test_trace() -> anyhow::Result<()> {
        let scratch = Scratch::new("trace", ">a\nPRETTY\n>b\nPRTTEIN\n")?;

        trace(&TraceArgs {
            run_args: scratch.run_args(false),
            pretty: false,
        })?;
        let output = scratch.output()?;
        let lines: Vec<&str> = output.lines().collect();
        check!(lines.len() == 3);
        check!(lines[0] == "4");
        check!(lines[1].len() == lines[2].len());
        check!(lines[1].replace('-', "") == "PRETTY");
        check!(lines[2].replace('-', "") == "PRTTEIN");

        trace(&TraceArgs {
            run_args: scratch.run_args(false),
            pretty: true,
        })?;
        check!(scratch.output()?.lines().count() == 4);
        Ok(())
    }

    #[test]
    fn test_global() -> anyhow::Result<()> {
        let scratch = Scratch::new("global", PAIR)?;
        let global_args = |alignment: bool, json: bool| GlobalArgs {
            run_args: scratch.run_args(json),
            gap_penalty: 5,
            matrix_path: None,
            alignment,
            dump_table_path: None,
        };

        global(&global_args(false, false))?;
        check!(scratch.output()? == "8\n");

        global(&global_args(false, true))?;
        check!(scratch.output()? == "{\"score\":8,\"gap_penalty\":5}\n");

        global(&global_args(true, false))?;
        let output = scratch.output()?;
        let lines: Vec<&str> = output.lines().collect();
        check!(lines.len() == 3);
        check!(lines[0] == "8");
        check!(lines[1].replace('-', "") == "PLEASANTLY");
        check!(lines[2].replace('-', "") == "MEANLY");
        Ok(())
    }

    #[test]
    fn test_global_unknown_residue() -> anyhow::Result<()> {
        let scratch = Scratch::new("global-unknown", ">a\nPLEASANTLY\n>b\nMEANLYZ\n")?;
        let args = GlobalArgs {
            run_args: scratch.run_args(false),
            gap_penalty: 5,
            matrix_path: None,
            alignment: false,
            dump_table_path: None,
        };
        let_assert!(Err(err) = global(&args));
        check!(err.to_string().contains('Z'));
        Ok(())
    }
}
