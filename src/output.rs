use std::io::Write;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde_json::json;

use crate::composition::CompositionReport;
use crate::evolution::EvolutionSummary;
use crate::filter::{filter, FilterOpts};
use crate::metadata::RunMetadata;
use crate::variants::Variant;

/// Enum representing the formats a result can be written in.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,

    /// Tab-separated values with a header row
    Tsv,
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new().delimiter(b'\t').from_writer(writer)
}

/// Writes a composition report, skipping successful records rejected by `opts`. Records which
/// failed are always written, along with their error.
///
/// # Arguments
///
/// * `writer` - Any `std::io::Write`; for in-memory output use a `Vec<u8>` or `std::io::Cursor`.
/// * `report` - The per-record results, written in file order.
/// * `opts` - Length and GC intervals a successful record must fall within.
/// * `metadata` - Run information, only written in the JSON format.
/// * `format` - The output format.
pub fn write_composition(
    writer: &mut impl Write,
    report: &CompositionReport,
    opts: &FilterOpts,
    metadata: &RunMetadata,
    format: OutputFormat,
) -> Result<()> {
    let shown = report
        .entries
        .iter()
        .filter(|(_, r)| r.as_ref().map_or(true, |r| filter(r, opts)));
    let filtered = report.entries.len() - shown.clone().count();
    let summary = report.summary();

    match format {
        OutputFormat::Text => {
            for (id, r) in shown {
                match r {
                    Ok(r) => writeln!(
                        writer,
                        "{id}\tlength={}\tgc={:.2}%",
                        r.length, r.gc_content
                    )?,
                    Err(e) => writeln!(writer, "{id}\terror: {e}")?,
                }
            }
            writeln!(
                writer,
                "# {} of {} records analysed, {} failed, {} filtered out",
                summary.analysed, summary.records, summary.failed, filtered
            )?;
        }
        OutputFormat::Json => {
            let records: Vec<_> = shown
                .map(|(id, r)| match r {
                    Ok(r) => json!({ "id": id, "length": r.length, "gc_content": r.gc_content }),
                    Err(e) => json!({ "id": id, "error": e.to_string() }),
                })
                .collect();

            let data = json!({
                "metadata": metadata,
                "records": records,
                "filtered": filtered,
                "summary": summary,
            });
            serde_json::to_writer_pretty(&mut *writer, &data)
                .context("Could not serialize composition report")?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => {
            let mut wtr = tsv_writer(&mut *writer);
            wtr.write_record(["id", "length", "gc_content", "error"])?;
            for (id, r) in shown {
                match r {
                    Ok(r) => {
                        let length = r.length.to_string();
                        let gc = format!("{:.2}", r.gc_content);
                        wtr.write_record([id.as_str(), length.as_str(), gc.as_str(), ""])?
                    }
                    Err(e) => {
                        let message = e.to_string();
                        wtr.write_record([id.as_str(), "", "", message.as_str()])?
                    }
                }
            }
            wtr.flush()?;
        }
    }

    Ok(())
}

/// Writes the variants found between two sequences. `labels` name the two sequences in the text
/// header.
pub fn write_variants(
    writer: &mut impl Write,
    variants: &[Variant],
    labels: (&str, &str),
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if variants.is_empty() {
                writeln!(writer, "no variants found")?;
            } else {
                writeln!(writer, "position\t{}\t{}", labels.0, labels.1)?;
                for v in variants {
                    writeln!(writer, "{v}")?;
                }
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, variants)
                .context("Could not serialize variants")?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => {
            let mut wtr = tsv_writer(&mut *writer);
            if variants.is_empty() {
                // serialize() only emits headers alongside the first row
                wtr.write_record(["position", "base1", "base2"])?;
            }
            for v in variants {
                wtr.serialize(v)?;
            }
            wtr.flush()?;
        }
    }

    Ok(())
}

/// Writes an evolution summary.
pub fn write_evolution(
    writer: &mut impl Write,
    summary: &EvolutionSummary,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(writer, "{summary}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, summary)
                .context("Could not serialize evolution summary")?;
            writeln!(writer)?;
        }
        OutputFormat::Tsv => {
            let mut wtr = tsv_writer(&mut *writer);
            wtr.serialize(summary)?;
            wtr.flush()?;
        }
    }

    Ok(())
}
