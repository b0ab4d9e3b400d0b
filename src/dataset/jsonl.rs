//! JSONL export.
//!
//! One object per example, one example per line:
//!
//! ```text
//! {"label":"home_win","class":0,"target":[1.0,0.0,0.0],"shape":[80,34],"features":[...]}
//! ```
//!
//! `features` is the flat row-major matrix, home rows first.

use std::io::Write;

use serde::Serialize;

use super::{Dataset, Example};

#[derive(Serialize)]
struct ExampleLine<'a> {
    label: &'a str,
    class: usize,
    target: [f32; 3],
    shape: [usize; 2],
    features: &'a [f32],
}

impl<'a> From<&'a Example> for ExampleLine<'a> {
    fn from(example: &'a Example) -> Self {
        let (rows, cols) = example.features.shape();
        ExampleLine {
            label: example.label.as_str(),
            class: example.label.index(),
            target: example.label.one_hot(),
            shape: [rows, cols],
            features: example.features.as_slice(),
        }
    }
}

/// Writes a single example as one JSON object (no trailing newline).
pub fn write_example_json<W: Write>(example: &Example, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, &ExampleLine::from(example))?;
    Ok(())
}

/// Writes every example as JSONL.
pub fn write_jsonl<W: Write>(dataset: &Dataset, out: &mut W) -> std::io::Result<()> {
    for example in dataset {
        write_example_json(example, out)?;
        writeln!(out)?;
    }
    out.flush()
}
