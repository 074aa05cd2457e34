//! Delimited text loading.
//!
//! Rows are parsed against the fixed sample schema (see
//! [`sample_schema`](crate::sample_schema)) and chunked into batches of at
//! most `max_slice_rows` rows. Each batch is built from its own buffers, so no
//! two slices share a payload.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Builder, StringBuilder};
use arrow::record_batch::RecordBatch;
use log::debug;

use common_config::LoaderConfig;
use common_error::{MohairError, MohairResult, value_err};

use crate::data::sample_schema;

/// Column builders for one chunk of rows.
struct ChunkBuilder {
    gene_ids: StringBuilder,
    cell_ids: StringBuilder,
    expressions: Float32Builder,
    rows: usize,
}

impl ChunkBuilder {
    fn new() -> Self {
        Self {
            gene_ids: StringBuilder::new(),
            cell_ids: StringBuilder::new(),
            expressions: Float32Builder::new(),
            rows: 0,
        }
    }

    fn append(&mut self, gene_id: &str, cell_id: &str, expression: f32) {
        self.gene_ids.append_value(gene_id);
        self.cell_ids.append_value(cell_id);
        self.expressions.append_value(expression);
        self.rows += 1;
    }

    fn finish(mut self) -> MohairResult<RecordBatch> {
        let columns: Vec<ArrayRef> = vec![
            Arc::new(self.gene_ids.finish()),
            Arc::new(self.cell_ids.finish()),
            Arc::new(self.expressions.finish()),
        ];
        Ok(RecordBatch::try_new(sample_schema(), columns)?)
    }
}

fn split_fields<'a>(line: &'a str, delimiter: Option<char>) -> Vec<&'a str> {
    match delimiter {
        Some(delim) => line.split(delim).map(str::trim).collect(),
        None => line.split_whitespace().collect(),
    }
}

/// Read `gene_id`, `cell_id`, `expression` rows into batches.
///
/// Blank lines are skipped and fields past the third are ignored. Fails with
/// `ValueError` on rows with fewer than three fields, unparseable expression
/// values, or a zero `max_slice_rows`.
pub fn read_delimited(reader: impl BufRead, config: &LoaderConfig) -> MohairResult<Vec<RecordBatch>> {
    if config.max_slice_rows == 0 {
        value_err!("max_slice_rows must be positive");
    }

    let mut batches = Vec::new();
    let mut chunk = ChunkBuilder::new();
    let skip = usize::from(config.has_header);

    for (line_no, line) in reader.lines().enumerate().skip(skip) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(&line, config.delimiter);
        let [gene_id, cell_id, expression, ..] = fields.as_slice() else {
            return Err(MohairError::value_error(format!(
                "line {}: expected 3 fields, found {}",
                line_no + 1,
                fields.len()
            )));
        };
        let expression: f32 = expression.parse().map_err(|e| {
            MohairError::value_error(format!(
                "line {}: invalid expression '{expression}': {e}",
                line_no + 1
            ))
        })?;

        chunk.append(gene_id, cell_id, expression);
        if chunk.rows == config.max_slice_rows {
            batches.push(std::mem::replace(&mut chunk, ChunkBuilder::new()).finish()?);
        }
    }

    if chunk.rows > 0 {
        batches.push(chunk.finish()?);
    }

    debug!(
        "Read {} row(s) into {} batch(es)",
        batches.iter().map(RecordBatch::num_rows).sum::<usize>(),
        batches.len()
    );
    Ok(batches)
}

/// Read a delimited file; see [`read_delimited`].
pub fn read_delimited_file(
    path: impl AsRef<Path>,
    config: &LoaderConfig,
) -> MohairResult<Vec<RecordBatch>> {
    let file = File::open(path.as_ref())?;
    read_delimited(BufReader::new(file), config)
}

#[cfg(test)]
mod tests {
    use arrow::array::{Array, Float32Array, StringArray};

    use super::*;

    fn rows(n: usize) -> String {
        let mut text = String::from("gene_id cell_id expression\n");
        for i in 0..n {
            text.push_str(&format!("g{} c{i} {i}.5\n", i % 3));
        }
        text
    }

    #[test]
    fn test_chunking() {
        let batches = read_delimited(rows(12).as_bytes(), &LoaderConfig::default()).unwrap();

        let sizes: Vec<_> = batches.iter().map(RecordBatch::num_rows).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
        assert!(batches.iter().all(|b| b.num_columns() == 3));
    }

    #[test]
    fn test_values_parsed() {
        let batches = read_delimited(rows(2).as_bytes(), &LoaderConfig::default()).unwrap();
        let batch = &batches[0];

        let genes = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
        let exprs = batch.column(2).as_any().downcast_ref::<Float32Array>().unwrap();
        assert_eq!(genes.value(1), "g1");
        assert_eq!(exprs.value(1), 1.5);
        assert_eq!(exprs.null_count(), 0);
    }

    #[test]
    fn test_custom_delimiter_without_header() {
        let config = LoaderConfig {
            delimiter: Some('\t'),
            has_header: false,
            ..Default::default()
        };
        let text = "g1\tc 1\t0.25\n\ng2\tc 2\t4\n";

        let batches = read_delimited(text.as_bytes(), &config).unwrap();
        assert_eq!(batches.len(), 1);
        let cells = batches[0].column(1).as_any().downcast_ref::<StringArray>().unwrap();
        assert_eq!(cells.value(0), "c 1");
        assert_eq!(batches[0].num_rows(), 2);
    }

    #[test]
    fn test_empty_input() {
        let batches = read_delimited("gene_id cell_id expression\n".as_bytes(), &LoaderConfig::default())
            .unwrap();
        assert!(batches.is_empty());
    }

    #[test]
    fn test_short_row_rejected() {
        let err = read_delimited("header\ng1 c1\n".as_bytes(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, MohairError::ValueError(msg) if msg.starts_with("line 2")));
    }

    #[test]
    fn test_bad_expression_rejected() {
        let err = read_delimited("header\ng1 c1 high\n".as_bytes(), &LoaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, MohairError::ValueError(_)));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = LoaderConfig {
            max_slice_rows: 0,
            ..Default::default()
        };
        assert!(read_delimited(rows(1).as_bytes(), &config).is_err());
    }
}
