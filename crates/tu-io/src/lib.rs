// crates/tu-io/src/lib.rs

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Text matrix formats consumed by the CLI (spec.md §6): dense and sparse
//! (coordinate) integer matrices in `{-1,0,+1}`. This crate has no opinion
//! on the decision itself, only on getting a [`Matrix`] out of text and back.

use std::collections::HashSet;
use std::io::BufRead;

use anyhow::{bail, ensure, Context, Result};
use tu_core::Matrix;

/// Read a matrix, auto-detecting dense vs. sparse from the header line's
/// token count (`H W` is dense, `H W NNZ` is sparse).
///
/// # Errors
/// Returns an error if the header is malformed or neither 2 nor 3 tokens,
/// or if the body doesn't match the declared shape.
pub fn read_matrix_auto<R: BufRead>(mut reader: R) -> Result<Matrix> {
    let mut header = String::new();
    reader.read_line(&mut header).context("reading matrix header line")?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    match tokens.len() {
        2 => {
            let h: usize = tokens[0].parse().context("parsing H in dense header")?;
            let w: usize = tokens[1].parse().context("parsing W in dense header")?;
            read_dense_body(reader, h, w)
        }
        3 => {
            let h: usize = tokens[0].parse().context("parsing H in sparse header")?;
            let w: usize = tokens[1].parse().context("parsing W in sparse header")?;
            let nnz: usize = tokens[2].parse().context("parsing NNZ in sparse header")?;
            read_sparse_body(reader, h, w, nnz)
        }
        n => bail!("matrix header must have 2 (dense) or 3 (sparse) tokens, found {n}"),
    }
}

/// Parse a dense matrix: first line `H W`, then `H*W` whitespace-separated integers.
///
/// # Errors
/// Returns an error if the header or body is malformed, or the body has the
/// wrong number of entries.
pub fn read_dense<R: BufRead>(mut reader: R) -> Result<Matrix> {
    let mut header = String::new();
    reader.read_line(&mut header).context("reading dense header line")?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    ensure!(tokens.len() == 2, "dense header must be `H W`, found {} tokens", tokens.len());
    let h: usize = tokens[0].parse().context("parsing H")?;
    let w: usize = tokens[1].parse().context("parsing W")?;
    read_dense_body(reader, h, w)
}

fn read_dense_body<R: BufRead>(reader: R, h: usize, w: usize) -> Result<Matrix> {
    let mut values = Vec::with_capacity(h * w);
    for line in reader.lines() {
        let line = line.context("reading dense matrix body")?;
        for tok in line.split_whitespace() {
            values.push(tok.parse::<i64>().with_context(|| format!("parsing dense entry {tok:?}"))?);
        }
    }
    ensure!(values.len() == h * w, "dense body has {} entries, expected {h}*{w}={}", values.len(), h * w);
    Ok(Matrix::from_row_major(h, w, values))
}

/// Parse a sparse (coordinate) matrix: first line `H W NNZ`, then `NNZ`
/// lines `row col value`. Duplicate `(row, col)` entries are ill-formed.
///
/// # Errors
/// Returns an error if the header or any body line is malformed, a
/// coordinate is out of bounds, a `(row, col)` pair repeats, or the number
/// of body lines doesn't match `NNZ`.
pub fn read_sparse<R: BufRead>(mut reader: R) -> Result<Matrix> {
    let mut header = String::new();
    reader.read_line(&mut header).context("reading sparse header line")?;
    let tokens: Vec<&str> = header.split_whitespace().collect();
    ensure!(tokens.len() == 3, "sparse header must be `H W NNZ`, found {} tokens", tokens.len());
    let h: usize = tokens[0].parse().context("parsing H")?;
    let w: usize = tokens[1].parse().context("parsing W")?;
    let nnz: usize = tokens[2].parse().context("parsing NNZ")?;
    read_sparse_body(reader, h, w, nnz)
}

fn read_sparse_body<R: BufRead>(reader: R, h: usize, w: usize, nnz: usize) -> Result<Matrix> {
    let mut matrix = Matrix::zeros(h, w);
    let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(nnz);
    let mut count = 0usize;

    for line in reader.lines() {
        let line = line.context("reading sparse matrix body")?;
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        ensure!(tokens.len() == 3, "sparse body line must be `row col value`, found {:?}", line);
        let row: usize = tokens[0].parse().context("parsing row")?;
        let col: usize = tokens[1].parse().context("parsing col")?;
        let value: i64 = tokens[2].parse().context("parsing value")?;
        ensure!(row < h && col < w, "coordinate ({row}, {col}) out of bounds for a {h}x{w} matrix");
        ensure!(seen.insert((row, col)), "duplicate coordinate ({row}, {col}) in sparse input");
        matrix.set(row, col, value);
        count += 1;
    }
    ensure!(count == nnz, "sparse body declared {nnz} entries but found {count}");
    Ok(matrix)
}

/// Render a matrix in the dense text format, for diagnostics and round-trip tests.
#[must_use]
pub fn write_dense(matrix: &Matrix) -> String {
    let mut out = format!("{} {}\n", matrix.rows(), matrix.cols());
    for r in 0..matrix.rows() {
        let row: Vec<String> = (0..matrix.cols()).map(|c| matrix.get(r, c).to_string()).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_round_trips() {
        let m = Matrix::from_row_major(2, 3, vec![1, 0, -1, 0, 1, 1]);
        let text = write_dense(&m);
        let parsed = read_dense(text.as_bytes()).expect("valid dense text");
        assert_eq!(parsed, m);
    }

    #[test]
    fn sparse_fills_unlisted_entries_with_zero() {
        let text = "2 2 2\n0 0 1\n1 1 -1\n";
        let m = read_sparse(text.as_bytes()).expect("valid sparse text");
        assert_eq!(m.get(0, 0), 1);
        assert_eq!(m.get(0, 1), 0);
        assert_eq!(m.get(1, 0), 0);
        assert_eq!(m.get(1, 1), -1);
    }

    #[test]
    fn sparse_rejects_duplicate_coordinates() {
        let text = "2 2 2\n0 0 1\n0 0 1\n";
        assert!(read_sparse(text.as_bytes()).is_err());
    }

    #[test]
    fn sparse_rejects_out_of_bounds_coordinate() {
        let text = "2 2 1\n5 5 1\n";
        assert!(read_sparse(text.as_bytes()).is_err());
    }

    #[test]
    fn auto_detects_dense_and_sparse_from_header_width() {
        let dense = read_matrix_auto("1 2\n1 -1\n".as_bytes()).expect("dense");
        assert_eq!(dense.get(0, 1), -1);

        let sparse = read_matrix_auto("1 2 1\n0 1 -1\n".as_bytes()).expect("sparse");
        assert_eq!(sparse.get(0, 1), -1);
    }

    #[test]
    fn dense_rejects_wrong_entry_count() {
        let text = "2 2\n1 0 0\n";
        assert!(read_dense(text.as_bytes()).is_err());
    }
}
