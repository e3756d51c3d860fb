//! Delimited text format for jobs and results
//!
//! A job file looks like
//!
//! ```text
//! M,3          operation code and dimension
//! ,,           separator
//! 1,1,5        right-hand operand, one r,c,v triple per line
//! 3,2,-1
//! ,,           end of the right-hand block
//! 2,2,4        left-hand operand until a separator or EOF
//! ```
//!
//! For `S` the line after the right-hand block holds the scalar instead of
//! a left-hand matrix. Fields are trimmed. A blank line ends a block just
//! like a delimiter-only line does.
//! Results are written as the header line followed by the stored cells in
//! row-major order.

use std::io::{Read, Write};
use std::iter::Peekable;
use log::{debug, warn};

use super::job::{Job, Operand, Operation};
use crate::error::{JobError, Result};
use crate::matrix::{EngineConfig, RingMatrix, Scalar};

type Records<R> = Peekable<csv::StringRecordsIntoIter<R>>;

/// Largest dimension accepted from a job header
pub const MAX_DIM: usize = 1 << 24;

/// Reads a job from delimited text
pub fn read_job<T, R>(mut reader: R, config: &EngineConfig) -> Result<Job<T>, JobError>
where
    T: Scalar,
    R: Read,
{
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let text = mark_blank_lines(&text, config.delimiter);

    let mut records = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(config.delimiter)
        .from_reader(text.as_bytes())
        .into_records()
        .peekable();

    let header = records.next().ok_or(JobError::MissingHeader)??;
    let code = header.get(0).unwrap_or_default();
    let op = Operation::from_code(code).ok_or_else(|| JobError::UnknownOperation(code.to_string()))?;
    let n: usize = parse_field(&header, 1, "dimension")?;
    if n > MAX_DIM {
        return Err(JobError::Parse {
            line: line_of(&header),
            reason: format!("dimension {} exceeds the limit of {}", n, MAX_DIM),
        });
    }
    debug!("header: op {}, n {}", op, n);

    if let Some(Ok(record)) = records.peek() {
        if is_separator(record) {
            records.next();
        }
    }

    let right = read_block(&mut records, n)?;

    let left = match op {
        Operation::Scale => {
            let k = match records.next().transpose()? {
                Some(record) if !is_separator(&record) => parse_field(&record, 0, "scalar")?,
                _ => {
                    warn!("no scalar after the right-hand block, scaling by 0");
                    T::zero()
                }
            };
            Operand::Scalar(k)
        }
        _ => Operand::Matrix(read_block(&mut records, n)?),
    };

    Ok(Job { op, right, left })
}

/// Writes the header line and every stored cell of `result`
pub fn write_result<T, W>(
    writer: W,
    op: Operation,
    result: &RingMatrix<T>,
    config: &EngineConfig,
) -> Result<(), JobError>
where
    T: Scalar,
    W: Write,
{
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .delimiter(config.delimiter)
        .from_writer(writer);

    wtr.write_record([op.code().to_string(), result.dim().to_string()])?;
    for (r, c, v) in result.triplets() {
        wtr.write_record([r.to_string(), c.to_string(), v.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads `r,c,v` triples until a separator line or EOF, summing duplicates
fn read_block<T, R>(records: &mut Records<R>, n: usize) -> Result<RingMatrix<T>, JobError>
where
    T: Scalar,
    R: Read,
{
    let mut matrix = RingMatrix::new(n);
    for record in records.by_ref() {
        let record = record?;
        if is_separator(&record) {
            break;
        }

        let r: usize = parse_field(&record, 0, "row")?;
        let c: usize = parse_field(&record, 1, "column")?;
        let v: T = parse_field(&record, 2, "value")?;
        if v.is_zero() {
            continue;
        }
        matrix
            .accumulate(r, c, v)
            .map_err(|source| JobError::Entry {
                line: line_of(&record),
                source,
            })?;
    }
    debug!("block: {} cells", matrix.nnz());
    Ok(matrix)
}

/// Replaces every blank line by a lone delimiter
///
/// The csv reader drops empty lines, so they would otherwise never reach
/// [`is_separator`]. Line numbers are preserved.
fn mark_blank_lines(text: &str, delimiter: u8) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(char::from(delimiter));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// A line made only of delimiters and whitespace
fn is_separator(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.is_empty())
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn parse_field<N: num_traits::Num>(
    record: &csv::StringRecord,
    index: usize,
    what: &str,
) -> Result<N, JobError> {
    let field = record.get(index).ok_or_else(|| JobError::Parse {
        line: line_of(record),
        reason: format!("missing {}", what),
    })?;
    N::from_str_radix(field, 10).map_err(|_| JobError::Parse {
        line: line_of(record),
        reason: format!("invalid {} `{}`", what, field),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<Job<i64>, JobError> {
        read_job(text.as_bytes(), &EngineConfig::default())
    }

    #[test]
    fn test_read_add_job() {
        let job = read("A,2\n,,\n1,1,1\n2,2,4\n,,\n1,1,5\n").unwrap();
        assert_eq!(job.op, Operation::Add);
        assert_eq!(job.dim(), 2);
        assert_eq!(job.right.triplets().collect::<Vec<_>>(), vec![(1, 1, 1), (2, 2, 4)]);
        match job.left {
            Operand::Matrix(left) => {
                assert_eq!(left.triplets().collect::<Vec<_>>(), vec![(1, 1, 5)]);
            }
            Operand::Scalar(_) => panic!("expected a matrix operand"),
        }
    }

    #[test]
    fn test_read_scale_job() {
        let job = read("s, 3\n,,\n1, 2, 7\n,,\n-2\n").unwrap();
        assert_eq!(job.op, Operation::Scale);
        assert_eq!(job.left, Operand::Scalar(-2));
    }

    #[test]
    fn test_missing_scalar_defaults_to_zero() {
        let job = read("S,1\n,,\n1,1,7\n,,\n").unwrap();
        assert_eq!(job.left, Operand::Scalar(0));
    }

    #[test]
    fn test_duplicates_summed_and_zeros_skipped() {
        let job = read("T,2\n,,\n1,2,3\n1,2,4\n2,1,0\n2,2,1\n2,2,-1\n,,\n").unwrap();
        assert_eq!(job.right.triplets().collect::<Vec<_>>(), vec![(1, 2, 7)]);
    }

    #[test]
    fn test_out_of_range_reports_line() {
        let err = read("A,2\n,,\n1,1,1\n3,1,1\n,,\n").unwrap_err();
        match err {
            JobError::Entry { line, source } => {
                assert_eq!(line, 4);
                assert!(matches!(source, crate::MatrixError::OutOfRange { row: 3, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(read(""), Err(JobError::MissingHeader)));
        assert!(matches!(read("Q,2\n"), Err(JobError::UnknownOperation(code)) if code == "Q"));
        assert!(matches!(read("A,two\n"), Err(JobError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_bad_value() {
        let err = read("A,2\n,,\n1,1,x\n").unwrap_err();
        assert!(matches!(err, JobError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_blank_line_ends_right_block() {
        let job = read("A,2\n,,\n1,1,1\n\n1,1,5\n").unwrap();
        assert_eq!(job.right.triplets().collect::<Vec<_>>(), vec![(1, 1, 1)]);
        match job.left {
            Operand::Matrix(left) => {
                assert_eq!(left.triplets().collect::<Vec<_>>(), vec![(1, 1, 5)]);
            }
            Operand::Scalar(_) => panic!("expected a matrix operand"),
        }
    }

    #[test]
    fn test_blank_line_ends_left_block() {
        let job = read("M,2\n,,\n1,1,2\n,,\n1,1,3\n   \n2,2,9\n").unwrap();
        assert!(matches!(&job.left, Operand::Matrix(m) if m.nnz() == 1));
        assert_eq!(job.run(&EngineConfig::default()).unwrap().get(1, 1).unwrap(), 6);
    }

    #[test]
    fn test_blank_line_keeps_line_numbers() {
        let err = read("A,2\n,,\n1,1,1\n\n3,1,1\n").unwrap_err();
        assert!(matches!(err, JobError::Entry { line: 5, .. }));
    }

    #[test]
    fn test_dimension_limit() {
        let err = read("A,18446744073709551615\n").unwrap_err();
        assert!(matches!(err, JobError::Parse { line: 1, .. }));

        let err = read(&format!("T,{}\n", MAX_DIM + 1)).unwrap_err();
        assert!(matches!(err, JobError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_write_result() {
        let m = RingMatrix::<i64>::from_triplets(2, vec![(2, 1, -3), (1, 2, 2)]).unwrap();
        let mut out = Vec::new();
        write_result(&mut out, Operation::Add, &m, &EngineConfig::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A,2\n1,2,2\n2,1,-3\n");
    }
}
