//! Plain-text instance format.
//!
//! ```text
//! <vertex count> <edge count> <capacity>
//! <weight 0> <weight 1> ... <weight n-1>
//! <value 0>  <value 1>  ... <value n-1>
//! <u> <v>
//! ...
//! ```
//!
//! One edge per line after the header. Blank lines are skipped.

use std::path::Path;
use std::str::FromStr;

use super::ProblemInstance;
use crate::error::InstanceError;

impl ProblemInstance {
    /// Reads and parses an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }
}

impl FromStr for ProblemInstance {
    type Err = InstanceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (line_no, header) = lines.next().ok_or_else(|| parse_error(1, "missing header"))?;
        let header: Vec<&str> = header.split_whitespace().collect();
        if header.len() != 3 {
            return Err(parse_error(
                line_no,
                format!("header needs 3 fields, got {}", header.len()),
            ));
        }
        let vertex_count: usize = parse_token(line_no, header[0])?;
        let edge_count: usize = parse_token(line_no, header[1])?;
        let capacity: f64 = parse_token(line_no, header[2])?;

        // An instance without vertices may omit the weight and value lines.
        let (weights, values) = if vertex_count == 0 {
            (Vec::new(), Vec::new())
        } else {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| parse_error(line_no + 1, "missing weights line"))?;
            let weights = parse_row(line_no, line)?;
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| parse_error(line_no + 1, "missing values line"))?;
            (weights, parse_row(line_no, line)?)
        };

        let mut edges = Vec::with_capacity(edge_count);
        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 2 {
                return Err(parse_error(
                    line_no,
                    format!("edge needs 2 endpoints, got {}", fields.len()),
                ));
            }
            edges.push((parse_token(line_no, fields[0])?, parse_token(line_no, fields[1])?));
        }
        if edges.len() != edge_count {
            return Err(InstanceError::EdgeCountMismatch {
                expected: edge_count,
                actual: edges.len(),
            });
        }

        let graph = crate::graph::UndirectedGraph::new(vertex_count, &edges)?;
        ProblemInstance::new(graph, capacity, weights, values)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> InstanceError {
    InstanceError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T, InstanceError> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid number {token:?}")))
}

fn parse_row(line: usize, text: &str) -> Result<Vec<f64>, InstanceError> {
    text.split_whitespace()
        .map(|token| parse_token(line, token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH4: &str = "4 3 2\n1 1 1 1\n5 3 4 2\n0 1\n1 2\n2 3\n";

    #[test]
    fn test_parse_path() {
        let instance: ProblemInstance = PATH4.parse().unwrap();
        assert_eq!(instance.vertex_count(), 4);
        assert_eq!(instance.graph().edge_count(), 3);
        assert_eq!(instance.capacity(), 2.0);
        assert_eq!(instance.values(), &[5.0, 3.0, 4.0, 2.0]);
        assert_eq!(instance.graph().neighbors(1), &[0, 2]);
    }

    #[test]
    fn test_parse_fractional_and_blank_lines() {
        let text = "\n3 1 10.5\n\n2.5 3 1\n1.5 0.5 7\n\n0 2\n";
        let instance: ProblemInstance = text.parse().unwrap();
        assert_eq!(instance.weight(0), 2.5);
        assert_eq!(instance.value(2), 7.0);
        assert_eq!(instance.graph().neighbors(2), &[0]);
    }

    #[test]
    fn test_parse_empty_graph() {
        let instance: ProblemInstance = "0 0 5".parse().unwrap();
        assert_eq!(instance.vertex_count(), 0);
    }

    #[test]
    fn test_parse_errors() {
        let err = "".parse::<ProblemInstance>().unwrap_err();
        assert!(matches!(err, InstanceError::Parse { line: 1, .. }));

        let err = "2 1 x\n1 1\n1 1\n0 1".parse::<ProblemInstance>().unwrap_err();
        assert!(matches!(err, InstanceError::Parse { line: 1, .. }));

        let err = "2 2 1\n1 1\n1 1\n0 1".parse::<ProblemInstance>().unwrap_err();
        assert!(matches!(
            err,
            InstanceError::EdgeCountMismatch {
                expected: 2,
                actual: 1
            }
        ));

        let err = "2 1 1\n1 1\n1 1\n0 1 1".parse::<ProblemInstance>().unwrap_err();
        assert!(matches!(err, InstanceError::Parse { line: 4, .. }));

        let err = "2 0 1\n1 1 1\n1 1".parse::<ProblemInstance>().unwrap_err();
        assert!(matches!(err, InstanceError::WeightCountMismatch { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProblemInstance::load("/nonexistent/instance.txt").unwrap_err();
        assert!(matches!(err, InstanceError::Io(_)));
    }
}
