//! Queue-benchmark case names:
//! `BM_<Bench><<Variant>[Wrapper]<Elem>>/<operations>/<threads>/real_time`.

use super::{parse_count, CaseKey, ProblemSize};
use crate::error::DecodeError;

/// Marker appended to adapter types wrapping a queue for the benchmark.
pub const WRAPPER_SUFFIX: &str = "Wrapper";

/// Final segment the runner appends when timing by wall clock.
pub const REAL_TIME: &str = "real_time";

pub fn decode(name: &str) -> Result<CaseKey, DecodeError> {
    let segments: Vec<&str> = name.split('/').collect();
    if segments.len() < 4 {
        return Err(DecodeError::SegmentCount {
            name: name.to_string(),
            expected: "at least 4",
            found: segments.len(),
        });
    }

    if segments[segments.len() - 1] != REAL_TIME {
        return Err(DecodeError::MissingRealTime {
            name: name.to_string(),
        });
    }

    let thread_idx = segments.len() - 2;
    let thread_count = parse_count(name, "thread count", segments[thread_idx])?;

    let operations = segments[1..thread_idx]
        .iter()
        .find(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| DecodeError::MissingOperationCount {
            name: name.to_string(),
        })?;
    let operations = parse_count(name, "operation count", operations)?;

    let variant = templated_identifier(segments[0]).ok_or_else(|| DecodeError::MissingVariant {
        name: name.to_string(),
    })?;

    Ok(CaseKey {
        variant: normalize_variant(variant).to_string(),
        workload: None,
        thread_count,
        problem_size: ProblemSize::Operations(operations),
    })
}

/// Strip the wrapper marker so wrapped and bare queues aggregate together.
pub fn normalize_variant(variant: &str) -> &str {
    match variant.strip_suffix(WRAPPER_SUFFIX) {
        Some(base) if !base.is_empty() => base,
        _ => variant,
    }
}

/// The queue type in a benchmark head: the first identifier opening its own
/// template argument list (`<Ident<`). Heads without a nested template fall
/// back to the innermost `<Ident>`.
fn templated_identifier(head: &str) -> Option<&str> {
    let bytes = head.as_bytes();
    let mut innermost = None;

    for (open, _) in head.match_indices('<') {
        let start = open + 1;
        let len = bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        if len == 0 || !bytes[start].is_ascii_alphabetic() {
            continue;
        }

        let end = start + len;
        match bytes.get(end) {
            Some(b'<') => return Some(&head[start..end]),
            Some(b'>') => innermost = Some(&head[start..end]),
            _ => {}
        }
    }

    innermost
}
