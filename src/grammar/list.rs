//! List-benchmark case names:
//! `<prefix>_<Workload><<Variant>[<Elem>]>/<threads>/<size>`.

use super::{parse_count, CaseKey, ProblemSize, Workload};
use crate::error::DecodeError;

/// Prefix used when re-encoding names.
pub const DEFAULT_PREFIX: &str = "BM";

/// Element type the list benchmarks instantiate each variant with.
pub const ELEMENT_TYPE: &str = "int";

pub fn decode(name: &str) -> Result<CaseKey, DecodeError> {
    let segments: Vec<&str> = name.split('/').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount {
            name: name.to_string(),
            expected: "3",
            found: segments.len(),
        });
    }

    let head = segments[0];
    let open = head.find('<').ok_or_else(|| DecodeError::MissingTemplate {
        name: name.to_string(),
    })?;

    // Workload tags never contain '_', so the prefix may.
    let tag = match head[..open].rsplit_once('_') {
        Some((prefix, tag)) if !prefix.is_empty() => tag,
        _ => {
            return Err(DecodeError::MissingPrefix {
                name: name.to_string(),
            })
        }
    };

    let workload = Workload::from_tag(tag).ok_or_else(|| DecodeError::UnknownWorkload {
        name: name.to_string(),
        tag: tag.to_string(),
    })?;

    let close = matching_close(head, open).ok_or_else(|| DecodeError::MissingTemplate {
        name: name.to_string(),
    })?;

    // The variant is the list type itself, without its template arguments.
    let inner = &head[open + 1..close];
    let variant = inner.find(|c: char| c == '<' || c == '>').map_or(inner, |end| &inner[..end]);
    if variant.is_empty() {
        return Err(DecodeError::MissingTemplate {
            name: name.to_string(),
        });
    }

    let trailing = &head[close + 1..];
    if !trailing.is_empty() {
        return Err(DecodeError::TrailingText {
            name: name.to_string(),
            trailing: trailing.to_string(),
        });
    }

    let thread_count = parse_count(name, "thread count", segments[1])?;
    let size = parse_count(name, "problem size", segments[2])?;

    Ok(CaseKey {
        variant: variant.to_string(),
        workload: Some(workload),
        thread_count,
        problem_size: ProblemSize::Elements(size),
    })
}

/// Build the case name the list benchmarks emit for a configuration.
pub fn encode(workload: Workload, variant: &str, thread_count: u64, size: u64) -> String {
    format!(
        "{}_{}<{}<{}>>/{}/{}",
        DEFAULT_PREFIX,
        workload.tag(),
        variant,
        ELEMENT_TYPE,
        thread_count,
        size
    )
}

/// Byte index of the `>` closing the `<` at `open`, honouring nesting.
fn matching_close(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, b) in s.bytes().enumerate().skip(open) {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_basic() {
        let key = decode("BM_ReadHeavyWorkload<LockFreeList>/8/1000").unwrap();
        assert_eq!(key.variant, "LockFreeList");
        assert_eq!(key.workload, Some(Workload::ReadHeavy));
        assert_eq!(key.thread_count, 8);
        assert_eq!(key.problem_size, ProblemSize::Elements(1000));
    }

    #[test]
    fn test_decode_prefix_with_underscores() {
        let key = decode("BM_List_BalancedWorkload<LazyList>/1/100").unwrap();
        assert_eq!(key.workload, Some(Workload::Balanced));
        assert_eq!(key.variant, "LazyList");
    }

    #[test]
    fn test_decode_nested_variant() {
        let key = decode("BM_WriteHeavyWorkload<FineList<int>>/2/10000").unwrap();
        assert_eq!(key.variant, "FineList");
        assert_eq!(key.workload, Some(Workload::WriteHeavy));
        assert_eq!(key.thread_count, 2);
        assert_eq!(key.problem_size, ProblemSize::Elements(10_000));
    }

    #[test]
    fn test_templated_and_bare_variants_agree() {
        let templated = decode("BM_ReadHeavyWorkload<CoarseList<int>>/4/1000").unwrap();
        let bare = decode("BM_ReadHeavyWorkload<CoarseList>/4/1000").unwrap();
        assert_eq!(templated.variant, "CoarseList");
        assert_eq!(templated, bare);
    }

    #[test]
    fn test_encode_matches_runner_names() {
        assert_eq!(
            encode(Workload::Balanced, "LazyList", 16, 100),
            "BM_BalancedWorkload<LazyList<int>>/16/100"
        );
    }

    #[test]
    fn test_segment_count_errors() {
        let err = decode("BM_ReadHeavyWorkload<LockFreeList>/8").unwrap_err();
        assert_eq!(
            err,
            DecodeError::SegmentCount {
                name: "BM_ReadHeavyWorkload<LockFreeList>/8".to_string(),
                expected: "3",
                found: 2,
            }
        );
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList>/8/1000/real_time"),
            Err(DecodeError::SegmentCount { found: 4, .. })
        ));
    }

    #[test]
    fn test_unknown_workload() {
        assert!(matches!(
            decode("BM_readHeavyWorkload<LockFreeList>/8/1000"),
            Err(DecodeError::UnknownWorkload { tag, .. }) if tag == "readHeavyWorkload"
        ));
        assert!(matches!(
            decode("BM_MixedWorkload<LockFreeList>/8/1000"),
            Err(DecodeError::UnknownWorkload { .. })
        ));
    }

    #[test]
    fn test_malformed_heads() {
        assert!(matches!(
            decode("ReadHeavyWorkload<LockFreeList>/8/1000"),
            Err(DecodeError::MissingPrefix { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload/8/1000"),
            Err(DecodeError::MissingTemplate { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList/8/1000"),
            Err(DecodeError::MissingTemplate { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<>/8/1000"),
            Err(DecodeError::MissingTemplate { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<<int>>/8/1000"),
            Err(DecodeError::MissingTemplate { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList>x/8/1000"),
            Err(DecodeError::TrailingText { .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList<int>>x/8/1000"),
            Err(DecodeError::TrailingText { .. })
        ));
    }

    #[test]
    fn test_invalid_counts() {
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList>/eight/1000"),
            Err(DecodeError::InvalidInteger { field: "thread count", .. })
        ));
        assert!(matches!(
            decode("BM_ReadHeavyWorkload<LockFreeList>/8/0"),
            Err(DecodeError::InvalidInteger { field: "problem size", .. })
        ));
    }

    fn variant_strategy() -> impl Strategy<Value = String> {
        "[A-Z][A-Za-z0-9]{0,20}"
    }

    fn workload_strategy() -> impl Strategy<Value = Workload> {
        prop::sample::select(Workload::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_encode_decode_recovers_dimensions(
            workload in workload_strategy(),
            variant in variant_strategy(),
            threads in 1u64..1024,
            size in 1u64..10_000_000,
        ) {
            let name = encode(workload, &variant, threads, size);
            let key = decode(&name).unwrap();
            prop_assert_eq!(key.workload, Some(workload));
            prop_assert_eq!(key.variant, variant);
            prop_assert_eq!(key.thread_count, threads);
            prop_assert_eq!(key.problem_size, ProblemSize::Elements(size));
        }

        #[test]
        fn prop_decode_never_panics(name in ".{0,64}") {
            let _ = decode(&name);
        }
    }
}
