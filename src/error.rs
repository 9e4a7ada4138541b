use thiserror::Error;

/// A case name that does not match the active grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("case name `{name}` has {found} '/'-separated segments, expected {expected}")]
    SegmentCount {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("case name `{name}` has no `<prefix>_` before the workload tag")]
    MissingPrefix { name: String },

    #[error("case name `{name}` has no balanced `<...>` template argument")]
    MissingTemplate { name: String },

    #[error("case name `{name}` has trailing text `{trailing}` after the template argument")]
    TrailingText { name: String, trailing: String },

    #[error("case name `{name}` has unknown workload `{tag}`")]
    UnknownWorkload { name: String, tag: String },

    #[error("case name `{name}` has no templated variant identifier")]
    MissingVariant { name: String },

    #[error("case name `{name}` does not end in `/real_time`")]
    MissingRealTime { name: String },

    #[error("case name `{name}` has no operation count before the thread count")]
    MissingOperationCount { name: String },

    #[error("case name `{name}` has invalid {field} `{value}`")]
    InvalidInteger {
        name: String,
        field: &'static str,
        value: String,
    },
}

/// Problems with the input table found before any decoding happens.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("input `{path}` has no `{column}` column")]
    MissingColumn { path: String, column: &'static str },

    #[error("input `{path}` row {row} has no `{column}` field")]
    ShortRow {
        path: String,
        row: usize,
        column: &'static str,
    },
}
