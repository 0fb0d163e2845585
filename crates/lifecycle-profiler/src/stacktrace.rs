//! Call-site stack capture for profiling entries.
//!
//! Capture goes through [`std::backtrace::Backtrace::capture`], so it follows
//! `RUST_BACKTRACE` / `RUST_LIB_BACKTRACE`. When capturing is disabled the
//! entry carries no stacktrace.

use std::backtrace::{Backtrace, BacktraceStatus};

use crate::entry::StackFrame;

/// Symbol prefixes that belong to the capture machinery or to this crate.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::backtrace",
    "std::backtrace_rs",
    "backtrace::",
    "lifecycle_profiler::",
    "<lifecycle_profiler::",
];

/// Capture the current call stack, excluding profiler frames.
pub fn capture() -> Option<Vec<StackFrame>> {
    let backtrace = Backtrace::capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return None;
    }

    let frames = parse(&backtrace.to_string());
    Some(exclude_internal(frames))
}

/// Parse the textual form of a backtrace.
///
/// ```text
///    0: my_crate::do_work
///              at ./src/lib.rs:10:5
///    1: main
/// ```
pub(crate) fn parse(rendered: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim();

        if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some(last) = frames.last_mut() {
                last.location = Some(location.to_string());
            }
            continue;
        }

        if let Some((index, symbol)) = trimmed.split_once(": ") {
            if index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(StackFrame::new(symbol.trim()));
            }
        }
    }

    frames
}

/// Drop the leading frames that belong to the capture machinery or to the
/// profiler itself. Frames below the first caller frame are kept verbatim.
pub(crate) fn exclude_internal(frames: Vec<StackFrame>) -> Vec<StackFrame> {
    frames
        .into_iter()
        .skip_while(|frame| is_internal(&frame.function))
        .collect()
}

fn is_internal(symbol: &str) -> bool {
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| symbol.starts_with(prefix))
}
