//! Stage spans and counters for the merge-tree builder.
//!
//! `build_merge_tree` opens a `merge_tree` span (rows, cols, parallel) with
//! child spans `steepest_ascent`, `flatten`, `detect_saddles` and `merge`;
//! `compute_basins` opens `basins` around the first two. Counters are
//! reported as `flatten_sweeps`, `saddle_candidates`, `merge_events` and
//! `diagram_pairs` events.
//!
//! Without the `tracing` feature both macros expand to code that only
//! evaluates the field expressions.

#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info_span!($name $(, $key = $value)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {{
        $(let _ = &$value;)*
        $crate::trace::StageGuard
    }};
}

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr $(, $key:ident = $value:expr)+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr $(, $key:ident = $value:expr)+ $(,)?) => {
        $(let _ = &$value;)*
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stage guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub struct StageGuard;

#[cfg(not(feature = "tracing"))]
impl StageGuard {
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
