pub mod clock;

pub use tracing;

/// Enter a tracing span for the rest of the enclosing scope.
///
/// The guard is bound to `$guard`, so the span closes when it goes out of scope.
#[macro_export]
macro_rules! span {
    ($guard:tt, $level:ident, $label:expr, $($fields:tt)*) => {
        let span = $crate::tracing::span!($crate::tracing::Level::$level, $label, $($fields)*);
        let $guard = span.enter();
    };
    ($guard:tt, $level:ident, $label:expr) => {
        let span = $crate::tracing::span!($crate::tracing::Level::$level, $label);
        let $guard = span.enter();
    };
    ($guard:tt, $label:expr) => {
        let span = $crate::tracing::span!($crate::tracing::Level::TRACE, $label);
        let $guard = span.enter();
    };
}

/// Lightweight profiling scope. Records a `TRACE` span named after the scope
/// and keeps it open until the guard is dropped.
#[macro_export]
macro_rules! prof {
    ($guard:tt, $name:expr) => {
        let $guard = $crate::ProfSpan::enter($name);
    };
    ($name:expr) => {
        $crate::prof!(_guard, $name);
    };
}

/// Guard returned by [`prof!`]
pub struct ProfSpan(tracing::span::EnteredSpan);

impl ProfSpan {
    pub fn enter(name: &'static str) -> Self {
        Self(tracing::trace_span!("prof", scope = name).entered())
    }
}
