//! Logging support.
//!
//! When the `tracing` feature is enabled this module re-exports the
//! `tracing` macros used throughout the crate and offers one-shot
//! subscriber installers (test writer or stderr).  When it is disabled, the
//! same names resolve to no-op macros so call sites compile unchanged.

#[cfg(feature = "tracing")]
mod enabled {
    use std::sync::Once;

    pub use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt::MakeWriter;

    static INIT: Once = Once::new();

    /// Builds the crate's `fmt` subscriber writing through `writer`.
    pub fn fmt_subscriber<W>(level: LevelFilter, writer: W) -> impl tracing::Subscriber + Send + Sync
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(writer)
            .finish()
    }

    /// Installs a `fmt` subscriber at `DEBUG` level, writing through the
    /// test harness so output is captured per test.  Later calls do nothing.
    pub fn init_tracing() {
        init_tracing_with_level(LevelFilter::DEBUG);
    }

    /// Like [`init_tracing`], but with an explicit maximum level.  Only the
    /// first installer called in a process has any effect.
    pub fn init_tracing_with_level(level: LevelFilter) {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .with_test_writer()
                .try_init();
        });
    }

    /// Installs a subscriber that writes to stderr, for binaries whose
    /// stdout carries their real output.
    pub fn init_stderr_tracing(level: LevelFilter) {
        INIT.call_once(|| {
            let _ = tracing::subscriber::set_global_default(fmt_subscriber(level, std::io::stderr));
        });
    }

    // Re-export tracing macros for convenience
    pub use tracing::{debug, info_span, trace};

    #[cfg(test)]
    mod tests {
        use std::{
            io,
            sync::{Arc, Mutex},
        };

        use super::*;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn test_fmt_subscriber_writes_to_given_writer() {
            let captured = Captured::default();
            let writer = captured.clone();
            let subscriber = fmt_subscriber(LevelFilter::DEBUG, move || writer.clone());
            tracing::subscriber::with_default(subscriber, || {
                debug!(node = 7, "add node");
                trace!("too verbose");
            });
            let text = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
            assert!(text.contains("add node"));
            assert!(!text.contains("too verbose"));
        }
    }
}

#[cfg(not(feature = "tracing"))]
mod disabled {
    /// Maximum verbosity accepted by [`init_tracing_with_level`].  Mirrors
    /// the names of `tracing`'s level filter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum LevelFilter {
        OFF,
        ERROR,
        WARN,
        INFO,
        DEBUG,
        TRACE,
    }

    pub fn init_tracing() {
        // No-op when tracing is disabled
    }

    pub fn init_tracing_with_level(_level: LevelFilter) {
        // No-op when tracing is disabled
    }

    pub fn init_stderr_tracing(_level: LevelFilter) {
        // No-op when tracing is disabled
    }

    macro_rules! noop_event {
        ($($arg:tt)*) => {{}};
    }

    macro_rules! noop_span {
        ($($arg:tt)*) => {{ $crate::tracing_support::NoOpSpan }};
    }

    pub(crate) use noop_event as debug;
    pub(crate) use noop_event as trace;
    pub(crate) use noop_span as info_span;

    pub struct NoOpSpan;

    impl NoOpSpan {
        pub fn entered(self) -> NoOpSpanGuard {
            NoOpSpanGuard
        }
    }

    pub struct NoOpSpanGuard;
}

// Re-export the appropriate implementation
#[cfg(feature = "tracing")]
pub use enabled::*;

#[cfg(not(feature = "tracing"))]
pub use disabled::*;
