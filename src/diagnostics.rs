//! Diagnostic events
//!
//! Numerical routines report intermediate quantities through a [DiagnosticSink]. Nothing is
//! reported unless the [Diagnostics] handle passed to the routine is enabled.

use log::debug;
use nalgebra::DMatrix;
use std::fmt;
use std::sync::Mutex;

/// A diagnostic event
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The volume scale computed when mapping a reference rule onto a simplex
    SimplexScale {
        /// Topological dimension of the simplex
        dim: usize,
        /// Edge vectors from the first vertex, one per row
        edge_vectors: DMatrix<f64>,
        /// The scale applied to the reference weights
        scale: f64,
    },
    /// A Gauss-Jacobi point converged
    NewtonConverged {
        /// Exponent of the Jacobi weight
        exponent: f64,
        /// Number of points in the rule
        npoints: usize,
        /// Index of the root
        root: usize,
        /// Newton iterations taken
        iterations: usize,
    },
}

/// A receiver of diagnostic events
pub trait DiagnosticSink: Send + Sync {
    /// Handle an event
    fn emit(&self, event: &Diagnostic);
}

/// Sink that forwards events to the `log` crate at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, event: &Diagnostic) {
        match event {
            Diagnostic::SimplexScale {
                dim,
                edge_vectors,
                scale,
            } => debug!(
                "Simplex of dimension {dim} with edge vectors {edge_vectors} has scale {scale}"
            ),
            Diagnostic::NewtonConverged {
                exponent,
                npoints,
                root,
                iterations,
            } => debug!(
                "Gauss-Jacobi root {root} of {npoints} (a = {exponent}) converged in {iterations} iterations"
            ),
        }
    }
}

/// Sink that stores events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// The events received so far
    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, event: &Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

static LOG_SINK: LogSink = LogSink;

/// A sink together with the flag that gates it
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    enabled: bool,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> Diagnostics<'a> {
    /// Create a handle for a sink
    pub fn new(sink: &'a dyn DiagnosticSink, enabled: bool) -> Self {
        Self { enabled, sink }
    }

    /// Enabled handle that forwards to the `log` crate
    pub fn log() -> Diagnostics<'static> {
        Diagnostics {
            enabled: true,
            sink: &LOG_SINK,
        }
    }

    /// Is the handle enabled?
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the handle
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Emit an event
    ///
    /// The event is only constructed if the handle is enabled.
    pub fn emit(&self, event: impl FnOnce() -> Diagnostic) {
        if self.enabled {
            self.sink.emit(&event());
        }
    }
}

impl Default for Diagnostics<'static> {
    fn default() -> Self {
        Self {
            enabled: false,
            sink: &LOG_SINK,
        }
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
