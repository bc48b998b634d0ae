// crates/large-code-gen/src/lib.rs
// ============================================================================
// Module: Large Code Fixture Generator
// Description: Deterministic generator for large C code fixtures.
// Purpose: Render N unary functions, an aggregator, and a closed-form reference.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! This crate renders a synthetic C translation unit used to stress loaders
//! and boot sequences with a large body of compiled code. The artifact holds
//! `N` functions `funcI(x) = x + I`, an aggregator `use_all` that threads a
//! running sum through every function in index order, and a reference
//! function `expected_output` computing `x + N*(N+1)/2` directly.
//!
//! ### Design Notes
//! - Output is deterministic: the same count always renders the same bytes.
//! - Ordering is fixed: all definitions, then `use_all`, then `expected_output`.
//! - Generated arithmetic is C `unsigned`. [`FixtureGenerator::use_all`] and
//!   [`FixtureGenerator::expected_output`] evaluate the artifact with the same
//!   32-bit wrapping semantics so harness results can be predicted on the host.
//!
//! ## Index
//! - Public API: [`FixtureGenerator`], [`FunctionCount`], [`FixtureGenError`]
//! - Limits: [`MAX_FIXTURE_BYTES`], [`MAX_EXACT_REFERENCE_COUNT`]
//! - Rendering and evaluation helpers: [`function_name`], [`apply_function`]

use std::fmt;
use std::fmt::Write;
use std::fs;
use std::io::Read;
use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

// ============================================================================
// SECTION: Public API
// ============================================================================

// ============================================================================
// CONSTANTS: Naming, limits, and harness defaults
// ============================================================================

/// Prefix shared by every per-index function name.
pub const FUNCTION_PREFIX: &str = "func";

/// Name of the generated aggregator function.
pub const AGGREGATOR_NAME: &str = "use_all";

/// Name of the generated closed-form reference function.
pub const REFERENCE_NAME: &str = "expected_output";

/// Maximum fixture size accepted by the drift check.
pub const MAX_FIXTURE_BYTES: u64 = 64 * 1024 * 1024;

/// Largest count for which `nf*(nf+1)` fits in 32-bit `unsigned`.
///
/// Above this bound the generated reference function overflows before the
/// division and no longer agrees with the aggregator.
pub const MAX_EXACT_REFERENCE_COUNT: u32 = 65_535;

/// Seed passed to both generated functions by the boot harness.
pub const DEFAULT_HARNESS_SEED: u32 = 7;

/// Errors raised by the fixture generator.
///
/// # Invariants
/// - Variant meanings are stable for automation and tests.
/// - Zero, negative, and non-numeric counts all map to
///   [`FixtureGenError::InvalidCount`].
///
/// # Examples
/// ```
/// use large_code_gen::FixtureGenError;
/// use large_code_gen::FunctionCount;
///
/// let err = FunctionCount::parse("abc").err();
/// assert!(matches!(err, Some(FixtureGenError::InvalidCount { value }) if value == "abc"));
/// ```
#[derive(Debug, Error)]
pub enum FixtureGenError {
    /// No function count argument was supplied.
    #[error("missing function count argument")]
    Usage,
    /// The function count is not a positive integer.
    #[error("parameter must be an integer: {value}")]
    InvalidCount {
        /// Raw argument as supplied by the caller.
        value: String,
    },
    /// IO error while reading a fixture.
    #[error("io error: {0}")]
    Io(String),
    /// Fixture file exceeds the accepted size.
    #[error("fixture {path} exceeds {limit} bytes")]
    FixtureTooLarge {
        /// Fixture path as displayed to the user.
        path: String,
        /// Size limit that was exceeded.
        limit: u64,
    },
    /// Fixture contents differ from the rendered artifact.
    #[error("fixture drift detected for {path}")]
    Drift {
        /// Fixture path as displayed to the user.
        path: String,
    },
}

// ============================================================================
// SECTION: Function Count
// ============================================================================

/// Number of per-index functions to generate.
///
/// # Invariants
/// - Always at least 1.
///
/// # Examples
/// ```
/// use large_code_gen::FunctionCount;
///
/// let count: FunctionCount = "200".parse()?;
/// assert_eq!(count.get(), 200);
/// assert!(FunctionCount::new(0).is_none());
/// # Ok::<(), large_code_gen::FixtureGenError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionCount(NonZeroU32);

impl FunctionCount {
    /// Returns a count, or `None` when `value` is zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Parses a count from a command-line argument.
    ///
    /// Parsing is strict: surrounding whitespace, trailing garbage, signs
    /// other than `+`, and values outside `u32` are rejected.
    ///
    /// # Errors
    /// Returns [`FixtureGenError::InvalidCount`] when the value is not a
    /// positive integer.
    pub fn parse(value: &str) -> Result<Self, FixtureGenError> {
        value.parse::<u32>().ok().and_then(Self::new).ok_or_else(|| {
            FixtureGenError::InvalidCount {
                value: value.to_string(),
            }
        })
    }

    /// Returns the count as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl FromStr for FunctionCount {
    type Err = FixtureGenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for FunctionCount {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Fixture generator bound to a validated function count.
///
/// # Invariants
/// - Rendering is deterministic for a fixed count.
/// - Definitions appear in ascending index order, followed by the aggregator
///   and then the reference function.
///
/// # Examples
/// ```
/// use large_code_gen::FixtureGenerator;
///
/// let generator = FixtureGenerator::from_args(["3"])?;
/// let artifact = generator.render();
/// assert!(artifact.starts_with("unsigned func1(unsigned x) {"));
/// assert_eq!(generator.use_all(0), generator.expected_output(0));
/// # Ok::<(), large_code_gen::FixtureGenError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureGenerator {
    /// Number of per-index functions to render.
    count: FunctionCount,
}

impl FixtureGenerator {
    /// Creates a generator for `count` functions.
    #[must_use]
    pub const fn new(count: FunctionCount) -> Self {
        Self {
            count,
        }
    }

    /// Validates command-line arguments and builds a generator.
    ///
    /// `args` excludes the program name. Only the first argument is read;
    /// anything after it is ignored.
    ///
    /// # Errors
    /// Returns [`FixtureGenError::Usage`] when no argument is supplied and
    /// [`FixtureGenError::InvalidCount`] when the first argument is not a
    /// positive integer.
    pub fn from_args<I, S>(args: I) -> Result<Self, FixtureGenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(first) = args.into_iter().next() else {
            return Err(FixtureGenError::Usage);
        };
        let count = FunctionCount::parse(first.as_ref())?;
        Ok(Self::new(count))
    }

    /// Returns the configured function count.
    #[must_use]
    pub const fn count(&self) -> FunctionCount {
        self.count
    }

    /// Renders the complete C artifact.
    #[must_use]
    pub fn render(&self) -> String {
        render_fixture(self.count)
    }

    /// Evaluates the generated `use_all` on `x` with C `unsigned` semantics.
    #[must_use]
    pub fn use_all(&self, x: u32) -> u32 {
        (1 ..= self.count.get()).fold(x, |sum, index| apply_function(index, sum))
    }

    /// Evaluates the generated `expected_output` on `x` with C `unsigned`
    /// semantics, including overflow of `nf*(nf+1)` before the division.
    #[must_use]
    pub const fn expected_output(&self, x: u32) -> u32 {
        let nf = self.count.get();
        (nf.wrapping_mul(nf.wrapping_add(1)) / 2).wrapping_add(x)
    }

    /// Returns true when the generated reference function agrees with the
    /// aggregator for every input.
    #[must_use]
    pub const fn reference_is_exact(&self) -> bool {
        self.count.get() <= MAX_EXACT_REFERENCE_COUNT
    }

    /// Compares a checked-in fixture against the rendered artifact.
    ///
    /// # Errors
    /// Returns [`FixtureGenError::Io`] when the file cannot be read,
    /// [`FixtureGenError::FixtureTooLarge`] when it exceeds
    /// [`MAX_FIXTURE_BYTES`], and [`FixtureGenError::Drift`] when the contents
    /// differ.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<(), FixtureGenError> {
        self.check_file_with_limit(path, MAX_FIXTURE_BYTES)
    }

    /// Compares a checked-in fixture against the rendered artifact, reading
    /// at most `limit` bytes.
    ///
    /// # Errors
    /// See [`FixtureGenerator::check_file`].
    pub fn check_file_with_limit(
        &self,
        path: impl AsRef<Path>,
        limit: u64,
    ) -> Result<(), FixtureGenError> {
        let path = path.as_ref();
        let bytes = read_fixture_bytes(path, limit)?;
        let rendered = self.render();
        tracing::debug!(
            path = %path.display(),
            expected_bytes = rendered.len(),
            actual_bytes = bytes.len(),
            "comparing fixture"
        );
        if bytes != rendered.as_bytes() {
            return Err(FixtureGenError::Drift {
                path: path.display().to_string(),
            });
        }
        Ok(())
    }
}

/// Returns the generated name of the function at `index`.
#[must_use]
pub fn function_name(index: u32) -> String {
    format!("{FUNCTION_PREFIX}{index}")
}

/// Evaluates the generated function at `index` on `x` (`x + index`, wrapping).
#[must_use]
pub const fn apply_function(index: u32, x: u32) -> u32 {
    x.wrapping_add(index)
}

// ============================================================================
// SECTION: Fixture Input
// ============================================================================

/// Reads a fixture with a size limit to avoid memory exhaustion.
fn read_fixture_bytes(path: &Path, limit: u64) -> Result<Vec<u8>, FixtureGenError> {
    let too_large = || FixtureGenError::FixtureTooLarge {
        path: path.display().to_string(),
        limit,
    };
    let file = fs::File::open(path).map_err(|err| FixtureGenError::Io(err.to_string()))?;
    let metadata = file.metadata().map_err(|err| FixtureGenError::Io(err.to_string()))?;
    if metadata.len() > limit {
        return Err(too_large());
    }
    let mut bytes = Vec::new();
    let mut limited = file.take(limit.saturating_add(1));
    limited.read_to_end(&mut bytes).map_err(|err| FixtureGenError::Io(err.to_string()))?;
    let size = u64::try_from(bytes.len()).map_err(|_| too_large())?;
    if size > limit {
        return Err(too_large());
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Approximate rendered bytes per function: definition plus call fragment.
const BYTES_PER_FUNCTION: usize = 80;

/// Approximate rendered bytes for the aggregator and reference scaffolding.
const FIXED_BYTES: usize = 192;

/// Renders the artifact in one pass.
///
/// Call fragments are collected while definitions are emitted and assembled
/// into the aggregator body once every definition is written.
fn render_fixture(count: FunctionCount) -> String {
    let total = count.get();
    let functions = usize::try_from(total).unwrap_or(usize::MAX);
    let capacity = functions.saturating_mul(BYTES_PER_FUNCTION).saturating_add(FIXED_BYTES);
    let mut out = String::with_capacity(capacity);
    let mut calls = String::new();
    for index in 1 ..= total {
        render_function(&mut out, index);
        let _ = writeln!(calls, "  sum = {FUNCTION_PREFIX}{index}(sum);");
    }
    render_aggregator(&mut out, &calls);
    render_reference(&mut out, count);
    tracing::debug!(count = total, bytes = out.len(), "rendered fixture");
    out
}

/// Renders `funcI(x) = x + I`.
fn render_function(out: &mut String, index: u32) {
    let _ = writeln!(out, "unsigned {FUNCTION_PREFIX}{index}(unsigned x) {{");
    let _ = writeln!(out, "  return x + {index};");
    out.push_str("}\n");
}

/// Renders `use_all` around the recorded call fragments.
fn render_aggregator(out: &mut String, calls: &str) {
    let _ = writeln!(out, "unsigned {AGGREGATOR_NAME}(unsigned x) {{");
    out.push_str("  unsigned sum = x;\n");
    out.push_str(calls);
    out.push_str("  return sum;\n");
    out.push_str("}\n");
}

/// Renders `expected_output` with the count baked in.
fn render_reference(out: &mut String, count: FunctionCount) {
    let _ = writeln!(out, "unsigned {REFERENCE_NAME}(unsigned x) {{");
    let _ = writeln!(out, "    unsigned nf = {count};");
    out.push_str("    return (nf*(nf+1) / 2) + x;\n");
    out.push_str("}\n");
}
