//! Regression test parameters and operations

use scalekit_core::{Raster, Sample};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check results (default)
    #[default]
    Compare,
    /// Check results and print the rasters under test
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "scale")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "scale")
    ///
    /// # Returns
    ///
    /// A new `RegParams` instance configured based on the `REGTEST_MODE`
    /// environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let same_nan = expected.is_nan() && actual.is_nan();
        let diff = (expected - actual).abs();

        if !same_nan && !(diff <= delta) {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two rasters sample by sample
    ///
    /// Rects and band counts must match; samples may differ by at most
    /// `delta`. NaN matches NaN.
    ///
    /// # Returns
    ///
    /// `true` if the rasters match, `false` otherwise.
    pub fn compare_rasters<T: Sample>(
        &mut self,
        expected: &Raster<T>,
        actual: &Raster<T>,
        delta: f64,
    ) -> bool {
        self.index += 1;

        if expected.rect() != actual.rect() || expected.bands() != actual.bands() {
            self.fail(format!(
                "Failure in {}_reg: raster comparison for index {} - shape mismatch\n\
                 expected {:?} x {}, actual {:?} x {}",
                self.test_name,
                self.index,
                expected.rect(),
                expected.bands(),
                actual.rect(),
                actual.bands()
            ));
            return false;
        }

        let rect = expected.rect();
        for band in 0..expected.bands() {
            for y in rect.y..rect.bottom() {
                for x in rect.x..rect.right() {
                    let (Some(e), Some(a)) = (expected.get(band, x, y), actual.get(band, x, y))
                    else {
                        continue;
                    };
                    let (e, a) = (e.to_f64(), a.to_f64());
                    let both_nan = e.is_nan() && a.is_nan();
                    if !both_nan && !((e - a).abs() <= delta) {
                        self.fail(format!(
                            "Failure in {}_reg: raster comparison for index {} - \
                             band {} sample ({}, {}): expected {}, actual {}",
                            self.test_name, self.index, band, x, y, e, a
                        ));
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Compare two byte strings
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            self.fail(format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 {:?} vs {:?}",
                self.test_name,
                self.index,
                String::from_utf8_lossy(data1),
                String::from_utf8_lossy(data2)
            ));
            false
        } else {
            true
        }
    }

    /// Print band 0 of a raster in display mode
    pub fn show<T: Sample>(&self, label: &str, raster: &Raster<T>) {
        if !self.display() {
            return;
        }
        let rect = raster.rect();
        eprintln!("{} {:?}:", label, rect);
        for y in rect.y..rect.bottom() {
            let row: Vec<String> = (rect.x..rect.right())
                .filter_map(|x| raster.get(0, x, y))
                .map(|v| format!("{:?}", v))
                .collect();
            eprintln!("  {}", row.join(" "));
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
