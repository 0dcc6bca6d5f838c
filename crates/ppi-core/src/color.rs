#![forbid(unsafe_code)]

//! Discrete color scale for heatmap values.
//!
//! Maps a numeric value plus an inclusive `[min, max]` domain onto exactly
//! one entry of an ordered palette. The mapping is total for finite inputs
//! and monotonically non-decreasing in the value: a higher value never maps
//! to an earlier palette index.

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Default five-stop green-to-red ramp, mirroring the dashboard's
/// reversed red-yellow-green continuous scale: low values read as cheap
/// (green), high values as expensive (red).
pub const DEFAULT_PALETTE: [Rgb; 5] = [
    Rgb(0x2e, 0x7d, 0x32),
    Rgb(0x9e, 0x9d, 0x24),
    Rgb(0xf9, 0xa8, 0x25),
    Rgb(0xef, 0x6c, 0x00),
    Rgb(0xc6, 0x28, 0x28),
];

/// An ordered palette with value-to-bucket mapping.
///
/// # Preconditions
///
/// Callers supply finite `value`, `min`, and `max`. Non-finite inputs do
/// not panic: infinities clamp to the extreme buckets and NaN falls back
/// to bucket 0, but neither is a supported input.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    stops: Vec<Rgb>,
}

impl ColorScale {
    /// Build a scale over the given ordered stops.
    ///
    /// An empty stop list degrades to the default palette rather than
    /// producing a scale that cannot answer lookups.
    pub fn new(stops: Vec<Rgb>) -> Self {
        if stops.is_empty() {
            return Self::default();
        }
        Self { stops }
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true: construction guarantees at least one stop.
        self.stops.is_empty()
    }

    /// Map a value in `[min, max]` to a palette index.
    ///
    /// A degenerate domain (`min == max`, or an inverted one) yields the
    /// middle entry, giving a neutral color when all observations are
    /// identical. Out-of-domain values clamp to the extreme entries.
    pub fn bucket(&self, value: f64, min: f64, max: f64) -> usize {
        let n = self.stops.len();
        if !(min < max) {
            return n / 2;
        }
        let t = (value - min) / (max - min);
        let raw = (t * n as f64).floor();
        if raw.is_nan() {
            return 0;
        }
        // Clamp via comparison rather than casting first: a huge t must
        // not wrap through the usize conversion.
        if raw <= 0.0 {
            0
        } else if raw >= (n - 1) as f64 {
            n - 1
        } else {
            raw as usize
        }
    }

    /// The palette entry for a value, see [`bucket`](Self::bucket).
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Rgb {
        self.stops[self.bucket(value, min, max)]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            stops: DEFAULT_PALETTE.to_vec(),
        }
    }
}
