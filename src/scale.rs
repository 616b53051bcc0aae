// Value-space to screen-space mapping and axis tick selection

/// Upper bound on the number of gridline divisions
pub const MAX_DIVISIONS: usize = 4;

/// Evenly spaced tick labels from 0 to `max_count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisTicks {
    pub max_count: usize,
    pub names: Vec<String>,
}

/// Pick a "nice" axis maximum for `observed_max` and label its ticks.
///
/// The maximum is rounded up to a multiple of `min(observed_max, 4)` so every
/// step is a whole number. An observed maximum of 0 yields a single "0" tick.
pub fn calculate_axis_ticks(observed_max: usize) -> AxisTicks {
    let division_count = observed_max.min(MAX_DIVISIONS);
    let mut max_count = observed_max;

    if division_count == 0 {
        return AxisTicks {
            max_count,
            names: vec!["0".to_string()],
        };
    }

    // At most division_count - 1 increments
    while max_count % division_count != 0 {
        max_count += 1;
    }

    let step = max_count / division_count;
    let names = (0..=division_count).map(|i| (i * step).to_string()).collect();

    AxisTicks { max_count, names }
}

/// Linear map of `value` from `[data_min, data_max]` onto `[screen_a, screen_b]`.
///
/// Either range may be inverted. A collapsed data range maps everything to
/// `screen_a`.
pub fn to_screen(value: f64, data_min: f64, data_max: f64, screen_a: f64, screen_b: f64) -> f64 {
    let span = data_max - data_min;
    if span == 0.0 {
        return screen_a;
    }
    let t = (value - data_min) / span;
    // Exact endpoints regardless of rounding in the interpolation
    if t == 1.0 {
        return screen_b;
    }
    screen_a + t * (screen_b - screen_a)
}

/// A fixed data domain bound to a screen range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl Scale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Scale { domain, range }
    }

    /// Categorical slots: index `i` of `n` sits at the center of its slot
    /// because the domain runs from -1 to `n`
    pub fn categorical(count: usize, range: (f64, f64)) -> Self {
        Scale::new((-1.0, count as f64), range)
    }

    /// Tick `i` of `n` evenly spaced ticks
    pub fn ticks(count: usize, range: (f64, f64)) -> Self {
        Scale::new((0.0, count.saturating_sub(1) as f64), range)
    }

    pub fn map(&self, value: f64) -> f64 {
        to_screen(value, self.domain.0, self.domain.1, self.range.0, self.range.1)
    }
}
