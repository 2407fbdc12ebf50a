//! Bounded slider controls that assemble a [`FeatureRecord`].

use crate::features::FeatureRecord;

/// Which record field a slider drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Irradiation,
    ModuleTemperature,
    AmbientTemperature,
    Hour,
    Minute,
    Month,
    DayOfYear,
}

impl Field {
    /// Rust-side field name, as used in config and `--set`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Irradiation => "irradiation",
            Self::ModuleTemperature => "module_temperature",
            Self::AmbientTemperature => "ambient_temperature",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Month => "month",
            Self::DayOfYear => "day_of_year",
        }
    }

    /// Looks up a field by Rust name or schema name, ignoring case.
    pub fn from_key(key: &str) -> Option<Self> {
        SLIDERS
            .iter()
            .map(|s| s.field)
            .find(|f| f.key().eq_ignore_ascii_case(key))
    }

    /// Reads this field from a record as `f64`.
    pub fn get(self, r: &FeatureRecord) -> f64 {
        match self {
            Self::Irradiation => r.irradiation,
            Self::ModuleTemperature => r.module_temperature,
            Self::AmbientTemperature => r.ambient_temperature,
            Self::Hour => f64::from(r.hour),
            Self::Minute => f64::from(r.minute),
            Self::Month => f64::from(r.month),
            Self::DayOfYear => f64::from(r.day_of_year),
        }
    }

    /// Writes a slider value into a record. Integer fields expect whole values.
    fn set(self, r: &mut FeatureRecord, value: f64) {
        // slider values for integer fields are whole and non-negative
        let as_u32 = value.round().max(0.0) as u32;
        match self {
            Self::Irradiation => r.irradiation = value,
            Self::ModuleTemperature => r.module_temperature = value,
            Self::AmbientTemperature => r.ambient_temperature = value,
            Self::Hour => r.hour = as_u32,
            Self::Minute => r.minute = as_u32,
            Self::Month => r.month = as_u32,
            Self::DayOfYear => r.day_of_year = as_u32,
        }
    }
}

/// Static description of one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub field: Field,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
    /// Decimal places shown and used to snap values onto the step grid.
    pub decimals: u32,
}

impl SliderSpec {
    /// Number of steps between `min` and `max`.
    pub fn max_ticks(&self) -> u32 {
        ((self.max - self.min) / self.step).round() as u32
    }

    /// Tick nearest to `value`, clamped to the slider range.
    pub fn ticks_for(&self, value: f64) -> u32 {
        if !value.is_finite() {
            return self.ticks_for(self.default);
        }
        let t = ((value - self.min) / self.step).round();
        (t.max(0.0) as u32).min(self.max_ticks())
    }

    /// Value at a tick, rounded to `decimals`.
    pub fn value_at(&self, ticks: u32) -> f64 {
        let raw = self.min + f64::from(ticks.min(self.max_ticks())) * self.step;
        let p = 10f64.powi(self.decimals as i32);
        (raw * p).round() / p
    }

    /// Returns `true` if `value` lies inside the slider range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Formats a value with this slider's precision.
    pub fn format(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals as usize)
    }
}

/// Slider table in display order.
pub static SLIDERS: [SliderSpec; 7] = [
    SliderSpec {
        field: Field::Irradiation,
        label: "Irradiation (Sunlight Level)",
        min: 0.0,
        max: 1.2,
        default: 0.5,
        step: 0.01,
        decimals: 2,
    },
    SliderSpec {
        field: Field::ModuleTemperature,
        label: "Module Temperature (°C)",
        min: 15.0,
        max: 75.0,
        default: 45.0,
        step: 0.01,
        decimals: 2,
    },
    SliderSpec {
        field: Field::AmbientTemperature,
        label: "Ambient Temperature (°C)",
        min: 10.0,
        max: 50.0,
        default: 30.0,
        step: 0.01,
        decimals: 2,
    },
    SliderSpec {
        field: Field::Hour,
        label: "Hour of Day (24-hour format)",
        min: 0.0,
        max: 23.0,
        default: 12.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        field: Field::Minute,
        label: "Minute of Hour",
        min: 0.0,
        max: 45.0,
        default: 30.0,
        step: 15.0,
        decimals: 0,
    },
    SliderSpec {
        field: Field::Month,
        label: "Month",
        min: 1.0,
        max: 12.0,
        default: 6.0,
        step: 1.0,
        decimals: 0,
    },
    SliderSpec {
        field: Field::DayOfYear,
        label: "Day of Year",
        min: 1.0,
        max: 365.0,
        default: 150.0,
        step: 1.0,
        decimals: 0,
    },
];

/// Returns the slider definition for a field.
pub fn spec_for(field: Field) -> &'static SliderSpec {
    // SLIDERS holds every Field variant exactly once
    match field {
        Field::Irradiation => &SLIDERS[0],
        Field::ModuleTemperature => &SLIDERS[1],
        Field::AmbientTemperature => &SLIDERS[2],
        Field::Hour => &SLIDERS[3],
        Field::Minute => &SLIDERS[4],
        Field::Month => &SLIDERS[5],
        Field::DayOfYear => &SLIDERS[6],
    }
}

/// One slider: its definition plus a position on its step grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub spec: &'static SliderSpec,
    ticks: u32,
    home: u32,
}

impl Slider {
    fn new(spec: &'static SliderSpec, start: f64) -> Self {
        let home = spec.ticks_for(start);
        Self {
            spec,
            ticks: home,
            home,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.spec.value_at(self.ticks)
    }

    /// Position in `[0, 1]` across the range.
    pub fn ratio(&self) -> f64 {
        let max = self.spec.max_ticks();
        if max == 0 {
            0.0
        } else {
            f64::from(self.ticks) / f64::from(max)
        }
    }

    /// Moves by `n` steps, stopping at the bounds.
    pub fn step_by(&mut self, n: i32) {
        let t = i64::from(self.ticks) + i64::from(n);
        self.ticks = t.clamp(0, i64::from(self.spec.max_ticks())) as u32;
    }

    pub fn to_min(&mut self) {
        self.ticks = 0;
    }

    pub fn to_max(&mut self) {
        self.ticks = self.spec.max_ticks();
    }

    /// Returns to the starting position.
    pub fn reset(&mut self) {
        self.ticks = self.home;
    }

    /// Snaps `value` to the nearest step inside the range.
    pub fn set_value(&mut self, value: f64) {
        self.ticks = self.spec.ticks_for(value);
    }
}

/// The seven input controls and a selection cursor.
#[derive(Debug, Clone)]
pub struct InputPanel {
    sliders: Vec<Slider>,
    selected: usize,
}

impl InputPanel {
    /// All sliders at their documented defaults.
    pub fn new() -> Self {
        Self::with_defaults(&FeatureRecord::defaults())
    }

    /// All sliders starting from `start`, snapped and clamped per slider.
    pub fn with_defaults(start: &FeatureRecord) -> Self {
        let sliders = SLIDERS
            .iter()
            .map(|spec| Slider::new(spec, spec.field.get(start)))
            .collect();
        Self {
            sliders,
            selected: 0,
        }
    }

    /// Builds the record for the current positions.
    pub fn record(&self) -> FeatureRecord {
        let mut r = FeatureRecord::defaults();
        for s in &self.sliders {
            s.spec.field.set(&mut r, s.value());
        }
        r
    }

    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Index of the selected slider.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slider_mut(&mut self) -> &mut Slider {
        &mut self.sliders[self.selected]
    }

    /// Moves the cursor down, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.sliders.len();
    }

    /// Moves the cursor up, wrapping.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.sliders.len() - 1) % self.sliders.len();
    }

    /// Mutable access to the slider for `field`.
    pub fn slider_mut(&mut self, field: Field) -> Option<&mut Slider> {
        self.sliders.iter_mut().find(|s| s.spec.field == field)
    }

    /// Resets every slider to its starting position.
    pub fn reset_all(&mut self) {
        for s in &mut self.sliders {
            s.reset();
        }
    }

    /// Moves every slider to its minimum.
    pub fn all_to_min(&mut self) {
        for s in &mut self.sliders {
            s.to_min();
        }
    }

    /// Moves every slider to its maximum.
    pub fn all_to_max(&mut self) {
        for s in &mut self.sliders {
            s.to_max();
        }
    }
}

impl Default for InputPanel {
    fn default() -> Self {
        Self::new()
    }
}
