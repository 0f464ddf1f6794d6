//! Synthetic time series for demo databases.
//!
//! Values are produced hourly across a calendar year from one of a fixed set
//! of waveforms. Noise comes from a `StdRng` seeded by the caller, so the
//! same seed always produces the same series.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Year covered by the demo data set.
pub const DEMO_YEAR: i32 = 2018;

/// Integer noise drawn uniformly from `[low, high]` and multiplied by `scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Noise {
    pub low: i32,
    pub high: i32,
    pub scale: f64,
}

impl Noise {
    const fn new(low: i32, high: i32, scale: f64) -> Self {
        Self { low, high, scale }
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        f64::from(rng.gen_range(self.low..=self.high)) * self.scale
    }
}

/// Shape of one demo series. `x` advances by one radian per sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    /// `offset + noise`
    Uniform { offset: f64, noise: Noise },
    /// `amplitude * sin(x) + noise`
    Sine { amplitude: f64, noise: Option<Noise> },
    /// `amplitude * cos(x)`
    Cosine { amplitude: f64 },
    /// `amplitude * (sin(x) + cos(x))`
    SinePlusCosine { amplitude: f64 },
}

impl Waveform {
    pub fn sample(&self, x: f64, rng: &mut StdRng) -> f64 {
        match self {
            Self::Uniform { offset, noise } => offset + noise.sample(rng),
            Self::Sine { amplitude, noise } => {
                amplitude * x.sin() + noise.map_or(0.0, |n| n.sample(rng))
            }
            Self::Cosine { amplitude } => amplitude * x.cos(),
            Self::SinePlusCosine { amplitude } => amplitude * (x.sin() + x.cos()),
        }
    }
}

/// Waveforms assigned, in order, to the first nine assigned measures.
pub const DEMO_WAVEFORMS: [Waveform; 9] = [
    Waveform::Uniform {
        offset: 0.0,
        noise: Noise::new(-5, 45, 1.0),
    },
    Waveform::Sine {
        amplitude: 100.0,
        noise: None,
    },
    Waveform::Sine {
        amplitude: 100.0,
        noise: Some(Noise::new(-5, 45, -0.5)),
    },
    Waveform::Uniform {
        offset: 0.0,
        noise: Noise::new(-10, 100, 1.0),
    },
    Waveform::Cosine { amplitude: 75.0 },
    Waveform::Sine {
        amplitude: 25.0,
        noise: Some(Noise::new(-5, 45, 25.0)),
    },
    Waveform::Uniform {
        offset: 75.0,
        noise: Noise::new(-10, 100, 0.25),
    },
    Waveform::Cosine { amplitude: 75.0 },
    Waveform::SinePlusCosine { amplitude: 25.0 },
];

/// Every whole hour of `year`, starting at January 1st 00:00.
///
/// Returns an empty iterator for years chrono cannot represent.
pub fn hourly_timestamps(year: i32) -> impl Iterator<Item = NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));

    let mut next = match (start, end) {
        (Some(s), Some(_)) => Some(s),
        _ => None,
    };

    std::iter::from_fn(move || {
        let current = next?;
        let following = current + Duration::hours(1);
        next = end.filter(|e| following < *e).map(|_| following);
        Some(current)
    })
}

/// Sample `waveform` once per timestamp.
pub fn generate_series(
    waveform: Waveform,
    timestamps: impl IntoIterator<Item = NaiveDateTime>,
    seed: u64,
) -> Vec<(NaiveDateTime, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);

    timestamps
        .into_iter()
        .enumerate()
        .map(|(i, time)| (time, waveform.sample(i as f64, &mut rng)))
        .collect()
}
