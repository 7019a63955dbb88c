//! Rhythm collaborators: note values, tempo and time signatures.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::Serialize;

use crate::error::TheoryError;
use crate::tables::{DURATION_NAMES, TEMPO_MARKINGS};

/// A note value as an exact fraction of a whole note.
///
/// Dots and tuplet divisions fold into the fraction, so a dotted quarter
/// is exactly 3/8 and a quarter triplet exactly 1/6.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Duration {
    num: u32,
    den: u32,
}

impl Duration {
    /// A duration from a fraction of a whole note.
    pub fn new(num: u32, den: u32) -> Duration {
        let den = den.max(1);
        let g = gcd(num.max(1), den);
        Duration { num: num.max(1) / g, den: den / g }
    }

    /// A duration from a note-value name ("whole", "quarter",
    /// "sixty_fourth", ...).
    pub fn from_name(name: &str) -> Result<Duration, TheoryError> {
        DURATION_NAMES
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, num, den)| Duration::new(num, den))
            .ok_or_else(|| TheoryError::UnknownDuration(name.to_string()))
    }

    pub fn whole() -> Duration {
        Duration { num: 1, den: 1 }
    }

    pub fn half() -> Duration {
        Duration { num: 1, den: 2 }
    }

    pub fn quarter() -> Duration {
        Duration { num: 1, den: 4 }
    }

    pub fn eighth() -> Duration {
        Duration { num: 1, den: 8 }
    }

    /// The reduced fraction of a whole note.
    pub fn fraction(&self) -> (u32, u32) {
        (self.num, self.den)
    }

    /// Length in quarter-note beats.
    pub fn beats(&self) -> f64 {
        4.0 * f64::from(self.num) / f64::from(self.den)
    }

    /// Length in seconds at a tempo.
    pub fn seconds(&self, tempo: &Tempo) -> f64 {
        self.beats() * tempo.seconds_per_beat()
    }

    /// The note-value name for an exact table fraction, if any. Dotted
    /// and tuplet values have no single name.
    pub fn name(&self) -> Option<&'static str> {
        DURATION_NAMES
            .iter()
            .find(|&&(_, num, den)| Duration::new(num, den) == *self)
            .map(|(n, _, _)| *n)
    }

    /// A single-dotted copy (1.5x).
    pub fn dotted(&self) -> Duration {
        self.with_dots(1)
    }

    /// A copy lengthened by the given number of dots: each dot adds half
    /// of the previous addition.
    pub fn with_dots(&self, dots: u8) -> Duration {
        let dots = u32::from(dots.min(8));
        Duration::new(self.num * ((1 << (dots + 1)) - 1), self.den * (1 << dots))
    }

    /// A copy shortened into a tuplet division: `actual` notes in the
    /// time of the conventional count (3 in the time of 2, 5 through 7
    /// in the time of 4).
    pub fn tuplet(&self, actual: u32) -> Duration {
        let actual = actual.max(2);
        let normal = if actual <= 4 { actual - 1 } else { 4 };
        Duration::new(self.num * normal, self.den * actual)
    }

    /// A triplet copy (3 in the time of 2).
    pub fn triplet(&self) -> Duration {
        self.tuplet(3)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Duration) -> bool {
        u64::from(self.num) * u64::from(other.den) == u64::from(other.num) * u64::from(self.den)
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Duration) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Duration) -> Ordering {
        let lhs = u64::from(self.num) * u64::from(other.den);
        let rhs = u64::from(other.num) * u64::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::new(self.num * other.den + other.num * self.den, self.den * other.den)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}/{}", self.num, self.den),
        }
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// A tempo in beats per minute, with conventional Italian markings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tempo {
    bpm: u16,
}

impl Tempo {
    pub fn new(bpm: u16) -> Tempo {
        Tempo { bpm }
    }

    /// The typical tempo for a marking name, case-insensitively.
    pub fn from_marking(name: &str) -> Result<Tempo, TheoryError> {
        TEMPO_MARKINGS
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .map(|m| Tempo { bpm: m.typical })
            .ok_or_else(|| TheoryError::UnknownTempoMarking(name.to_string()))
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    /// The first conventional marking whose range contains this tempo,
    /// or an empty string outside every range.
    pub fn marking(&self) -> &'static str {
        TEMPO_MARKINGS
            .iter()
            .find(|m| (m.low..=m.high).contains(&self.bpm))
            .map(|m| m.name)
            .unwrap_or("")
    }

    pub fn ms_per_beat(&self) -> f64 {
        60_000.0 / f64::from(self.bpm)
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / f64::from(self.bpm)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM", self.bpm)
    }
}

/// A time signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl TimeSignature {
    pub fn new(numerator: u8, denominator: u8) -> TimeSignature {
        TimeSignature { numerator: numerator.max(1), denominator: denominator.max(1) }
    }

    /// Compound meters group beats in threes: 6/8, 9/8, 12/8.
    pub fn is_compound(&self) -> bool {
        self.numerator >= 6 && self.numerator % 3 == 0
    }

    /// "simple" or "compound".
    pub fn classification(&self) -> &'static str {
        if self.is_compound() {
            "compound"
        } else {
            "simple"
        }
    }

    /// Length of one bar in quarter-note beats.
    pub fn bar_beats(&self) -> f64 {
        f64::from(self.numerator) * 4.0 / f64::from(self.denominator)
    }

    /// Conventional name: "common time" for 4/4, "cut time" for 2/2,
    /// otherwise the plain fraction.
    pub fn name(&self) -> String {
        match (self.numerator, self.denominator) {
            (4, 4) => "common time".to_string(),
            (2, 2) => "cut time".to_string(),
            (n, d) => format!("{n}/{d}"),
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
