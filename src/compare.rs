//! Context-free comparison of two chords: note overlap, root geometry,
//! set-theory relationships, voice leading, Neo-Riemannian transformations
//! and Forte interval-class vectors.

use serde::Serialize;

use crate::chord::Chord;

/// Subset relationship between two chords' pitch-class sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubsetRelation {
    /// Neither set contains the other.
    None,
    /// Every pitch class of A is present in B.
    AInB,
    /// Every pitch class of B is present in A.
    BInA,
    /// Identical pitch-class sets.
    Equal,
}

/// Neo-Riemannian transformation connecting two triads.
///
/// Single operations: P toggles major/minor on the same root, L exchanges
/// the leading tone, R moves to the relative triad. Two-step values read
/// left to right: `Rp` is R then P. Only pure major and minor triads
/// participate; everything else compares as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NeoRiemannian {
    None,
    P,
    L,
    R,
    Rp,
    Rl,
    Lp,
    Lr,
    Pr,
    Pl,
}

impl NeoRiemannian {
    pub fn name(&self) -> &'static str {
        match self {
            NeoRiemannian::None => "",
            NeoRiemannian::P => "P",
            NeoRiemannian::L => "L",
            NeoRiemannian::R => "R",
            NeoRiemannian::Rp => "RP",
            NeoRiemannian::Rl => "RL",
            NeoRiemannian::Lp => "LP",
            NeoRiemannian::Lr => "LR",
            NeoRiemannian::Pr => "PR",
            NeoRiemannian::Pl => "PL",
        }
    }
}

/// Multidimensional comparison of two chords.
///
/// ```
/// use solfa::{Chord, ChordComparison, NeoRiemannian};
/// let cm = Chord::new("CM").unwrap();
/// let am = Chord::new("Am").unwrap();
/// let cmp = ChordComparison::compute(&cm, &am);
/// assert_eq!(cmp.common_count, 2);
/// assert_eq!(cmp.transformation, NeoRiemannian::R);
/// assert!(cmp.same_interval_vector);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ChordComparison {
    /// Pitch classes present in both chords (bit i = semitone i).
    pub common_pc: u16,
    /// Pitch classes only in chord A.
    pub exclusive_a_pc: u16,
    /// Pitch classes only in chord B.
    pub exclusive_b_pc: u16,
    /// Number of shared pitch classes.
    pub common_count: u8,

    /// Shortest arc between roots on the chromatic circle (0-6).
    pub root_distance: u8,
    /// Signed root interval B - A, normalized to -6..=6.
    pub root_direction: i8,

    /// Both chords have the same type string.
    pub same_quality: bool,
    /// Both chords have the same number of notes.
    pub same_size: bool,
    /// Semitone-from-root intervals present in both chords' structure.
    pub common_interval_mask: u16,

    /// Identical pitch-class sets.
    pub enharmonic: bool,
    pub subset: SubsetRelation,
    /// Same pitch-class set under different roots.
    pub inversion: bool,
    /// The n for which transposing A's set by n semitones yields B's set.
    pub transposition: Option<u8>,

    /// Minimum total semitone movement over all note pairings; `None`
    /// when the chords differ in size.
    pub voice_leading: Option<u8>,

    pub transformation: NeoRiemannian,

    /// Forte interval-class vector of chord A (ic1 through ic6).
    pub interval_vector_a: [u8; 6],
    /// Forte interval-class vector of chord B.
    pub interval_vector_b: [u8; 6],
    /// Equal vectors (Z-relation candidate).
    pub same_interval_vector: bool,
}

impl ChordComparison {
    pub fn compute(a: &Chord, b: &Chord) -> ChordComparison {
        let pc_a = a.pc_mask();
        let pc_b = b.pc_mask();

        let ra = a.root().semitone();
        let rb = b.root().semitone();
        let mut direction = rb as i8 - ra as i8;
        if direction > 6 {
            direction -= 12;
        }
        if direction < -6 {
            direction += 12;
        }

        let subset = if pc_a == pc_b {
            SubsetRelation::Equal
        } else if pc_a & pc_b == pc_a {
            SubsetRelation::AInB
        } else if pc_a & pc_b == pc_b {
            SubsetRelation::BInA
        } else {
            SubsetRelation::None
        };

        let transposition = (0..12).find(|&n| rotate_pc(pc_a, n) == pc_b);

        let iv_a = interval_vector(pc_a);
        let iv_b = interval_vector(pc_b);

        ChordComparison {
            common_pc: pc_a & pc_b,
            exclusive_a_pc: pc_a & !pc_b,
            exclusive_b_pc: pc_b & !pc_a,
            common_count: (pc_a & pc_b).count_ones() as u8,
            root_distance: direction.unsigned_abs(),
            root_direction: direction,
            same_quality: a.type_name() == b.type_name(),
            same_size: a.size() == b.size(),
            common_interval_mask: a.interval_mask() & b.interval_mask(),
            enharmonic: pc_a == pc_b,
            subset,
            inversion: pc_a == pc_b && ra != rb,
            transposition,
            voice_leading: voice_leading(a, b),
            transformation: detect_neo_riemannian(a, b),
            interval_vector_a: iv_a,
            interval_vector_b: iv_b,
            same_interval_vector: iv_a == iv_b,
        }
    }
}

/// Shortest arc on the circle of semitones (0-6).
fn chromatic_dist(a: u8, b: u8) -> u8 {
    let d = (b + 12 - a) % 12;
    if d > 6 {
        12 - d
    } else {
        d
    }
}

/// Rotate a 12-bit pitch-class mask upward by n semitones.
fn rotate_pc(mask: u16, n: u8) -> u16 {
    let n = u32::from(n % 12);
    let wide = u32::from(mask & 0xFFF);
    (((wide << n) | (wide >> (12 - n))) & 0xFFF) as u16
}

/// Forte interval-class vector: entry i counts note pairs at interval
/// class i + 1.
fn interval_vector(pc_mask: u16) -> [u8; 6] {
    let mut iv = [0u8; 6];
    for i in 0..12u8 {
        if pc_mask & (1 << i) == 0 {
            continue;
        }
        for j in (i + 1)..12 {
            if pc_mask & (1 << j) == 0 {
                continue;
            }
            let ic = chromatic_dist(i, j);
            if ic > 0 {
                iv[usize::from(ic) - 1] += 1;
            }
        }
    }
    iv
}

/// Minimum total semitone movement for the best note pairing, found by
/// scanning every permutation of B's pitch classes. Chord sizes are at
/// most seven, so the scan is small.
fn voice_leading(a: &Chord, b: &Chord) -> Option<u8> {
    if a.size() != b.size() || a.size() == 0 {
        return None;
    }

    let pcs_a: Vec<u8> = a.notes().iter().map(|n| n.semitone()).collect();
    let mut pcs_b: Vec<u8> = b.notes().iter().map(|n| n.semitone()).collect();
    pcs_b.sort_unstable();

    let mut best = u16::MAX;
    loop {
        let sum: u16 = pcs_a
            .iter()
            .zip(&pcs_b)
            .map(|(&x, &y)| u16::from(chromatic_dist(x, y)))
            .sum();
        if sum < best {
            best = sum;
            if best == 0 {
                break;
            }
        }
        if !next_permutation(&mut pcs_b) {
            break;
        }
    }
    Some(best as u8)
}

/// Advance to the next lexicographic permutation; false once exhausted.
fn next_permutation(a: &mut [u8]) -> bool {
    if a.len() < 2 {
        return false;
    }
    let mut i = a.len() - 1;
    while i > 0 && a[i - 1] >= a[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = a.len() - 1;
    while a[j] <= a[i - 1] {
        j -= 1;
    }
    a.swap(i - 1, j);
    a[i..].reverse();
    true
}

/// The (root, is_major) pair of a pure major or minor triad.
fn triad_shape(chord: &Chord) -> Option<(u8, bool)> {
    match chord.type_name() {
        "M" => Some((chord.root().semitone(), true)),
        "m" => Some((chord.root().semitone(), false)),
        _ => None,
    }
}

fn apply_neo_step(root: u8, is_major: bool, op: NeoRiemannian) -> (u8, bool) {
    match op {
        NeoRiemannian::P => (root, !is_major),
        NeoRiemannian::L => {
            if is_major {
                ((root + 4) % 12, false)
            } else {
                ((root + 8) % 12, true)
            }
        }
        NeoRiemannian::R => {
            if is_major {
                ((root + 9) % 12, false)
            } else {
                ((root + 3) % 12, true)
            }
        }
        _ => (root, is_major),
    }
}

fn detect_neo_riemannian(a: &Chord, b: &Chord) -> NeoRiemannian {
    let Some((root_a, major_a)) = triad_shape(a) else {
        return NeoRiemannian::None;
    };
    let Some(target) = triad_shape(b) else {
        return NeoRiemannian::None;
    };

    for op in [NeoRiemannian::P, NeoRiemannian::L, NeoRiemannian::R] {
        if apply_neo_step(root_a, major_a, op) == target {
            return op;
        }
    }

    let two_step = [
        (NeoRiemannian::R, NeoRiemannian::P, NeoRiemannian::Rp),
        (NeoRiemannian::R, NeoRiemannian::L, NeoRiemannian::Rl),
        (NeoRiemannian::L, NeoRiemannian::P, NeoRiemannian::Lp),
        (NeoRiemannian::L, NeoRiemannian::R, NeoRiemannian::Lr),
        (NeoRiemannian::P, NeoRiemannian::R, NeoRiemannian::Pr),
        (NeoRiemannian::P, NeoRiemannian::L, NeoRiemannian::Pl),
    ];
    for (first, second, result) in two_step {
        let (r, m) = apply_neo_step(root_a, major_a, first);
        if apply_neo_step(r, m, second) == target {
            return result;
        }
    }

    NeoRiemannian::None
}
