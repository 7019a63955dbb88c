use serde::Serialize;

use crate::chord::Chord;
use crate::note::Note;
use crate::rhythm::{Duration, Tempo, TimeSignature};

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const DEFAULT_VELOCITY: u8 = 100;
const DEFAULT_CHANNEL: u8 = 1;

/// What an event sounds: a note, a chord, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    Note(Note),
    Chord(Chord),
    Rest,
}

/// A musical event: a note, chord or rest bound to a duration, with an
/// octave, a velocity and a MIDI channel.
///
/// ```
/// use solfa::{Duration, Event, Note};
/// let e = Event::note(Note::new("C").unwrap(), Duration::quarter(), 4);
/// assert_eq!(e.midi_number(), 60);
/// assert_eq!(e.to_midi(), [0x90, 60, 100, 0x80, 60, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    kind: EventKind,
    duration: Duration,
    octave: i8,
    velocity: u8,
    channel: u8,
}

impl Event {
    pub fn note(note: Note, duration: Duration, octave: i8) -> Event {
        Event {
            kind: EventKind::Note(note),
            duration,
            octave,
            velocity: DEFAULT_VELOCITY,
            channel: DEFAULT_CHANNEL,
        }
    }

    pub fn chord(chord: Chord, duration: Duration, octave: i8) -> Event {
        Event {
            kind: EventKind::Chord(chord),
            duration,
            octave,
            velocity: DEFAULT_VELOCITY,
            channel: DEFAULT_CHANNEL,
        }
    }

    pub fn rest(duration: Duration) -> Event {
        Event {
            kind: EventKind::Rest,
            duration,
            octave: 4,
            velocity: DEFAULT_VELOCITY,
            channel: DEFAULT_CHANNEL,
        }
    }

    /// A note event from a raw MIDI number.
    pub fn from_midi(midi: u8, duration: Duration) -> Event {
        Event::note(Note::from_midi(midi), duration, i8::try_from(midi / 12).unwrap_or(4) - 1)
    }

    pub fn with_velocity(mut self, velocity: u8) -> Event {
        self.velocity = velocity.min(127);
        self
    }

    /// MIDI channel 1-16.
    pub fn with_channel(mut self, channel: u8) -> Event {
        self.channel = channel.clamp(1, 16);
        self
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    pub fn velocity(&self) -> u8 {
        self.velocity
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, EventKind::Rest)
    }

    /// MIDI number of the note, or of the chord root; 0 for a rest.
    pub fn midi_number(&self) -> u8 {
        match &self.kind {
            EventKind::Note(note) => note.midi(self.octave),
            EventKind::Chord(chord) => chord.root().midi(self.octave),
            EventKind::Rest => 0,
        }
    }

    /// Frequency in Hz of the note or chord root; 0 for a rest.
    pub fn frequency(&self) -> f32 {
        match &self.kind {
            EventKind::Note(note) => note.frequency(self.octave),
            EventKind::Chord(chord) => chord.root().frequency(self.octave),
            EventKind::Rest => 0.0,
        }
    }

    pub fn beats(&self) -> f64 {
        self.duration.beats()
    }

    pub fn seconds(&self, tempo: &Tempo) -> f64 {
        self.duration.seconds(tempo)
    }

    /// A copy transposed by a signed number of semitones; rests are
    /// unchanged.
    pub fn transpose(&self, semitones: i32) -> Event {
        let kind = match &self.kind {
            EventKind::Note(note) => EventKind::Note(note.transpose(semitones)),
            EventKind::Chord(chord) => EventKind::Chord(chord.transpose(semitones)),
            EventKind::Rest => EventKind::Rest,
        };
        Event { kind, ..self.clone() }
    }

    /// Render as raw MIDI channel-voice bytes: a note-on/note-off pair
    /// per sounding pitch, rests as nothing.
    pub fn to_midi(&self) -> Vec<u8> {
        let status_on = NOTE_ON | (self.channel - 1);
        let status_off = NOTE_OFF | (self.channel - 1);
        match &self.kind {
            EventKind::Note(note) => {
                let midi = note.midi(self.octave);
                vec![status_on, midi, self.velocity, status_off, midi, 0]
            }
            EventKind::Chord(chord) => {
                let root = chord.root().midi(self.octave);
                let tones: Vec<u8> = chord
                    .intervals()
                    .iter()
                    .map(|i| root + i.semitones())
                    .collect();
                let mut bytes = Vec::with_capacity(tones.len() * 6);
                for &tone in &tones {
                    bytes.extend_from_slice(&[status_on, tone, self.velocity]);
                }
                for &tone in &tones {
                    bytes.extend_from_slice(&[status_off, tone, 0]);
                }
                bytes
            }
            EventKind::Rest => Vec::new(),
        }
    }
}

/// An ordered list of events with aggregate timing queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sequence {
    events: Vec<Event>,
}

impl Sequence {
    pub fn new() -> Sequence {
        Sequence::default()
    }

    pub fn add(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Remove the event at an index, shifting later events down.
    pub fn remove(&mut self, index: usize) -> Option<Event> {
        if index < self.events.len() {
            Some(self.events.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Transpose every note and chord event in place; rests and
    /// durations are untouched.
    pub fn transpose(&mut self, semitones: i32) {
        for event in &mut self.events {
            *event = event.transpose(semitones);
        }
    }

    pub fn total_beats(&self) -> f64 {
        self.events.iter().map(Event::beats).sum()
    }

    pub fn total_seconds(&self, tempo: &Tempo) -> f64 {
        self.events.iter().map(|e| e.seconds(tempo)).sum()
    }

    /// Number of bars the sequence fills in a time signature.
    pub fn bar_count(&self, time_signature: &TimeSignature) -> f64 {
        self.total_beats() / time_signature.bar_beats()
    }

    /// Concatenated MIDI bytes of every event.
    pub fn to_midi(&self) -> Vec<u8> {
        self.events.iter().flat_map(Event::to_midi).collect()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c4_quarter() -> Event {
        Event::note(Note::new("C").unwrap(), Duration::quarter(), 4)
    }

    #[test]
    fn note_event_basics() {
        let e = c4_quarter();
        assert_eq!(e.midi_number(), 60);
        assert!((e.frequency() - 261.63).abs() < 0.01);
        assert_eq!(e.beats(), 1.0);
        assert!(!e.is_rest());
    }

    #[test]
    fn rest_event() {
        let r = Event::rest(Duration::half());
        assert!(r.is_rest());
        assert_eq!(r.midi_number(), 0);
        assert_eq!(r.frequency(), 0.0);
        assert!(r.to_midi().is_empty());
        assert_eq!(r.transpose(7), r);
    }

    #[test]
    fn transposition() {
        let e = c4_quarter().transpose(7);
        match e.kind() {
            EventKind::Note(n) => assert_eq!(n.name(), "G"),
            other => panic!("unexpected kind {other:?}"),
        }
        assert_eq!(e.midi_number(), 67);
    }

    #[test]
    fn from_midi_recovers_the_octave() {
        let e = Event::from_midi(60, Duration::quarter());
        assert_eq!(e.octave(), 4);
        assert_eq!(e.midi_number(), 60);
    }

    #[test]
    fn note_bytes() {
        assert_eq!(c4_quarter().to_midi(), [0x90, 60, 100, 0x80, 60, 0]);

        let soft = c4_quarter().with_velocity(40);
        assert_eq!(soft.to_midi()[2], 40);

        assert_eq!(c4_quarter().with_channel(2).to_midi()[0], 0x91);
        assert_eq!(c4_quarter().with_channel(16).to_midi()[0], 0x9F);
        // channels clamp into 1-16
        assert_eq!(c4_quarter().with_channel(0).to_midi()[0], 0x90);
    }

    #[test]
    fn chord_bytes_pair_every_tone() {
        let cm = Chord::new("CM").unwrap();
        let e = Event::chord(cm, Duration::quarter(), 4);
        let bytes = e.to_midi();
        assert_eq!(bytes.len(), 18);
        assert_eq!(&bytes[..9], [0x90, 60, 100, 0x90, 64, 100, 0x90, 67, 100]);
        assert_eq!(&bytes[9..12], [0x80, 60, 0]);
    }

    #[test]
    fn sequence_aggregates() {
        let mut seq = Sequence::new();
        assert!(seq.is_empty());
        seq.add(c4_quarter());
        seq.add(Event::note(Note::new("E").unwrap(), Duration::quarter(), 4));
        seq.add(Event::note(Note::new("G").unwrap(), Duration::half(), 4));

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.total_beats(), 4.0);
        assert_eq!(seq.total_seconds(&Tempo::new(120)), 2.0);
        assert_eq!(seq.bar_count(&TimeSignature::new(4, 4)), 1.0);
        assert_eq!(seq.to_midi().len(), 18);
    }

    #[test]
    fn sequence_editing() {
        let mut seq = Sequence::new();
        seq.add(c4_quarter());
        seq.add(Event::rest(Duration::quarter()));
        seq.add(Event::note(Note::new("G").unwrap(), Duration::quarter(), 4));

        let removed = seq.remove(1).unwrap();
        assert!(removed.is_rest());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(1).unwrap().midi_number(), 67);
        assert_eq!(seq.remove(9), None);

        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.total_beats(), 0.0);
    }

    #[test]
    fn sequence_transposition_skips_rests() {
        let mut seq = Sequence::new();
        seq.add(c4_quarter());
        seq.add(Event::rest(Duration::quarter()));
        seq.transpose(5);

        match seq.get(0).unwrap().kind() {
            EventKind::Note(n) => assert_eq!(n.name(), "F"),
            other => panic!("unexpected kind {other:?}"),
        }
        assert!(seq.get(1).unwrap().is_rest());
    }
}
