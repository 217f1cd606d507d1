// MIDI output for evolved melodies.
//
// Writes a single-track Standard MIDI File. Notes are laid end to end: each
// one starts where the previous one stopped, durations are in beats
// (quarter notes), pitches are rounded to the nearest MIDI key.
//
// Uses the `midly` crate for MIDI writing.

use crate::error::{MelodyError, Result};
use crate::types::Melody;
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;

const CHANNEL: u8 = 0;

const MAX_U24: u32 = 0x00FF_FFFF;
const MAX_U28: u32 = 0x0FFF_FFFF;

/// Convert a melody to MIDI and write it to a file.
pub fn write_midi(melody: &Melody, path: &Path, tempo_bpm: f64, velocity: u8) -> Result<()> {
    let smf = melody_to_smf(melody, tempo_bpm, velocity);
    let mut buf = Vec::new();
    smf.write(&mut buf)
        .map_err(|e| MelodyError::Export(format!("Failed to encode MIDI: {}", e)))?;
    std::fs::write(path, &buf)?;
    log::info!("Wrote {} notes to {}", melody.len(), path.display());
    Ok(())
}

/// Convert a melody to an in-memory SMF.
pub fn melody_to_smf(melody: &Melody, tempo_bpm: f64, velocity: u8) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_micros(tempo_bpm)))),
    });

    let channel = u4::new(CHANNEL);
    let vel = u7::new(velocity.min(127));
    let mut offset_beats = 0.0;
    let mut last_event_tick: u32 = 0;

    for note in melody.notes() {
        let key = u7::new(midi_key(note.pitch));
        let duration = if note.duration.is_finite() && note.duration > 0.0 {
            note.duration
        } else {
            0.0
        };

        let start_tick = beats_to_ticks(offset_beats);
        let end_tick = beats_to_ticks(offset_beats + duration).max(start_tick);

        track.push(TrackEvent {
            delta: u28::new(start_tick - last_event_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, vel },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(end_tick - start_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key, vel: u7::new(0) },
            },
        });

        last_event_tick = end_tick;
        offset_beats += duration;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}

/// Nearest MIDI key, clamped to 0..=127. Halves go to the even key.
pub fn midi_key(pitch: f64) -> u8 {
    if !pitch.is_finite() {
        return 0;
    }
    pitch.round_ties_even().clamp(0.0, 127.0) as u8
}

fn beats_to_ticks(beats: f64) -> u32 {
    let ticks = (beats * TICKS_PER_QUARTER as f64).round();
    ticks.clamp(0.0, MAX_U28 as f64) as u32
}

fn tempo_micros(tempo_bpm: f64) -> u32 {
    let micros = (60_000_000.0 / tempo_bpm).round();
    micros.clamp(1.0, MAX_U24 as f64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_events(smf: &Smf) -> Vec<(u32, bool, u8)> {
        let mut tick = 0;
        let mut out = Vec::new();
        for event in &smf.tracks[0] {
            tick += event.delta.as_int();
            if let TrackEventKind::Midi { message, .. } = event.kind {
                match message {
                    MidiMessage::NoteOn { key, .. } => out.push((tick, true, key.as_int())),
                    MidiMessage::NoteOff { key, .. } => out.push((tick, false, key.as_int())),
                    _ => {}
                }
            }
        }
        out
    }

    #[test]
    fn test_offsets_accumulate() {
        let melody = Melody {
            pitches: vec![60.0, 62.4, 63.6],
            durations: vec![0.25, 0.5, 1.0],
        };
        let smf = melody_to_smf(&melody, 120.0, 100);
        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(
            note_events(&smf),
            vec![
                (0, true, 60),
                (120, false, 60),
                (120, true, 62),
                (360, false, 62),
                (360, true, 64),
                (840, false, 64),
            ]
        );
    }

    #[test]
    fn test_bad_durations_do_not_rewind() {
        let melody = Melody {
            pitches: vec![60.0, 61.0, 62.0],
            durations: vec![1.0, -0.5, 1.0],
        };
        let events = note_events(&melody_to_smf(&melody, 120.0, 100));
        assert_eq!(events[2], (480, true, 61));
        assert_eq!(events[3], (480, false, 61));
        assert_eq!(events[4], (480, true, 62));
    }

    #[test]
    fn test_midi_key_clamps() {
        assert_eq!(midi_key(200.0), 127);
        assert_eq!(midi_key(-3.0), 0);
        assert_eq!(midi_key(f64::NAN), 0);
        assert_eq!(midi_key(64.5), 64);
        assert_eq!(midi_key(65.5), 66);
        assert_eq!(midi_key(64.51), 65);
    }

    #[test]
    fn test_encoded_bytes_parse_back() {
        let melody = Melody {
            pitches: vec![60.0, 64.0],
            durations: vec![0.5, 0.5],
        };
        let smf = melody_to_smf(&melody, 90.0, 80);
        let mut buf = Vec::new();
        smf.write(&mut buf).unwrap();
        let parsed = Smf::parse(&buf).unwrap();
        assert_eq!(parsed.tracks.len(), 1);
        assert_eq!(note_events(&parsed).len(), 4);
    }
}
