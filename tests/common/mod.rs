#![allow(dead_code)]

use flparse::prelude::*;

pub const PPQ: u16 = 96;

/// A writer for a project with `channels` channels and no events yet.
pub fn writer(channels: u16) -> EventWriter {
    EventWriter::new(ProjectHeader::new(channels, PPQ).unwrap())
}

/// A writer that has already written `version`.
pub fn versioned(channels: u16, version: &str) -> EventWriter {
    let mut w = writer(channels);
    w.text(EventId::Version, version).unwrap();
    w
}

/// An insert-flags payload carrying `flags`.
pub fn insert_flags(flags: u32) -> Vec<u8> {
    let mut payload = 0u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&flags.to_le_bytes());
    payload.extend_from_slice(&0u32.to_le_bytes());
    payload
}

/// One 12-byte insert parameter record.
pub fn insert_param(param: u8, insert: usize, slot: usize, value: i32) -> Vec<u8> {
    let mut record = vec![0, 0, 0, 0, param, 0];
    record.extend_from_slice(&SlotAddress { insert, slot }.pack().to_le_bytes());
    record.extend_from_slice(&value.to_le_bytes());
    record
}

/// One 20-byte automation channel record.
pub fn automation_record(channel: u8, param: u16, destination: u16) -> Vec<u8> {
    let mut record = vec![0, 0, channel, 0, 0, 0, 0, 0];
    record.extend_from_slice(&param.to_le_bytes());
    record.extend_from_slice(&destination.to_le_bytes());
    record.extend_from_slice(&[0; 8]);
    record
}

/// One 32-byte playlist record.
pub fn playlist_record(position: i32, base: u16, source: u16, length: i32, track: u16) -> Vec<u8> {
    let mut record = position.to_le_bytes().to_vec();
    record.extend_from_slice(&base.to_le_bytes());
    record.extend_from_slice(&source.to_le_bytes());
    record.extend_from_slice(&length.to_le_bytes());
    record.extend_from_slice(&track.to_le_bytes());
    record.extend_from_slice(&[0; 6]);
    record.extend_from_slice(&[0; 4]);
    record.extend_from_slice(&0.5f32.to_le_bytes());
    record.extend_from_slice(&1.0f32.to_le_bytes());
    record
}

pub fn lenient(bytes: &[u8]) -> Decoded {
    decode_with_diagnostics(bytes, &DecodeOptions::default()).unwrap()
}

pub fn kinds(decoded: &Decoded) -> Vec<AnomalyKind> {
    decoded.anomalies.iter().map(|a| a.kind.clone()).collect()
}
