//! Mock LED hardware and event sink for integration tests.
//!
//! Records every port call so tests can assert on the full output
//! history without touching real GPIO or UART registers.

use led_subsystem::app::events::LedEvent;
use led_subsystem::app::ports::{Channel, EventSink, LedPort};
use led_subsystem::config::LedProfile;

// ── Port call record ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    Level { channel: Channel, on: bool },
    Status(Vec<u8>),
}

// ── MockLedPort ───────────────────────────────────────────────

pub struct MockLedPort {
    present: [bool; Channel::COUNT],
    status_link: bool,
    pub calls: Vec<PortCall>,
}

#[allow(dead_code)]
impl MockLedPort {
    /// Board with exactly the channels of `profile`.
    pub fn for_profile(profile: LedProfile) -> Self {
        let (present, status_link) = match profile {
            LedProfile::Relay => ([true, false, true], true),
            LedProfile::Digital => ([true, true, false], false),
        };
        Self {
            present,
            status_link,
            calls: Vec::new(),
        }
    }

    /// Board carrying every channel and a status link.
    pub fn full() -> Self {
        Self {
            present: [true; Channel::COUNT],
            status_link: true,
            calls: Vec::new(),
        }
    }

    pub fn level_writes(&self, channel: Channel) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Level { channel: ch, on } if *ch == channel => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn status_frames(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Status(bytes) => Some(bytes.clone()),
                PortCall::Level { .. } => None,
            })
            .collect()
    }

    pub fn last_level(&self, channel: Channel) -> Option<bool> {
        self.level_writes(channel).last().copied()
    }
}

impl LedPort for MockLedPort {
    fn has_channel(&self, channel: Channel) -> bool {
        self.present[channel as usize]
    }

    fn set_level(&mut self, channel: Channel, on: bool) {
        self.calls.push(PortCall::Level { channel, on });
    }

    fn has_status(&self) -> bool {
        self.status_link
    }

    fn write_status(&mut self, bytes: &[u8]) {
        self.calls.push(PortCall::Status(bytes.to_vec()));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<LedEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, LedEvent::StateChanged { .. }))
            .count()
    }

    pub fn last_snapshot(&self) -> Option<&led_subsystem::app::events::LedSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            LedEvent::Snapshot(s) => Some(s),
            _ => None,
        })
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &LedEvent) {
        self.events.push(event.clone());
    }
}
