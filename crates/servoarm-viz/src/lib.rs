use serde::Serialize;
use servoarm_core::Scalar;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Gates for the driver's periodic debug output.
#[derive(Copy, Clone, Debug)]
pub struct DebugSettings {
    pub print_every: u32, // 0 = never
    pub json_every: u32,  // 0 = never
    pub show_joints: bool,
    pub show_bodies: bool,
    pub max_lines: usize,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self { print_every: 0, json_every: 0, show_joints: true, show_bodies: false, max_lines: 16 }
    }
}

#[derive(Copy, Clone, Debug, Serialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    HingeCmd { joint: u32, vel: Scalar, f_max: Scalar },
    TargetAdjust { joint: u32, delta: Scalar, target: Scalar },
    Tick { tick: u64, dt: Scalar },
}

/// Bounded per-tick event record; drained to JSONL on demand.
pub struct Ledger {
    events: Vec<LedgerEvent>,
    cap: usize,
}

impl Ledger {
    pub fn new(cap: usize) -> Self {
        Self { events: Vec::with_capacity(cap.min(256)), cap }
    }

    pub fn push(&mut self, e: LedgerEvent) {
        if self.events.len() < self.cap {
            self.events.push(e);
        }
    }

    pub fn clear(&mut self) { self.events.clear(); }
    pub fn len(&self) -> usize { self.events.len() }
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEvent> { self.events.iter() }

    /// One line of JSON per event, to `<dir>/tick_<tick>.jsonl`.
    pub fn write_jsonl(&self, dir: &str, tick: u64) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let path = Path::new(dir).join(format!("tick_{tick:06}.jsonl"));
        let mut f = fs::File::create(path)?;
        for e in &self.events {
            let line = serde_json::to_string(e)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn cap_bounds_the_event_list() {
        let mut l = Ledger::new(2);
        for j in 0..5 {
            l.push(LedgerEvent::HingeCmd { joint: j, vel: 1.0, f_max: 100.0 });
        }
        assert_eq!(l.len(), 2);
    }

    #[test] fn iter_preserves_order() {
        let mut l = Ledger::new(16);
        l.push(LedgerEvent::Tick { tick: 1, dt: 0.01 });
        l.push(LedgerEvent::HingeCmd { joint: 1, vel: -5.0, f_max: 100.0 });
        let kinds: Vec<bool> = l.iter().map(|e| matches!(e, LedgerEvent::Tick { .. })).collect();
        assert_eq!(kinds, vec![true, false]);
        l.clear();
        assert!(l.is_empty());
    }
}
