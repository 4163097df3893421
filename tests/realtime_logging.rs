#![cfg(feature = "rtrb")]

use std::sync::atomic::{AtomicUsize, Ordering};

use leveltrack::{control::SharedLevelTracker, LevelParams};
use log::{LevelFilter, Log, Metadata, Record};

/// Counts every record, at every level.
struct CountingLogger {
    records: AtomicUsize,
}

impl Log for CountingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, _record: &Record) {
        self.records.fetch_add(1, Ordering::SeqCst);
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger {
    records: AtomicUsize::new(0),
};

fn records() -> usize {
    LOGGER.records.load(Ordering::SeqCst)
}

#[test]
fn queued_changes_are_applied_without_logging() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let (mut tracker, mut handle) = SharedLevelTracker::new(&LevelParams::default());
    let mut out = [0; 4];

    // Deriving and clamping happen on the control side, where logging is fine.
    let before_send = records();
    handle.set_attack_micro_sec(2_000).unwrap();
    handle.set_release_micro_sec(30_000).unwrap();
    handle.apply_command("l -1").unwrap_err();
    handle.apply_command("t 20").unwrap();
    handle.reset().unwrap();
    assert!(records() > before_send, "control side should have logged");

    let before_render = records();
    tracker.render_block(&[1, 2, 3, 4], &mut out);
    assert_eq!(records(), before_render);
    assert_eq!(tracker.state().attack_micro_sec(), 2_000);
    assert_eq!(tracker.state().release_micro_sec(), 30_000);
    assert_eq!(tracker.state().threshold_percent(), 20);

    handle.set_threshold_percent(250).unwrap();
    let before_sample = records();
    tracker.next_sample(5);
    assert_eq!(records(), before_sample);
    assert_eq!(tracker.state().threshold_percent(), 100);
}
