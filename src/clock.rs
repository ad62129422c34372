use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Formatted clock state for the home-screen header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClockText {
    /// 24-hour `H:mm`, hour unpadded.
    pub time: String,
    /// `"<Weekday>, <day><suffix> <Month>"`, e.g. `"Monday, 1st September"`.
    pub date: String,
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Formats an instant for display. Pure; callers pass `Local::now()` so every
/// invocation reflects the current locale offset.
pub fn format(now: &NaiveDateTime) -> ClockText {
    let time = format!("{}:{:02}", now.hour(), now.minute());

    let weekday = weekday_name(now.weekday());
    let day = now.day();
    let month = MONTHS[now.month0() as usize];

    let date = format!("{weekday}, {day}{} {month}", ordinal_suffix(day));

    ClockText { time, date }
}

fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;

    match weekday {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

// Literal day match, not day % 10: the 11th is "11th", not "11st".
fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Starting an already running ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyRunning;

impl fmt::Display for AlreadyRunning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("clock ticker is already running")
    }
}

impl std::error::Error for AlreadyRunning {}

/// Fires a callback once immediately and then about once per period, on a
/// dedicated background thread.
///
/// The callback must not touch UI state directly; the UI side hands in a
/// closure that pushes over a channel and requests a repaint. `stop` joins
/// the worker, so once it returns no further firing happens (a tick already
/// sitting in the channel may still be drained by the UI).
#[derive(Default)]
pub struct ClockTicker {
    worker: Option<(mpsc::Sender<()>, JoinHandle<()>)>,
}

impl ClockTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<F>(&mut self, period: Duration, mut tick: F) -> Result<(), AlreadyRunning>
    where
        F: FnMut() + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(AlreadyRunning);
        }

        let (tx, rx) = mpsc::channel::<()>();

        let handle = std::thread::spawn(move || {
            tick();

            loop {
                match rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    // sender dropped: stopped
                    _ => break,
                }
            }
        });

        self.worker = Some((tx, handle));

        Ok(())
    }

    /// Idempotent; a no-op when not running.
    pub fn stop(&mut self) {
        let Some((tx, handle)) = self.worker.take() else {
            return;
        };

        drop(tx);

        if handle.join().is_err() {
            log::warn!("clock ticker thread panicked");
        }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
