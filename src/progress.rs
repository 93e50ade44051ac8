use std::cell::RefCell;
use std::io::{self, Write};
use std::time::Instant;

use indicatif::ProgressBar;

use crate::util::create_progress_bar;

/// Receives progress of long running operations
pub trait ProgressHandler {
    fn progress(&self, percent: u8, elapsed: f64, header: &str, finished: bool);
}

impl<F> ProgressHandler for F
where
    F: Fn(u8, f64, &str, bool),
{
    fn progress(&self, percent: u8, elapsed: f64, header: &str, finished: bool) {
        self(percent, elapsed, header, finished)
    }
}

/// Progress state of one operation.
///
/// The header is sticky: a report without a label reuses the last one seen.
/// Percentages never go backwards and the handler sees exactly one report
/// with `finished` set, at 100 % or when the reporter is finished or dropped.
pub struct ProgressReporter<'a> {
    handler: Option<&'a dyn ProgressHandler>,
    header: String,
    percent: u8,
    started: Instant,
    finished: bool,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(handler: Option<&'a dyn ProgressHandler>, header: &str) -> Self {
        ProgressReporter {
            handler,
            header: header.to_owned(),
            percent: 0,
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn report(&mut self, percent: u8, label: Option<&str>) {
        if self.finished {
            return;
        }
        if let Some(label) = label.filter(|l| !l.is_empty()) {
            self.header = label.to_owned();
        }

        self.percent = percent.min(100).max(self.percent);
        self.finished = self.percent == 100;
        self.notify();
    }

    /// Report `done` out of `total` units of work
    pub fn report_fraction(&mut self, done: usize, total: usize) {
        let percent = if total == 0 {
            100
        } else {
            (done.min(total) * 100 / total) as u8
        };
        self.report(percent, None);
    }

    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.notify();
    }

    fn notify(&self) {
        if let Some(handler) = self.handler {
            handler.progress(
                self.percent,
                self.started.elapsed().as_secs_f64(),
                &self.header,
                self.finished,
            );
        }
    }
}

impl Drop for ProgressReporter<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Single line display: `{header} {percent} %` rewritten in place with a
/// carriage return, terminated by a newline at 100 % or once the operation
/// finishes
pub struct LineProgress<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> LineProgress<W> {
    pub fn new(out: W) -> Self {
        LineProgress {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl LineProgress<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> LineProgress<W> {
    fn draw(&self, percent: u8, header: &str, done: bool) -> io::Result<()> {
        let mut out = self.out.borrow_mut();
        write!(out, "{} {:3} %\r", header, percent)?;
        if done {
            writeln!(out)?;
        }
        out.flush()
    }
}

impl<W: Write> ProgressHandler for LineProgress<W> {
    fn progress(&self, percent: u8, _elapsed: f64, header: &str, finished: bool) {
        let _ = self.draw(percent, header, finished || percent == 100);
    }
}

/// Progress bar display backed by indicatif
#[derive(Default)]
pub struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressHandler for BarProgress {
    fn progress(&self, percent: u8, _elapsed: f64, header: &str, finished: bool) {
        let mut slot = self.bar.borrow_mut();
        let bar = slot.get_or_insert_with(|| create_progress_bar(100, header));

        bar.set_message(header.to_owned());
        bar.set_position(percent as u64);

        if finished {
            bar.finish();
            *slot = None;
        }
    }
}
