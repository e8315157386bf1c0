use eyre::Result;
use regex::Regex;

/// Number of lines, marker line included, searched for a sequential time.
pub const SEQ_TIME_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEvent {
    SizeHeader(u32),
    SequentialTime(f64),
    ParallelRow { threads: u32, time_ms: f64 },
    Unclassified,
}

#[derive(Debug)]
pub struct LineScanner {
    size_re: Regex,
    time_re: Regex,
    row_re: Regex,
}

impl LineScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            size_re: Regex::new(r"Matrix size:\s*(\d+)\s*x\s*\d+")?,
            time_re: Regex::new(r"Time:\s*([\d.]+)\s*ms")?,
            row_re: Regex::new(r"^\s*(\d+)\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)%")?,
        })
    }

    /// Classifies `lines[idx]` as exactly one [`LineEvent`].
    ///
    /// A `Sequential:` marker searches forward within [`SEQ_TIME_WINDOW`]
    /// lines for its time token; nothing else looks ahead, and nothing
    /// looks behind. A marker with no time in its window is unclassified.
    pub fn classify(&self, lines: &[&str], idx: usize) -> LineEvent {
        let line = lines[idx];

        if let Some(cap) = self.size_re.captures(line) {
            if let Some(n) = cap.get(1).and_then(|m| m.as_str().parse().ok()) {
                return LineEvent::SizeHeader(n);
            }
        }

        if line.contains("Sequential:") {
            let end = (idx + SEQ_TIME_WINDOW).min(lines.len());
            for probe in &lines[idx..end] {
                if let Some(cap) = self.time_re.captures(probe) {
                    if let Some(t) = cap.get(1).and_then(|m| m.as_str().parse().ok()) {
                        return LineEvent::SequentialTime(t);
                    }
                }
            }
            return LineEvent::Unclassified;
        }

        // Table rows carry four numeric fields; only the first two matter
        // downstream.
        if let Some(cap) = self.row_re.captures(line) {
            let threads = cap.get(1).and_then(|m| m.as_str().parse().ok());
            let time_ms = cap.get(2).and_then(|m| m.as_str().parse().ok());
            if let (Some(threads), Some(time_ms)) = (threads, time_ms) {
                return LineEvent::ParallelRow { threads, time_ms };
            }
        }

        LineEvent::Unclassified
    }
}
