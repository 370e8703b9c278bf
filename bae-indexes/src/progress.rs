/// Receives human-readable progress messages during a parse.
///
/// Called synchronously on the parsing thread.
pub trait ProgressSink {
    fn report(&self, message: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _message: &str) {}
}

/// Artists between intermediate progress reports.
pub const ARTIST_PROGRESS_INTERVAL: usize = 10;

pub fn artist_count_message(count: usize) -> String {
    format!("Got {} artists.", count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_sinks() {
        let seen = RefCell::new(Vec::new());
        let sink = |message: &str| seen.borrow_mut().push(message.to_string());

        sink.report(&artist_count_message(10));
        NoProgress.report("ignored");

        assert_eq!(*seen.borrow(), vec!["Got 10 artists.".to_string()]);
    }
}
