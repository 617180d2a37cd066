/// Events emitted while a multi-frame workflow runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    SystemStart { system: String, total_frames: u64 },
    FrameFinish { step: u64 },
    SystemFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards [`Progress`] events to an optional callback; silent without one.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::FrameFinish { step: 10 });
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        reporter.report(Progress::SystemStart {
            system: "FeAl".to_string(),
            total_frames: 2,
        });
        reporter.report(Progress::FrameFinish { step: 0 });
        reporter.report(Progress::SystemFinish);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                Progress::SystemStart {
                    system: "FeAl".to_string(),
                    total_frames: 2,
                },
                Progress::FrameFinish { step: 0 },
                Progress::SystemFinish,
            ]
        );
    }
}
