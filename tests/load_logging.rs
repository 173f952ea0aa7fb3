//! Log output of the load flow, captured by an in-process logger.
//!
//! Kept in its own test binary: a logger can only be installed once per
//! process.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use imagefit::*;

struct Capture(Mutex<Vec<(Level, String)>>);

impl Log for Capture {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.0
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture(Mutex::new(Vec::new()));

struct Px;

impl Image for Px {
    type Shader = ();

    fn width(&self) -> f32 {
        1.0
    }

    fn height(&self) -> f32 {
        1.0
    }

    fn make_shader(&self, _: TileMode, _: TileMode, _: &Matrix) -> Self::Shader {}
}

#[derive(Debug, PartialEq)]
enum FetchError {
    NotFound(&'static str),
}

#[test]
fn failed_load_logs_error_details() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut slot: ImageSlot<&str, Px> = ImageSlot::new();
    let req = slot.request("missing.png").unwrap();
    let ticket = req.ticket().get();
    let err = FetchError::NotFound("missing.png");
    assert_eq!(slot.complete(req.finish::<Px, _>(Err(err))), Err(FetchError::NotFound("missing.png")));

    let records = LOGGER.0.lock().unwrap();
    let warning = records
        .iter()
        .find(|(level, _)| *level == Level::Warn)
        .map(|(_, msg)| msg.as_str());
    assert_eq!(
        warning,
        Some(format!("image load {ticket} failed: NotFound(\"missing.png\")").as_str())
    );
}
