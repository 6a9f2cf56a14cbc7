//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use once_cell::sync::Lazy;

/// The time given to tasks that are created without an explicit one.
/// Feel free to override it when initing this library.
pub static DEFAULT_TASK_TIME: Lazy<Arc<Mutex<NaiveTime>>> =
    Lazy::new(|| Arc::new(Mutex::new(NaiveTime::from_hms_opt(9, 0, 0).unwrap(/* constant, known to be valid */))));
