// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// `tracing-subscriber` writer that sends each formatted event to logcat.

use std::ffi::{c_char, c_int, CString};
use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Logcat tag for every bridge record.
const TAG: &str = "opensurge";

// android/log.h priorities.
const ANDROID_LOG_VERBOSE: c_int = 2;
const ANDROID_LOG_DEBUG: c_int = 3;
const ANDROID_LOG_INFO: c_int = 4;
const ANDROID_LOG_WARN: c_int = 5;
const ANDROID_LOG_ERROR: c_int = 6;

#[link(name = "log")]
unsafe extern "C" {
    fn __android_log_write(prio: c_int, tag: *const c_char, text: *const c_char) -> c_int;
}

/// Hands out one [`LogcatLine`] per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logcat;

/// Buffers one formatted event and writes it to logcat when dropped.
pub struct LogcatLine {
    priority: c_int,
    buf: Vec<u8>,
}

impl io::Write for LogcatLine {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LogcatLine {
    fn drop(&mut self) {
        while self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.is_empty() {
            return;
        }
        self.buf.retain(|&b| b != 0);
        let (Ok(tag), Ok(text)) = (CString::new(TAG), CString::new(std::mem::take(&mut self.buf)))
        else {
            return;
        };
        // SAFETY: both pointers are valid NUL-terminated strings for the
        // duration of the call.
        unsafe {
            __android_log_write(self.priority, tag.as_ptr(), text.as_ptr());
        }
    }
}

fn priority(level: &Level) -> c_int {
    match *level {
        Level::TRACE => ANDROID_LOG_VERBOSE,
        Level::DEBUG => ANDROID_LOG_DEBUG,
        Level::INFO => ANDROID_LOG_INFO,
        Level::WARN => ANDROID_LOG_WARN,
        Level::ERROR => ANDROID_LOG_ERROR,
    }
}

impl<'a> MakeWriter<'a> for Logcat {
    type Writer = LogcatLine;

    fn make_writer(&'a self) -> Self::Writer {
        LogcatLine {
            priority: ANDROID_LOG_INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        LogcatLine {
            priority: priority(meta.level()),
            buf: Vec::new(),
        }
    }
}
