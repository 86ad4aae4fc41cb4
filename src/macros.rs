// Call-site capturing wrappers around `Logger::log`

/// Log at an explicit level: `log_at!(logger, Level::Info, "x = {}", x)`
#[macro_export]
macro_rules! log_at {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            $crate::CallSite::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log_at!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Write a FATAL record and exit with status 1
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal_at(
            $crate::CallSite::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
}

/// Write a PANIC record and panic with the message
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panic_at(
            $crate::CallSite::new(file!(), line!()),
            format_args!($($arg)+),
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{Destination, Level, Logger};
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_macros_capture_call_site() {
        let capture = Capture::default();
        let logger = Logger::default();
        logger.set_stdout(Destination::new(capture.clone()));

        let line = line!() + 1;
        log_warn!(logger, "disk at {}%", 91).unwrap();
        log_at!(&logger, Level::Error, "plain").unwrap();

        let text = String::from_utf8(capture.0.lock().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(&format!(" WARN macros.rs:{} => disk at 91%", line)));
        assert!(lines[1].contains(" ERROR macros.rs:"));
    }

    #[test]
    fn test_macros_respect_level() {
        let capture = Capture::default();
        let logger = Logger::default();
        logger.set_stdout(Destination::new(capture.clone()));
        logger.set_level(Level::Info);

        log_debug!(logger, "hidden").unwrap();
        log_info!(logger, "shown").unwrap();
        log_error!(logger, "shown too").unwrap();

        let text = String::from_utf8(capture.0.lock().clone()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
