//! Digital input pins through the Linux sysfs GPIO interface
//!
//! The layout under the sysfs root (normally `/sys/class/gpio`) is:
//! ```text
//! export          write a pin number here to make gpioN appear
//! gpioN/direction "in" or "out"
//! gpioN/value     "0" or "1"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin};
use thiserror::Error;

// The pin directory is created by the kernel, but udev may need a moment
// before it becomes accessible to non-root users.
const EXPORT_POLL_INTERVAL: Duration = Duration::from_millis(50);
const EXPORT_POLL_ATTEMPTS: u32 = 20;

const DIRECTION_IN: &str = "in";

#[derive(Error, Debug)]
pub enum GpioError {
    #[error("could not export GPIO {pin} via {path}: {source}")]
    Export {
        pin: u32,
        path: PathBuf,
        source: io::Error,
    },
    #[error("GPIO {pin} did not appear under {path} after export")]
    NotExported { pin: u32, path: PathBuf },
    #[error("could not configure GPIO {pin} as input: {source}")]
    Direction { pin: u32, source: io::Error },
    #[error("could not read GPIO {pin}: {source}")]
    Read { pin: u32, source: io::Error },
    #[error("unexpected value '{value}' read from GPIO {pin}")]
    Value { pin: u32, value: String },
}

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Debug)]
pub struct SysfsPin {
    pin: u32,
    value_path: PathBuf,
}

impl SysfsPin {
    /// Export `pin` (if needed) and configure it as an input
    pub fn open(sysfs_root: impl AsRef<Path>, pin: u32) -> Result<Self, GpioError> {
        let root = sysfs_root.as_ref();
        let pin_dir = root.join(format!("gpio{pin}"));

        if !pin_dir.is_dir() {
            export(root, &pin_dir, pin)?;
        }
        ensure_input(&pin_dir, pin)?;

        log::debug!("Opened GPIO {} at {}", pin, pin_dir.display());
        Ok(SysfsPin {
            pin,
            value_path: pin_dir.join("value"),
        })
    }

    fn read_level(&self) -> Result<bool, GpioError> {
        let raw = fs::read_to_string(&self.value_path).map_err(|source| GpioError::Read {
            pin: self.pin,
            source,
        })?;
        match raw.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(GpioError::Value {
                pin: self.pin,
                value: other.to_string(),
            }),
        }
    }
}

fn export(root: &Path, pin_dir: &Path, pin: u32) -> Result<(), GpioError> {
    let export_path = root.join("export");
    log::debug!("Exporting GPIO {} via {}", pin, export_path.display());
    fs::write(&export_path, pin.to_string()).map_err(|source| GpioError::Export {
        pin,
        path: export_path,
        source,
    })?;

    for _ in 0..EXPORT_POLL_ATTEMPTS {
        if pin_dir.is_dir() {
            return Ok(());
        }
        thread::sleep(EXPORT_POLL_INTERVAL);
    }
    Err(GpioError::NotExported {
        pin,
        path: pin_dir.to_path_buf(),
    })
}

fn ensure_input(pin_dir: &Path, pin: u32) -> Result<(), GpioError> {
    let direction_path = pin_dir.join("direction");
    // Leave the pin alone if it is already an input; writing may need privileges
    if let Ok(current) = fs::read_to_string(&direction_path) {
        if current.trim() == DIRECTION_IN {
            return Ok(());
        }
    }
    fs::write(&direction_path, DIRECTION_IN).map_err(|source| GpioError::Direction { pin, source })
}

impl ErrorType for SysfsPin {
    type Error = GpioError;
}

impl InputPin for SysfsPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read_level()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read_level().map(|high| !high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_pin(root: &Path, pin: u32, direction: &str, value: &str) {
        let dir = root.join(format!("gpio{pin}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("direction"), direction).unwrap();
        fs::write(dir.join("value"), value).unwrap();
    }

    #[test]
    fn reads_high_and_low() {
        let tempdir = tempfile::tempdir().unwrap();
        fake_pin(tempdir.path(), 4, "in\n", "1\n");

        let mut pin = SysfsPin::open(tempdir.path(), 4).unwrap();
        assert!(pin.is_high().unwrap());
        assert!(!pin.is_low().unwrap());

        fs::write(tempdir.path().join("gpio4/value"), "0\n").unwrap();
        assert!(!pin.is_high().unwrap());
        assert!(pin.is_low().unwrap());
    }

    #[test]
    fn switches_output_pin_to_input() {
        let tempdir = tempfile::tempdir().unwrap();
        fake_pin(tempdir.path(), 17, "out\n", "0\n");

        SysfsPin::open(tempdir.path(), 17).unwrap();
        assert_eq!(
            fs::read_to_string(tempdir.path().join("gpio17/direction")).unwrap(),
            "in"
        );
    }

    #[test]
    fn export_without_kernel_fails() {
        let tempdir = tempfile::tempdir().unwrap();
        // A plain file accepts the write, but nothing creates gpio4/
        fs::write(tempdir.path().join("export"), "").unwrap();

        let err = SysfsPin::open(tempdir.path(), 4).unwrap_err();
        assert!(matches!(err, GpioError::NotExported { pin: 4, .. }));
        assert_eq!(fs::read_to_string(tempdir.path().join("export")).unwrap(), "4");
    }

    #[test]
    fn missing_sysfs_root() {
        let tempdir = tempfile::tempdir().unwrap();
        let err = SysfsPin::open(tempdir.path().join("nope"), 4).unwrap_err();
        assert!(matches!(err, GpioError::Export { pin: 4, .. }));
    }

    #[test]
    fn garbage_value() {
        let tempdir = tempfile::tempdir().unwrap();
        fake_pin(tempdir.path(), 4, "in", "x");

        let mut pin = SysfsPin::open(tempdir.path(), 4).unwrap();
        assert!(matches!(pin.is_high(), Err(GpioError::Value { .. })));
    }
}
