use embedded_hal::digital::InputPin;

/// Passive infrared motion sensor on a single digital input
///
/// Sampling is a single pin read: no debouncing and no history.
#[derive(Debug)]
pub struct MotionSensor<P> {
    pin: P,
    active_high: bool,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P, active_high: bool) -> Self {
        MotionSensor { pin, active_high }
    }

    /// Whether the sensor currently reports motion
    pub fn is_active(&mut self) -> Result<bool, P::Error> {
        let high = self.pin.is_high()?;
        Ok(high == self.active_high)
    }
}
