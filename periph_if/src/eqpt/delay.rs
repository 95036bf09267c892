//! # Busy-wait delays

/// Blocking delay primitive.
///
/// Implementations shall busy-wait rather than yield, the control paths rely
/// on delays being short and predictable.
pub trait Delay {
    fn delay_ms(&mut self, ms: u32);

    fn delay_us(&mut self, us: u32);
}
