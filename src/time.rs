//! Millisecond time keeping on top of [`embedded_time`].

use crate::Error;
use embedded_time::{duration::Milliseconds, Clock};

/// Read `clock` as milliseconds since its epoch.
pub fn millis<C>(clock: &C) -> Result<u32, Error>
where
    C: Clock<T = u32>,
{
    let instant = clock.try_now()?;
    let ms = Milliseconds::<u32>::try_from(instant.duration_since_epoch())?;
    Ok(ms.0)
}

/// Milliseconds elapsed from `then` to `now`, allowing for `u32` wrap-around.
///
/// A `then` that lies ahead of `now` wraps to a large age.
pub fn elapsed_ms(now: u32, then: u32) -> u32 {
    now.wrapping_sub(then)
}
