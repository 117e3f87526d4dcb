//! Boot-time random seed for the startup temperature draw.
//!
//! The draw only has to differ between boots; it is not used for anything
//! security-relevant.  Host builds pass an explicit seed to
//! `ControlService::from_seed` instead.

/// Hardware RNG.  Before the radio is up the ESP32 RNG is a PRNG seeded
/// from boot-time noise, which is enough here.
pub fn boot_seed() -> u32 {
    // SAFETY: esp_random has no preconditions.
    unsafe { esp_idf_svc::sys::esp_random() }
}
