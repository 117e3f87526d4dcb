//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                    |
//! |----------------|----------------|--------------------------------|
//! | `hardware`     | ActuatorPort   | R/G/B indicator LEDs (GPIO)    |
//! | `log_sink`     | EventSink      | Serial log output              |
//! | `notify`       | NotifySink     | Notify channel / serial log    |
//! | `config_store` | ConfigPort     | NVS blob / in-memory store     |
//! | `console`      | -              | Request channel (stdin lines)  |
//! | `time`         | -              | ESP32 high-resolution timer    |
//! | `entropy`      | -              | ESP32 hardware RNG             |

pub mod config_store;
pub mod console;
#[cfg(feature = "espidf")]
pub mod entropy;
pub mod hardware;
pub mod log_sink;
pub mod notify;
pub mod time;
