//! Persistent configuration store.
//!
//! Implements [`ConfigPort`] on top of a single postcard-encoded blob.
//!
//! - **espidf**: the blob lives under key `cfg` in the `thermostat` NVS
//!   namespace on the default partition.
//! - **host**: the blob is held in memory (tests and simulation).
//!
//! Every config is range-checked before it is written and again after it
//! is read back; a blob that decodes but fails validation is rejected.

use core::cell::RefCell;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ThermostatConfig;

#[cfg(feature = "espidf")]
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};

#[cfg(feature = "espidf")]
const CONFIG_NAMESPACE: &str = "thermostat";
#[cfg(feature = "espidf")]
const CONFIG_KEY: &str = "cfg";

/// Largest blob accepted for writing.
const MAX_BLOB_SIZE: usize = 256;

pub struct FlashConfigStore {
    #[cfg(feature = "espidf")]
    nvs: RefCell<EspNvs<NvsDefault>>,
    #[cfg(not(feature = "espidf"))]
    blob: RefCell<Option<Vec<u8>>>,
}

#[cfg(feature = "espidf")]
impl FlashConfigStore {
    pub fn new(partition: EspDefaultNvsPartition) -> Result<Self, ConfigError> {
        let nvs = EspNvs::new(partition, CONFIG_NAMESPACE, true).map_err(|e| {
            warn!("ConfigStore: NVS open failed: {}", e);
            ConfigError::IoError
        })?;
        info!("ConfigStore: NVS namespace '{}' open", CONFIG_NAMESPACE);
        Ok(Self {
            nvs: RefCell::new(nvs),
        })
    }

    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let nvs = self.nvs.borrow();
        match nvs.get_blob(CONFIG_KEY, &mut buf) {
            Ok(found) => Ok(found.map(<[u8]>::to_vec)),
            Err(e) => {
                warn!("ConfigStore: NVS read error {}", e);
                Err(ConfigError::IoError)
            }
        }
    }

    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.nvs
            .borrow_mut()
            .set_blob(CONFIG_KEY, bytes)
            .map_err(|e| {
                warn!("ConfigStore: NVS write error {}", e);
                ConfigError::IoError
            })
    }
}

#[cfg(not(feature = "espidf"))]
impl Default for FlashConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(feature = "espidf"))]
impl FlashConfigStore {
    /// Empty in-memory store.
    pub fn new() -> Self {
        info!("ConfigStore: simulation backend");
        Self {
            blob: RefCell::new(None),
        }
    }

    /// Store pre-loaded with raw bytes (for corruption tests).
    pub fn from_blob(bytes: Vec<u8>) -> Self {
        Self {
            blob: RefCell::new(Some(bytes)),
        }
    }

    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        Ok(self.blob.borrow().clone())
    }

    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

impl ConfigPort for FlashConfigStore {
    fn load(&self) -> Result<ThermostatConfig, ConfigError> {
        let Some(bytes) = self.read_blob()? else {
            info!("ConfigStore: no stored config");
            return Err(ConfigError::NotFound);
        };
        let cfg: ThermostatConfig =
            postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        info!("ConfigStore: loaded config ({} bytes)", bytes.len());
        Ok(cfg)
    }

    fn save(&self, config: &ThermostatConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        if bytes.len() > MAX_BLOB_SIZE {
            return Err(ConfigError::StorageFull);
        }
        self.write_blob(&bytes)?;
        info!("ConfigStore: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
