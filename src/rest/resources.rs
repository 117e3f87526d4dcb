//! Resource catalogue and the runtime capability set.
//!
//! Every resource the firmware can serve is described once in
//! [`DESCRIPTORS`].  Which of them are live is decided at startup by the
//! [`ResourceSet`] carried in the configuration.
//!
//! | Resource               | Path          | Methods  | Default |
//! |------------------------|---------------|----------|---------|
//! | `Status`               | `status`      | GET      | on      |
//! | `TemperatureObserve`   | `temperature` | GET, obs | on      |
//! | `Temperature`          | `temperature` | GET      | off     |
//! | `Actuators`            | `leds`        | POST/PUT | on      |
//!
//! The two temperature resources share a path; the observable one wins
//! when both are active.

use core::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{MAX_PAYLOAD, Method};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Status,
    Temperature,
    TemperatureObserve,
    Actuators,
}

/// Static description of one resource.
#[derive(Debug)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub path: &'static str,
    /// Bitmask of [`Method::bit`].
    pub methods: u8,
    /// Link-format attributes published under `.well-known/core`.
    pub attributes: &'static str,
}

impl ResourceDescriptor {
    pub fn allows(&self, method: Method) -> bool {
        self.methods & method.bit() != 0
    }
}

/// Observable resource listed first so it shadows the plain one.
pub static DESCRIPTORS: [ResourceDescriptor; 4] = [
    ResourceDescriptor {
        kind: ResourceKind::Status,
        path: "status",
        methods: Method::Get.bit(),
        attributes: "title=\"Thermostat status\";rt=\"Data\"",
    },
    ResourceDescriptor {
        kind: ResourceKind::TemperatureObserve,
        path: "temperature",
        methods: Method::Get.bit(),
        attributes: "title=\"Temperature observe\";obs",
    },
    ResourceDescriptor {
        kind: ResourceKind::Temperature,
        path: "temperature",
        methods: Method::Get.bit(),
        attributes: "title=\"Temperature sensor\";rt=\"Data\"",
    },
    ResourceDescriptor {
        kind: ResourceKind::Actuators,
        path: "leds",
        methods: Method::Post.bit() | Method::Put.bit(),
        attributes: "title=\"LEDs: ?color=r|g|b, POST/PUT mode=on|off\";rt=\"Control\"",
    },
];

/// Path of the discovery resource; always served.
pub const WELL_KNOWN_CORE: &str = ".well-known/core";

/// Which resources are active on this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSet {
    pub status: bool,
    pub temperature: bool,
    pub temperature_observe: bool,
    pub actuators: bool,
}

impl Default for ResourceSet {
    fn default() -> Self {
        Self {
            status: true,
            temperature: false,
            temperature_observe: true,
            actuators: true,
        }
    }
}

impl ResourceSet {
    pub const fn none() -> Self {
        Self {
            status: false,
            temperature: false,
            temperature_observe: false,
            actuators: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.status || self.temperature || self.temperature_observe || self.actuators)
    }

    pub fn contains(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Status => self.status,
            ResourceKind::Temperature => self.temperature,
            ResourceKind::TemperatureObserve => self.temperature_observe,
            ResourceKind::Actuators => self.actuators,
        }
    }

    /// Active descriptors in catalogue order.
    pub fn active(&self) -> impl Iterator<Item = &'static ResourceDescriptor> + '_ {
        DESCRIPTORS.iter().filter(|d| self.contains(d.kind))
    }

    /// Active descriptor serving `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<&'static ResourceDescriptor> {
        self.active().find(|d| d.path == path)
    }

    /// Whether periodic temperature pushes have anyone to reach.
    pub fn is_observable(&self) -> bool {
        self.temperature_observe
    }

    /// CoRE link-format listing of the active resources.
    ///
    /// Entries that would overflow the payload are left out.
    pub fn link_format(&self) -> heapless::String<MAX_PAYLOAD> {
        let mut out = heapless::String::new();
        let mut seen: heapless::Vec<&str, 4> = heapless::Vec::new();
        for d in self.active() {
            if seen.contains(&d.path) {
                continue;
            }
            let mut entry: heapless::String<MAX_PAYLOAD> = heapless::String::new();
            let sep = if out.is_empty() { "" } else { "," };
            if write!(entry, "{sep}</{}>;{}", d.path, d.attributes).is_err()
                || out.push_str(&entry).is_err()
            {
                break;
            }
            let _ = seen.push(d.path);
        }
        out
    }
}
