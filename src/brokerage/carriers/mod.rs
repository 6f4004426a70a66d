//! Carrier verification against a motor-carrier registry.

mod domain;
mod fmcsa;
mod registry;
mod verifier;

pub use domain::{CarrierRecord, CarrierStatus, CarrierVerificationResult};
pub use fmcsa::FmcsaCarrierRegistry;
pub use registry::{CarrierRegistry, RegistryError, StaticCarrierRegistry, DEFAULT_ALLOW_LIST};
pub use verifier::CarrierVerifier;
