//! Typed accessors over the snapshot
//!
//! Each type comes in two kinds. `get_*` returns a [`ConfigError`] the caller
//! can handle. `must_get_*` is for configuration a service cannot start
//! without: it logs the failure and panics with a message naming the service
//! and the key.

use super::Loader;
use crate::decode::{self, DecodeResult};
use crate::error::{ConfigError, Result};
use crate::store::ParameterStore;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rustls::sign::CertifiedKey;
use serde::de::DeserializeOwned;
use std::time::Duration;

impl<S: ParameterStore> Loader<S> {
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.decode(key, "a bool", decode::parse_bool)
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.decode(key, "an int", decode::parse_int)
    }

    pub fn get_duration(&self, key: &str) -> Result<Duration> {
        self.decode(key, "a duration", decode::parse_duration)
    }

    pub fn get_object<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.decode(key, "a json object", decode::parse_object::<T>)
    }

    pub fn get_public_key(&self, key: &str) -> Result<DecodingKey> {
        self.decode(key, "a public key", decode::parse_rsa_public_key)
    }

    pub fn get_private_key(&self, key: &str) -> Result<EncodingKey> {
        self.decode(key, "a private key", decode::parse_rsa_private_key)
    }

    /// Certificate at `cert_key` paired with the private key at `private_key_key`.
    pub fn get_certificate(&self, cert_key: &str, private_key_key: &str) -> Result<CertifiedKey> {
        let cert_pem = self.get(cert_key)?;
        let key_pem = self.get(private_key_key)?;
        decode::parse_certificate(&cert_pem, &key_pem)
            .map_err(|reason| self.invalid(cert_key, "a certificate", reason))
    }

    /// Reads the process environment directly; the store is not involved.
    pub fn get_env(&self, name: &str) -> Result<String> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnv {
            service: self.service.clone(),
            name: name.to_string(),
        })
    }

    pub fn must_get_string(&self, key: &str) -> String {
        self.required(self.get_string(key))
    }

    pub fn must_get_bool(&self, key: &str) -> bool {
        self.required(self.get_bool(key))
    }

    pub fn must_get_int(&self, key: &str) -> i64 {
        self.required(self.get_int(key))
    }

    pub fn must_get_duration(&self, key: &str) -> Duration {
        self.required(self.get_duration(key))
    }

    pub fn must_get_object<T: DeserializeOwned>(&self, key: &str) -> T {
        self.required(self.get_object(key))
    }

    pub fn must_get_public_key(&self, key: &str) -> DecodingKey {
        self.required(self.get_public_key(key))
    }

    pub fn must_get_private_key(&self, key: &str) -> EncodingKey {
        self.required(self.get_private_key(key))
    }

    pub fn must_get_certificate(&self, cert_key: &str, private_key_key: &str) -> CertifiedKey {
        self.required(self.get_certificate(cert_key, private_key_key))
    }

    pub fn must_get_env(&self, name: &str) -> String {
        self.required(self.get_env(name))
    }

    fn decode<T, F>(&self, key: &str, expected: &'static str, parse: F) -> Result<T>
    where
        F: FnOnce(&str) -> DecodeResult<T>,
    {
        let raw = self.get(key)?;
        parse(&raw).map_err(|reason| self.invalid(key, expected, reason))
    }

    fn invalid(&self, key: &str, expected: &'static str, reason: String) -> ConfigError {
        ConfigError::InvalidValue {
            service: self.service.clone(),
            key: key.to_string(),
            expected,
            reason,
        }
    }

    fn required<T>(&self, result: Result<T>) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                tracing::error!(
                    service = %self.service,
                    key = err.key().unwrap_or_default(),
                    error = %err,
                    "required configuration unavailable"
                );
                panic!("{err}");
            }
        }
    }
}
