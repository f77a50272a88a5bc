//! Shared test utilities for integration tests

use std::env;
use std::sync::Mutex;

// Global mutex to serialize environment variable modifications in tests
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// RAII guard for environment variable manipulation in tests
///
/// Restores every touched variable to its original state when dropped,
/// even if the test panics.
pub struct EnvVarGuard {
    vars: Vec<(String, Option<String>)>,
}

impl EnvVarGuard {
    /// Create a new environment variable guard
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set an environment variable and save its original value for restoration
    pub fn set(&mut self, key: &str, value: &str) {
        let original = env::var(key).ok();
        self.vars.push((key.to_string(), original));
        // env::set_var is unsafe in edition 2024 due to thread-safety concerns;
        // ENV_MUTEX serializes all mutations across the test binary
        unsafe {
            env::set_var(key, value);
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        // Restore all environment variables in reverse order
        for (key, value) in self.vars.iter().rev() {
            unsafe {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

impl Default for EnvVarGuard {
    fn default() -> Self {
        Self::new()
    }
}
