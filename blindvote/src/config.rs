use std::env::var;

/// Default bound on the nonce search in election token and R derivation.
///
/// Each attempt succeeds with probability of roughly 1/16, so reaching the
/// bound indicates a broken modulus rather than bad luck.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Environment variable overriding [`DEFAULT_MAX_ITERATIONS`].
pub const MAX_ITERATIONS_VAR: &str = "BLINDVOTE_MAX_DERIVATION_ITERATIONS";

/// Tunables for the deterministic derivation searches.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationConfig {
    pub max_iterations: usize,
}

impl DerivationConfig {
    pub fn new(max_iterations: usize) -> Self {
        DerivationConfig { max_iterations }
    }

    /// Read the configuration from the environment, falling back to defaults
    /// for unset or unparsable values.
    pub fn from_env() -> Self {
        let max_iterations = match var(MAX_ITERATIONS_VAR) {
            Ok(val) => match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!(
                        "ignoring invalid {}={:?}, using {}",
                        MAX_ITERATIONS_VAR,
                        val,
                        DEFAULT_MAX_ITERATIONS
                    );
                    DEFAULT_MAX_ITERATIONS
                }
            },
            Err(_e) => DEFAULT_MAX_ITERATIONS,
        };

        DerivationConfig { max_iterations }
    }
}

impl Default for DerivationConfig {
    fn default() -> Self {
        DerivationConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(DerivationConfig::default().max_iterations, 10_000);
        assert_eq!(DerivationConfig::new(5).max_iterations, 5);
    }
}
