use crate::orchestrator::DEFAULT_CONCURRENCY;
use crate::out::OutMode;

pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Runtime settings for the collector binary, all from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Ceiling on concurrent scope tasks (`INVENTORY_CONCURRENCY`).
    pub concurrency: usize,
    /// Where the report goes (`INVENTORY_OUT`: `stdout` | `http`).
    pub out: OutMode,
    /// POST target when `out` is `http` (`INVENTORY_ENDPOINT`).
    pub endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        let concurrency = env_or("INVENTORY_CONCURRENCY", "")
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_CONCURRENCY);

        Self {
            concurrency,
            out: OutMode::parse(&env_or("INVENTORY_OUT", "stdout")),
            endpoint: env_or(
                "INVENTORY_ENDPOINT",
                "http://localhost:8080/api/inventory",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::env_or;

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(env_or("INVENTORY_TEST_UNSET_KEY", "fallback"), "fallback");
    }
}
