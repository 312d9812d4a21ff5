use serde::{Deserialize, Serialize};

use crate::{Curve, Point};

/// Front-end configuration: which curve to work on and the retry budgets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Curve and base point.
    pub curve: CurveSettings,
    /// Iteration caps for the unbounded-in-principle searches.
    pub limits: LimitSettings,
}

/// Curve parameters and base point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSettings {
    /// Coefficient `a` (may be negative).
    pub a: i64,
    /// Coefficient `b` (may be negative).
    pub b: i64,
    /// Prime modulus.
    pub p: u64,
    /// Base point x-coordinate.
    pub base_x: u64,
    /// Base point y-coordinate.
    pub base_y: u64,
}

/// Retry budgets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Random points sampled while looking for a prime-order generator.
    pub generator_attempts: usize,
    /// Nonces tried per ECDSA signature.
    pub signing_attempts: usize,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            a: -3,
            b: 1,
            p: 1217,
            base_x: 1202,
            base_y: 825,
        }
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            generator_attempts: 256,
            signing_attempts: crate::protocol::ecdsa::DEFAULT_MAX_SIGNING_ATTEMPTS,
        }
    }
}

impl Config {
    /// Loads configuration from `.env`, a TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `ECC_` prefix, nested keys joined by `__`
    ///    (e.g., `ECC_LIMITS__SIGNING_ATTEMPTS=128`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `ECC_CONFIG_PATH`. If not set, it
    /// defaults to `./config/ecc.toml`; a missing file is skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// ECC_CURVE__A=2
    /// ECC_CURVE__B=3
    /// ECC_CURVE__P=97
    /// ECC_CURVE__BASE_X=3
    /// ECC_CURVE__BASE_Y=6
    /// ECC_LIMITS__GENERATOR_ATTEMPTS=64
    /// ```
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::providers::{Env, Format, Serialized, Toml};
        use figment::Figment;

        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("ECC_CONFIG_PATH").unwrap_or_else(|_| "config/ecc.toml".to_string());

        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("ECC_").split("__"))
            .extract()
    }

    /// Checks the retry budgets.
    ///
    /// # Errors
    /// Returns an error message if a budget is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.limits.generator_attempts == 0 {
            return Err("limits.generator_attempts cannot be zero".to_string());
        }

        if self.limits.signing_attempts == 0 {
            return Err("limits.signing_attempts cannot be zero".to_string());
        }

        Ok(())
    }

    /// Builds the configured curve.
    ///
    /// # Errors
    /// Propagates [`crate::Error::InvalidCurveParameter`].
    pub fn build_curve(&self) -> crate::Result<Curve> {
        Curve::new(self.curve.a, self.curve.b, self.curve.p)
    }

    /// Builds the configured base point on `curve`.
    ///
    /// # Errors
    /// Propagates [`crate::Error::PointNotOnCurve`].
    pub fn build_base_point(&self, curve: &Curve) -> crate::Result<Point> {
        curve.point(self.curve.base_x, self.curve.base_y)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_describe_demo_curve() {
        let config = Config::default();
        let curve = config.build_curve().unwrap();
        let base = config.build_base_point(&curve).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(base.to_string(), "(1202, 825)");
    }

    #[test]
    fn zero_budgets_are_invalid() {
        let mut config = Config::default();
        config.limits.signing_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.generator_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn layered_sources() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ecc.toml",
                r#"
                [curve]
                a = 2
                b = 3
                p = 97
                base_x = 0
                base_y = 10

                [limits]
                generator_attempts = 8
                "#,
            )?;
            jail.set_env("ECC_CONFIG_PATH", "ecc.toml");
            jail.set_env("ECC_LIMITS__SIGNING_ATTEMPTS", "5");

            let config = Config::from_env()?;
            assert_eq!(config.curve.p, 97);
            assert_eq!(config.limits.generator_attempts, 8);
            assert_eq!(config.limits.signing_attempts, 5);

            let curve = config.build_curve().expect("curve should be valid");
            assert!(config.build_base_point(&curve).is_ok());
            Ok(())
        });
    }

    #[test]
    fn bad_base_point_is_reported() {
        let mut config = Config::default();
        config.curve.base_y = 826;
        let curve = config.build_curve().unwrap();

        assert!(matches!(
            config.build_base_point(&curve),
            Err(crate::Error::PointNotOnCurve { .. })
        ));
    }
}
