// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use duration_string::DurationString;
use erp_auth_web3::{
    DEFAULT_CHALLENGE_TTL_MINUTES,
    DEFAULT_JWT_ISSUER,
    DEFAULT_SIGNING_DOMAIN,
    JwtSessionConfig,
    Web3AuthConfig,
};
use observability::init::LoggingConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Cli, ExpiredEntriesEvictorConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_PORT: u16 = 8080;

const VERBOSE_LOGGING_LEVEL: &str = "debug";
const VERY_VERBOSE_LOGGING_LEVEL: &str = "trace";

const SECS_IN_MINUTE: u64 = 60;
const SECS_IN_HOUR: u64 = 60 * SECS_IN_MINUTE;
const SECS_IN_DAY: u64 = 24 * SECS_IN_HOUR;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Root of the YAML configuration file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiServerConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub eviction: EvictionConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Embedded into every login message
    pub signing_domain: String,

    /// Lifetime of an issued login challenge
    pub challenge_ttl: DurationString,

    /// Value of the `iss` claim of issued tokens
    pub jwt_issuer: String,

    pub access_token_ttl: DurationString,

    /// Also bounds the total lifetime of a session
    pub refresh_token_ttl: DurationString,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let challenge_ttl_secs = DEFAULT_CHALLENGE_TTL_MINUTES.unsigned_abs() * SECS_IN_MINUTE;

        Self {
            signing_domain: DEFAULT_SIGNING_DOMAIN.to_string(),
            challenge_ttl: Duration::from_secs(challenge_ttl_secs).into(),
            jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
            access_token_ttl: Duration::from_secs(SECS_IN_HOUR).into(),
            refresh_token_ttl: Duration::from_secs(7 * SECS_IN_DAY).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvictionConfig {
    /// How often expired challenges and sessions are purged
    pub interval: DurationString,
}

impl Default for EvictionConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(SECS_IN_MINUTE).into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl ApiServerConfig {
    /// Loads the config file if one is given, defaults otherwise
    pub fn load(maybe_path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = maybe_path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is not a valid mapping for serde_yaml
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content)
    }

    /// Command line flags win over the file
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(address) = cli.address {
            self.server.address = address;
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(format) = cli.log_format {
            self.logging.format = format;
        }
        match cli.verbose {
            0 => {}
            1 => VERBOSE_LOGGING_LEVEL.clone_into(&mut self.logging.level),
            _ => VERY_VERBOSE_LOGGING_LEVEL.clone_into(&mut self.logging.level),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let domain = &self.auth.signing_domain;
        if domain.trim().is_empty() || domain.contains(['\n', '\r']) {
            return Err(ConfigError::invalid(
                "auth.signing_domain",
                "must be a non-empty single line",
            ));
        }

        for (field, value) in [
            ("auth.challenge_ttl", self.auth.challenge_ttl),
            ("auth.access_token_ttl", self.auth.access_token_ttl),
            ("auth.refresh_token_ttl", self.auth.refresh_token_ttl),
            ("eviction.interval", self.eviction.interval),
        ] {
            to_chrono_duration(field, value)?;
        }

        if Duration::from(self.auth.access_token_ttl) > Duration::from(self.auth.refresh_token_ttl)
        {
            return Err(ConfigError::invalid(
                "auth.access_token_ttl",
                "must not exceed auth.refresh_token_ttl",
            ));
        }

        Ok(())
    }

    pub fn web3_auth_config(&self) -> Result<Web3AuthConfig, ConfigError> {
        Ok(Web3AuthConfig::new(
            self.auth.signing_domain.clone(),
            to_chrono_duration("auth.challenge_ttl", self.auth.challenge_ttl)?,
        ))
    }

    /// The signing secret itself only comes from the environment
    pub fn jwt_session_config(&self) -> Result<JwtSessionConfig, ConfigError> {
        let access_token_ttl =
            to_chrono_duration("auth.access_token_ttl", self.auth.access_token_ttl)?;
        let refresh_token_ttl =
            to_chrono_duration("auth.refresh_token_ttl", self.auth.refresh_token_ttl)?;

        Ok(JwtSessionConfig {
            issuer: self.auth.jwt_issuer.clone(),
            ..JwtSessionConfig::load_from_env().with_ttls(access_token_ttl, refresh_token_ttl)
        })
    }

    pub fn evictor_config(&self) -> Result<ExpiredEntriesEvictorConfig, ConfigError> {
        Ok(ExpiredEntriesEvictorConfig {
            interval: to_chrono_duration("eviction.interval", self.eviction.interval)?,
        })
    }
}

fn to_chrono_duration(
    field: &'static str,
    value: DurationString,
) -> Result<chrono::Duration, ConfigError> {
    let std_duration = Duration::from(value);
    if std_duration.is_zero() {
        return Err(ConfigError::invalid(field, "must be greater than zero"));
    }

    chrono::Duration::from_std(std_duration)
        .map_err(|_| ConfigError::invalid(field, "is out of range"))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid value of '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
