//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check scan roots are usable relative directory names
//! - Validate the bind address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::Path;

use crate::config::schema::ServerConfig;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyRoot,
    AbsoluteRoot(String),
    DuplicateRoot(String),
    EmptySearchRoot,
    InvalidBindAddress(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyRoot => write!(f, "scan root must not be empty"),
            ValidationError::AbsoluteRoot(root) => {
                write!(f, "scan root {:?} must be relative to the search root", root)
            }
            ValidationError::DuplicateRoot(root) => {
                write!(f, "scan root {:?} is listed more than once", root)
            }
            ValidationError::EmptySearchRoot => write!(f, "search_root must not be empty"),
            ValidationError::InvalidBindAddress(address) => {
                write!(f, "bind address {:?} is not a valid socket address", address)
            }
        }
    }
}

/// Validate a parsed configuration. Collects every violation.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, root) in config.scan.roots.iter().enumerate() {
        if root.is_empty() {
            errors.push(ValidationError::EmptyRoot);
        } else if Path::new(root).is_absolute() {
            errors.push(ValidationError::AbsoluteRoot(root.clone()));
        }
        if config.scan.roots[..index].contains(root) {
            errors.push(ValidationError::DuplicateRoot(root.clone()));
        }
    }

    if let Some(search_root) = &config.scan.search_root {
        if search_root.is_empty() {
            errors.push(ValidationError::EmptySearchRoot);
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ListenerConfig, ScanConfig};

    fn config(roots: Vec<&str>, bind: &str) -> ServerConfig {
        ServerConfig {
            name: None,
            debug: false,
            scan: ScanConfig {
                roots: roots.into_iter().map(String::from).collect(),
                search_root: None,
            },
            listener: ListenerConfig {
                bind_address: bind.to_string(),
            },
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let errors = validate_config(&config(vec!["", "/abs", "demo", "demo"], "nonsense"))
            .expect_err("invalid config");
        assert!(errors.contains(&ValidationError::EmptyRoot));
        assert!(errors.contains(&ValidationError::AbsoluteRoot("/abs".to_string())));
        assert!(errors.contains(&ValidationError::DuplicateRoot("demo".to_string())));
        assert!(errors.contains(&ValidationError::InvalidBindAddress(
            "nonsense".to_string()
        )));
    }

    #[test]
    fn relative_roots_and_real_addresses_pass() {
        assert!(validate_config(&config(vec!["demo", "extra"], "127.0.0.1:0")).is_ok());
    }
}
