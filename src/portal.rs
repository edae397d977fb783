//! Profile parameter definition, binding, and verification.
//!
//! A profile declares its parameters up front in a [`Context`], then binds
//! the values the portal (or the command line) supplies. Binding records
//! problems instead of failing immediately; `verify_parameters` turns any
//! recorded problem into an error after all bindings have been seen.

use std::collections::BTreeMap;

/// Value types a profile parameter can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// Free-form string value
    String,
    /// Signed integer value
    Integer,
    /// Boolean value ("true"/"false")
    Boolean,
}

/// A typed parameter value, either bound from input or defaulted.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    String(String),
    Integer(i64),
    Boolean(bool),
}

impl ParameterValue {
    fn parameter_type(&self) -> ParameterType {
        match self {
            ParameterValue::String(_) => ParameterType::String,
            ParameterValue::Integer(_) => ParameterType::Integer,
            ParameterValue::Boolean(_) => ParameterType::Boolean,
        }
    }
}

/// Declaration of a single profile parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    pub long_description: Option<String>,
    pub parameter_type: ParameterType,
    pub default: ParameterValue,
}

/// Parameter binding and verification errors.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    #[error("parameter '{0}' is defined more than once")]
    Duplicate(String),
    #[error("parameter '{name}' declares type {expected:?} but its default is {found:?}")]
    DefaultTypeMismatch {
        name: String,
        expected: ParameterType,
        found: ParameterType,
    },
    #[error("unknown parameter '{0}'")]
    Unknown(String),
    #[error("invalid value '{value}' for parameter '{name}': {reason}")]
    Invalid {
        name: String,
        value: String,
        reason: String,
    },
    #[error("parameter verification failed: {0}")]
    Verification(String),
}

/// Registry of parameter declarations plus the errors binding produced.
#[derive(Debug, Default)]
pub struct Context {
    specs: Vec<ParameterSpec>,
    binding_errors: Vec<ParameterError>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter. Names must be unique within the context.
    pub fn define_parameter(&mut self, spec: ParameterSpec) -> Result<(), ParameterError> {
        if self.specs.iter().any(|s| s.name == spec.name) {
            return Err(ParameterError::Duplicate(spec.name));
        }
        if spec.default.parameter_type() != spec.parameter_type {
            return Err(ParameterError::DefaultTypeMismatch {
                name: spec.name,
                expected: spec.parameter_type,
                found: spec.default.parameter_type(),
            });
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Bind externally supplied values, applying defaults for parameters the
    /// caller did not set. Problems are recorded for `verify_parameters`
    /// rather than aborting the bind, so all of them surface at once.
    pub fn bind_parameters(&mut self, bindings: &BTreeMap<String, String>) -> BoundParameters {
        let mut values = BTreeMap::new();

        for name in bindings.keys() {
            if !self.specs.iter().any(|s| &s.name == name) {
                self.binding_errors.push(ParameterError::Unknown(name.clone()));
            }
        }

        for spec in &self.specs {
            let value = match bindings.get(&spec.name) {
                Some(raw) => match parse_value(spec.parameter_type, raw) {
                    Ok(value) => value,
                    Err(reason) => {
                        self.binding_errors.push(ParameterError::Invalid {
                            name: spec.name.clone(),
                            value: raw.clone(),
                            reason,
                        });
                        spec.default.clone()
                    }
                },
                None => spec.default.clone(),
            };
            values.insert(spec.name.clone(), value);
        }

        BoundParameters { values }
    }

    /// Fail if any binding problem was recorded.
    pub fn verify_parameters(&self) -> Result<(), ParameterError> {
        if self.binding_errors.is_empty() {
            return Ok(());
        }
        let joined = self
            .binding_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ParameterError::Verification(joined))
    }
}

fn parse_value(parameter_type: ParameterType, raw: &str) -> Result<ParameterValue, String> {
    match parameter_type {
        ParameterType::String => {
            if raw.is_empty() {
                Err("value cannot be empty".to_string())
            } else {
                Ok(ParameterValue::String(raw.to_string()))
            }
        }
        ParameterType::Integer => raw
            .parse::<i64>()
            .map(ParameterValue::Integer)
            .map_err(|e| e.to_string()),
        ParameterType::Boolean => match raw {
            "true" => Ok(ParameterValue::Boolean(true)),
            "false" => Ok(ParameterValue::Boolean(false)),
            _ => Err("expected 'true' or 'false'".to_string()),
        },
    }
}

/// Read-only view of the bound parameter values.
#[derive(Debug)]
pub struct BoundParameters {
    values: BTreeMap<String, ParameterValue>,
}

impl BoundParameters {
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParameterValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParameterValue::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ParameterValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}
