//! Request validation against a capability model
//!
//! Plays the role a protocol schema check would: values must fit the type
//! and choices the help text declared. Keys naming no option are left to the
//! builder, which ignores them.

use crate::capability::{ArgValue, CapabilityModel, CliOption, OptionType};
use crate::invocation::InvocationRequest;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Argument '{name}' expects a {expected} value, got {actual}")]
    TypeMismatch {
        name: String,
        expected: OptionType,
        actual: &'static str,
    },

    #[error("Argument '{name}' must be one of [{}], got '{value}'", .choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },
}

/// Validator for invocation requests
///
/// Pure domain check, no I/O.
pub trait RequestValidator: Send + Sync {
    fn validate(
        &self,
        request: &InvocationRequest,
        model: &CapabilityModel,
    ) -> Result<(), RequestError>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultRequestValidator;

impl RequestValidator for DefaultRequestValidator {
    fn validate(
        &self,
        request: &InvocationRequest,
        model: &CapabilityModel,
    ) -> Result<(), RequestError> {
        for (key, value) in request.iter() {
            let Some(option) = model.option(key) else {
                continue;
            };
            check_type(option, value)?;
            check_choice(option, value)?;
        }
        Ok(())
    }
}

fn check_type(option: &CliOption, value: &ArgValue) -> Result<(), RequestError> {
    let ok = match option.option_type {
        OptionType::Boolean => matches!(value, ArgValue::Bool(_)),
        OptionType::Number => match value {
            ArgValue::Number(_) => true,
            ArgValue::String(s) => s.trim().parse::<f64>().is_ok(),
            ArgValue::Bool(_) => false,
        },
        OptionType::String | OptionType::File => !matches!(value, ArgValue::Bool(_)),
    };
    if ok {
        Ok(())
    } else {
        Err(RequestError::TypeMismatch {
            name: option.name.clone(),
            expected: option.option_type,
            actual: value.kind(),
        })
    }
}

fn check_choice(option: &CliOption, value: &ArgValue) -> Result<(), RequestError> {
    if option.choices.is_empty() || value.is_blank() {
        return Ok(());
    }
    let value = value.to_string();
    if option.choices.iter().any(|c| *c == value) {
        Ok(())
    } else {
        Err(RequestError::InvalidChoice {
            name: option.name.clone(),
            value,
            choices: option.choices.clone(),
        })
    }
}
