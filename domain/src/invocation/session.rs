//! Session continuation flags

use crate::capability::{CapabilityModel, CliOption, OptionType};

/// Request key carrying the session id
pub const SESSION_ID_KEY: &str = "sessionId";
/// Flag of the synthesized session option; never emitted by the builder
pub const SESSION_ID_FLAG: &str = "--session-id";
/// Session id that asks for the most recent session
pub const LATEST_SESSION: &str = "latest";

/// The session-related flags a model exposes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionFlags<'a> {
    pub continue_flag: Option<&'a CliOption>,
    pub session: Option<&'a CliOption>,
    pub resume: Option<&'a CliOption>,
}

impl<'a> SessionFlags<'a> {
    pub fn of(model: &'a CapabilityModel) -> Self {
        Self {
            continue_flag: model.option("continue"),
            session: model.option("session").or_else(|| model.option("session-id")),
            resume: model.option("resume"),
        }
    }

    pub fn any(&self) -> bool {
        self.continue_flag.is_some() || self.session.is_some() || self.resume.is_some()
    }

    /// Tokens continuing `session_id`: `(flag, value)`.
    ///
    /// `latest` with a continue flag yields the flag alone; otherwise a
    /// session flag, then a resume flag, carry the id as their value.
    pub fn tokens(&self, session_id: &str) -> Option<(&'a str, Option<String>)> {
        if session_id == LATEST_SESSION
            && let Some(cont) = self.continue_flag
        {
            return Some((cont.flag.as_str(), None));
        }
        self.session
            .or(self.resume)
            .map(|opt| (opt.flag.as_str(), Some(session_id.to_string())))
    }
}

/// Expose a `sessionId` parameter on models that can continue sessions.
///
/// Pure function of the parsed model; a model that already has a
/// `sessionId` option, or has no session flags, is returned unchanged.
pub fn with_session_option(mut model: CapabilityModel) -> CapabilityModel {
    if model.has_option(SESSION_ID_KEY) || !SessionFlags::of(&model).any() {
        return model;
    }
    model.options.push(CliOption::new(
        SESSION_ID_KEY,
        SESSION_ID_FLAG,
        OptionType::String,
        "Session to continue; \"latest\" resumes the most recent one",
    ));
    model
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(name: &str, ty: OptionType) -> CliOption {
        CliOption::new(name, format!("--{}", name), ty, name)
    }

    #[test]
    fn test_latest_prefers_continue() {
        let model = CapabilityModel::new("claude")
            .with_option(flag("continue", OptionType::Boolean))
            .with_option(flag("resume", OptionType::String));
        let flags = SessionFlags::of(&model);

        assert_eq!(flags.tokens("latest"), Some(("--continue", None)));
        assert_eq!(
            flags.tokens("abc"),
            Some(("--resume", Some("abc".to_string())))
        );
    }

    #[test]
    fn test_session_beats_resume() {
        let model = CapabilityModel::new("opencode")
            .with_option(flag("resume", OptionType::String))
            .with_option(flag("session", OptionType::String));
        let flags = SessionFlags::of(&model);
        assert_eq!(
            flags.tokens("abc"),
            Some(("--session", Some("abc".to_string())))
        );
        // no continue flag: latest is passed as a value
        assert_eq!(
            flags.tokens("latest"),
            Some(("--session", Some("latest".to_string())))
        );
    }

    #[test]
    fn test_session_id_alias() {
        let model = CapabilityModel::new("x").with_option(flag("session-id", OptionType::String));
        assert_eq!(
            SessionFlags::of(&model).tokens("s1"),
            Some(("--session-id", Some("s1".to_string())))
        );
    }

    #[test]
    fn test_no_session_flags() {
        let model = CapabilityModel::new("x");
        assert!(SessionFlags::of(&model).tokens("abc").is_none());
        assert_eq!(with_session_option(model.clone()), model);
    }

    #[test]
    fn test_augmentation_appends_once() {
        let model = CapabilityModel::new("claude").with_option(flag("resume", OptionType::String));
        let augmented = with_session_option(model);
        let session = augmented.option(SESSION_ID_KEY).unwrap();
        assert_eq!(session.flag, "--session-id");
        assert_eq!(session.option_type, OptionType::String);

        let again = with_session_option(augmented.clone());
        assert_eq!(again.options.len(), augmented.options.len());
    }
}
