//! Line-oriented host commands
//!
//! Stand-ins for what a mobile OS would deliver: notification buttons,
//! focus and telephony callbacks, the noisy-output broadcast and profile
//! switches.
//!
//! ```text
//! play | pause | ff | rew | stop | ACTION_*
//! focus gain|loss|transient|duck
//! call ringing|offhook|idle
//! noisy
//! profile <id>
//! status
//! quit
//! ```

use std::str::FromStr;

use tale_core::ProfileId;
use tale_playback::{CallState, FocusChange, PlaybackError, TransportAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Transport(TransportAction),
    Focus(FocusChange),
    Call(CallState),
    BecomingNoisy,
    SwitchProfile(ProfileId),
    Status,
    Quit,
}

impl FromStr for HostCommand {
    type Err = PlaybackError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || PlaybackError::InvalidCommand(line.trim().to_string());
        let mut words = line.split_whitespace();
        let head = words.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let arg = words.next().map(str::to_ascii_lowercase);

        if words.next().is_some() {
            return Err(invalid());
        }

        let command = match (head.as_str(), arg.as_deref()) {
            ("play", None) => Self::Transport(TransportAction::Play),
            ("pause", None) => Self::Transport(TransportAction::Pause),
            ("ff", None) => Self::Transport(TransportAction::FastForward),
            ("rew", None) => Self::Transport(TransportAction::Rewind),
            ("stop", None) => Self::Transport(TransportAction::Stop),

            ("focus", Some("gain")) => Self::Focus(FocusChange::Gained),
            ("focus", Some("loss")) => Self::Focus(FocusChange::LostPermanent),
            ("focus", Some("transient")) => Self::Focus(FocusChange::LostTransient),
            ("focus", Some("duck")) => Self::Focus(FocusChange::LostTransientCanDuck),

            ("call", Some("ringing")) => Self::Call(CallState::Ringing),
            ("call", Some("offhook")) => Self::Call(CallState::OffHook),
            ("call", Some("idle")) => Self::Call(CallState::Idle),

            ("noisy", None) => Self::BecomingNoisy,
            ("profile", Some(id)) => Self::SwitchProfile(id.parse().map_err(|_| invalid())?),
            ("status", None) => Self::Status,
            ("quit", None) => Self::Quit,

            (action, None) if action.starts_with("action_") => {
                Self::Transport(action.parse().map_err(|_| invalid())?)
            }
            _ => return Err(invalid()),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> HostCommand {
        line.parse().unwrap()
    }

    #[test]
    fn transport_words_and_action_names() {
        assert_eq!(parse("play"), HostCommand::Transport(TransportAction::Play));
        assert_eq!(parse("  FF "), HostCommand::Transport(TransportAction::FastForward));
        assert_eq!(parse("rew"), HostCommand::Transport(TransportAction::Rewind));
        assert_eq!(
            parse("ACTION_PAUSE"),
            HostCommand::Transport(TransportAction::Pause)
        );
        assert_eq!(
            parse("ACTION_STOP"),
            HostCommand::Transport(TransportAction::Stop)
        );
    }

    #[test]
    fn signals() {
        assert_eq!(
            parse("focus duck"),
            HostCommand::Focus(FocusChange::LostTransientCanDuck)
        );
        assert_eq!(
            parse("focus loss"),
            HostCommand::Focus(FocusChange::LostPermanent)
        );
        assert_eq!(parse("call OffHook"), HostCommand::Call(CallState::OffHook));
        assert_eq!(parse("noisy"), HostCommand::BecomingNoisy);
    }

    #[test]
    fn profile_switch_takes_an_id() {
        assert_eq!(
            parse("profile 3"),
            HostCommand::SwitchProfile(ProfileId::new(3))
        );
        assert!("profile".parse::<HostCommand>().is_err());
        assert!("profile three".parse::<HostCommand>().is_err());
    }

    #[test]
    fn unknown_input_is_invalid() {
        for line in ["", "jump", "ACTION_LOUDER", "focus maybe", "play now", "call"] {
            let err = line.parse::<HostCommand>().unwrap_err();
            assert!(matches!(err, PlaybackError::InvalidCommand(_)), "{line}");
        }
    }
}
