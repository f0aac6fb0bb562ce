//! Headless driver: feeds a script of input steps into an `OtpField` and
//! reports the resulting state as JSON.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use otpview_engine::{OtpField, SlotView};
use otpview_types::{OtpConfig, OtpEffect, OtpEvent, VisualState};
use serde::Serialize;
use tracing::debug;

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Event(OtpEvent),
    Reset,
    SetState(VisualState),
}

/// Parses a whitespace-separated script.
///
/// `<del>`, `<tap>`, `<reset>`, `<paste:TEXT>` and `<state:NAME>` are
/// commands; every other token is typed one character at a time.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for token in script.split_whitespace() {
        match token {
            "<del>" => steps.push(Step::Event(OtpEvent::Delete)),
            "<tap>" => steps.push(Step::Event(OtpEvent::Tap)),
            "<reset>" => steps.push(Step::Reset),
            _ => {
                if let Some(text) = command_arg(token, "paste") {
                    steps.push(Step::Event(OtpEvent::Paste(text.to_string())));
                } else if let Some(name) = command_arg(token, "state") {
                    let state = name.parse().with_context(|| format!("invalid script token `{token}`"))?;
                    steps.push(Step::SetState(state));
                } else {
                    steps.extend(token.chars().map(|c| Step::Event(OtpEvent::Char(c))));
                }
            }
        }
    }
    if steps.is_empty() {
        bail!("script is empty");
    }
    Ok(steps)
}

fn command_arg<'a>(token: &'a str, command: &str) -> Option<&'a str> {
    token.strip_prefix('<')?.strip_suffix('>')?.strip_prefix(command)?.strip_prefix(':')
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub slots: Vec<SlotView>,
    pub code: String,
    pub active_index: usize,
    pub state: VisualState,
    /// Every code the completion listener received, in order.
    pub completions: Vec<String>,
    /// Whether the last completion matched the expected code.
    pub accepted: Option<bool>,
    pub effects: Vec<OtpEffect>,
}

/// Runs `steps` against a fresh field. Each completion is compared with
/// `expected` and the field is switched to Success or Error accordingly.
pub fn run_script(config: OtpConfig, expected: &str, steps: Vec<Step>) -> Result<SimulationReport> {
    let mut field = OtpField::new(config).context("invalid OTP field configuration")?;
    let completions = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&completions);
    field.set_on_complete_listener(move |code| sink.borrow_mut().push(code.to_string()));

    let mut effects = Vec::new();
    let mut accepted = None;
    for step in steps {
        debug!(?step, "simulate step");
        let produced = match step {
            Step::Event(event) => field.handle(event),
            Step::Reset => field.reset(),
            Step::SetState(state) => field.set_state(state),
        };
        for effect in produced {
            let verification = match &effect {
                OtpEffect::Completed { code } => {
                    let matched = code == expected;
                    accepted = Some(matched);
                    field.set_state(if matched { VisualState::Success } else { VisualState::Error })
                }
                OtpEffect::Reset => {
                    accepted = None;
                    Vec::new()
                }
                _ => Vec::new(),
            };
            effects.push(effect);
            effects.extend(verification);
        }
    }
    field.clear_on_complete_listener();

    let state = field.state();
    let completions = completions.borrow().clone();
    Ok(SimulationReport {
        slots: field.slots(),
        code: state.code(),
        active_index: state.active_index(),
        state: state.visual_state(),
        completions,
        accepted,
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use otpview_types::InputMode;

    #[test]
    fn parses_commands_and_typed_text() {
        let steps = parse_script("12 <del> <paste:345> <tap> <reset> <state:error>").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Event(OtpEvent::Char('1')),
                Step::Event(OtpEvent::Char('2')),
                Step::Event(OtpEvent::Delete),
                Step::Event(OtpEvent::Paste("345".into())),
                Step::Event(OtpEvent::Tap),
                Step::Reset,
                Step::SetState(VisualState::Error),
            ]
        );
    }

    #[test]
    fn unknown_angle_tokens_are_typed() {
        let steps = parse_script("<x>").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Step::Event(OtpEvent::Char('<')));
    }

    #[test]
    fn bad_state_name_is_an_error() {
        let err = parse_script("<state:blue>").unwrap_err();
        assert!(err.to_string().contains("<state:blue>"));
        assert!(parse_script("   ").is_err());
    }

    #[test]
    fn expected_code_turns_field_green() {
        let steps = parse_script("1234 5").unwrap();
        let report = run_script(OtpConfig::with_count(5), "12345", steps).unwrap();
        assert_eq!(report.completions, vec!["12345".to_string()]);
        assert_eq!(report.accepted, Some(true));
        assert_eq!(report.state, VisualState::Success);
        assert_eq!(report.code, "12345");
    }

    #[test]
    fn wrong_code_then_tap_clears_the_error() {
        let steps = parse_script("99999 <tap>").unwrap();
        let report = run_script(OtpConfig::with_count(5), "12345", steps).unwrap();
        assert_eq!(report.completions, vec!["99999".to_string()]);
        assert_eq!(report.accepted, None);
        assert_eq!(report.state, VisualState::Normal);
        assert_eq!(report.code, "");
        assert!(report.effects.contains(&OtpEffect::ShowKeyboard));
    }

    #[test]
    fn report_serializes_slot_snapshots() {
        let config = OtpConfig {
            input_mode: InputMode::Password,
            ..OtpConfig::with_count(3)
        };
        let report = run_script(config, "000", parse_script("7").unwrap()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["active_index"], 1);
        assert_eq!(json["state"], "normal");
        assert_eq!(json["slots"][0]["display"], "•");
        assert_eq!(json["slots"][1]["editable"], true);
        assert!(json["completions"].as_array().is_some_and(|c| c.is_empty()));
    }
}
