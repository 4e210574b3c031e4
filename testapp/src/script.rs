//! Line-oriented commands driving the demo.
//!
//! One command per line; blank lines and lines starting with `#` are skipped.
//! Callback commands take `key=value` arguments. Recognition texts may carry
//! several hypotheses separated by `|`.

use std::time::Duration;

use tdm_session::types::{
    Args, BackendEvent, CallbackRequest, DialogueEvent, RecognitionEvent, RecognitionHypothesis,
};

/// Domain callbacks issued from the script are attributed to.
pub const SCRIPT_DOMAIN: &str = "phone";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect,
    Disconnect,
    PressTalk,
    Backend(BackendEvent),
    Recognition(RecognitionEvent),
    Dialogue(DialogueEvent),
    Callback(CallbackRequest),
    /// Pause before the next line, giving echoed events time to arrive.
    Wait(Duration),
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command}: missing {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },
    #[error("{command}: invalid {what}: {value}")]
    Invalid {
        command: &'static str,
        what: &'static str,
        value: String,
    },
}

pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "connect" => Command::Connect,
        "disconnect" => Command::Disconnect,
        "ptt" => Command::PressTalk,
        "quit" | "exit" => Command::Quit,
        "wait" => {
            let ms = required(rest, "wait", "milliseconds")?;
            let ms = ms.parse::<u64>().map_err(|_| ParseError::Invalid {
                command: "wait",
                what: "milliseconds",
                value: ms.to_string(),
            })?;
            Command::Wait(Duration::from_millis(ms))
        }

        "open" => Command::Backend(BackendEvent::Opened),
        "close" => {
            let (code, reason) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let code = match code {
                "" => 1000,
                code => code.parse::<i32>().map_err(|_| ParseError::Invalid {
                    command: "close",
                    what: "code",
                    value: code.to_string(),
                })?,
            };
            Command::Backend(BackendEvent::closed(code, reason.trim()))
        }
        "error" => Command::Backend(BackendEvent::error(required(rest, "error", "reason")?)),

        "ready" => Command::Recognition(RecognitionEvent::ReadyForSpeech),
        "begin" => Command::Recognition(RecognitionEvent::BeginningOfSpeech),
        "end" => Command::Recognition(RecognitionEvent::EndOfSpeech),
        "timeout" => Command::Recognition(RecognitionEvent::SpeechTimeout),
        "empty" => Command::Recognition(RecognitionEvent::EmptyResult),
        "partial" => Command::Recognition(RecognitionEvent::PartialResults {
            hypotheses: hypotheses(required(rest, "partial", "text")?),
        }),
        "results" => Command::Recognition(RecognitionEvent::results(hypotheses(required(
            rest, "results", "text",
        )?))),
        "rms" => {
            let level = required(rest, "rms", "level")?;
            let level = level.parse::<f32>().map_err(|_| ParseError::Invalid {
                command: "rms",
                what: "level",
                value: level.to_string(),
            })?;
            Command::Recognition(RecognitionEvent::RmsChanged { level })
        }
        "asr-error" => Command::Recognition(RecognitionEvent::error(required(
            rest,
            "asr-error",
            "reason",
        )?)),

        "utterance" => Command::Dialogue(DialogueEvent::SystemUtteranceToSpeak {
            utterance: required(rest, "utterance", "text")?.to_string(),
        }),
        "selected" => Command::Dialogue(DialogueEvent::SelectedRecognition {
            recognition: required(rest, "selected", "text")?.to_string(),
        }),
        "ddd" => {
            let mut parts = rest.split_whitespace();
            let ddd = parts.next().ok_or(ParseError::Missing {
                command: "ddd",
                what: "name",
            })?;
            let language_code = parts.next().unwrap_or("eng");
            Command::Dialogue(DialogueEvent::ActiveDddChanged {
                ddd: ddd.to_string(),
                language_code: language_code.to_string(),
            })
        }
        "popup" => Command::Dialogue(DialogueEvent::ShowPopup {
            title: required(rest, "popup", "title")?.to_string(),
            options: vec![],
        }),

        "action" => callback("action", rest, CallbackRequest::action)?,
        "query" => callback("query", rest, CallbackRequest::wh_query)?,
        "valid" => callback("valid", rest, CallbackRequest::validity)?,
        "recognize" => callback("recognize", rest, CallbackRequest::entity_recognition)?,

        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::Missing { command, what })
    } else {
        Ok(rest)
    }
}

fn hypotheses(text: &str) -> Vec<RecognitionHypothesis> {
    text.split('|')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(RecognitionHypothesis::new)
        .collect()
}

fn callback(
    command: &'static str,
    rest: &str,
    build: fn(&str, &str, Args) -> CallbackRequest,
) -> Result<Command, ParseError> {
    let mut words = rest.split_whitespace();
    let name = words.next().ok_or(ParseError::Missing {
        command,
        what: "name",
    })?;

    let mut args = Args::new();
    let mut pending: Option<(String, String)> = None;
    for word in words {
        match word.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                if let Some((key, value)) = pending.take() {
                    args.insert(&key, value);
                }
                pending = Some((key.to_string(), value.to_string()));
            }
            // Words without `=` continue the previous value.
            _ => match pending.as_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(word);
                }
                None => {
                    return Err(ParseError::Invalid {
                        command,
                        what: "argument",
                        value: word.to_string(),
                    });
                }
            },
        }
    }
    if let Some((key, value)) = pending {
        args.insert(&key, value);
    }

    Ok(Command::Callback(build(SCRIPT_DOMAIN, name, args)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdm_session::types::CallbackKind;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# connect first"), Ok(None));
    }

    #[test]
    fn intents() {
        assert_eq!(parse("connect"), Command::Connect);
        assert_eq!(parse("ptt"), Command::PressTalk);
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("wait 50"), Command::Wait(Duration::from_millis(50)));
    }

    #[test]
    fn backend_close_with_reason() {
        assert_eq!(
            parse("close 1001 going away"),
            Command::Backend(BackendEvent::closed(1001, "going away"))
        );
        assert_eq!(parse("close"), Command::Backend(BackendEvent::closed(1000, "")));
        assert!(matches!(
            parse_line("close soon"),
            Err(ParseError::Invalid { what: "code", .. })
        ));
    }

    #[test]
    fn results_split_hypotheses() {
        let Command::Recognition(event) = parse("results call lisa | call liza") else {
            panic!("expected recognition event");
        };
        assert_eq!(event.best_recognition(), Some("call lisa"));
        assert!(event.is_terminal());
    }

    #[test]
    fn callback_arguments() {
        let Command::Callback(request) =
            parse("valid PhoneNumberAvailable selected_contact_of_phone_number=John")
        else {
            panic!("expected callback");
        };
        assert_eq!(request.kind(), CallbackKind::Validity);
        assert_eq!(request.name(), "PhoneNumberAvailable");
        assert_eq!(request.domain_id(), SCRIPT_DOMAIN);
        assert_eq!(
            request.args().text("selected_contact_of_phone_number"),
            Some("John")
        );
    }

    #[test]
    fn callback_values_may_contain_spaces() {
        let Command::Callback(request) = parse("recognize ContactRecognizer search_string=call lisa now")
        else {
            panic!("expected callback");
        };
        assert_eq!(request.args().text("search_string"), Some("call lisa now"));
    }

    #[test]
    fn callback_requires_name() {
        assert_eq!(
            parse_line("action"),
            Err(ParseError::Missing {
                command: "action",
                what: "name"
            })
        );
        assert!(matches!(
            parse_line("action call lisa"),
            Err(ParseError::Invalid { what: "argument", .. })
        ));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_line("dance"),
            Err(ParseError::UnknownCommand("dance".into()))
        );
    }
}
