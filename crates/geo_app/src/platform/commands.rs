//! Line commands typed into the terminal shell.
//!
//! Each line maps to one controller message or to a shell-only action.
//! Prompt and history positions are 1-based as shown on screen.

use geo_core::{Adjustment, Audience, DraftEdit, HistoryId, Msg, ResultEdit, Tone, ToolId};

pub const HELP: &str = "\
Commands:
  tool <prompt-recommender|content-rewriter|insights-report>
  open <query>            follow a link such as ?tool=content-rewriter
  describe <text>         business description (recommender)
  content <text>          content to rewrite or analyse
  industry <text> | website <text>
  prompt <n> <text> | add-prompt | remove-prompt <n>
  tone <casual|formal|persuasive|humorous|inspirational|none>
  audience <novice|intermediate|expert|none>
  platform <name>         toggle a target assistant (ChatGPT, Claude, ...)
  max-words <n>           rewrite length, 50 to 2000
  submit | regenerate | regen-prompt <n> | shorten | expand
  edit-prompt <n> | edit-text <text> | save-edit | cancel-edit
  use-in-rewriter | use-in-insights
  dashboard-expand | dashboard-collapse | download | clear-seeds | sidebar
  replay <id> | delete <id>
  view | json | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    /// Save the current dashboard as a text report.
    Download,
    Show,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs {1}")]
    MissingArgument(String, &'static str),
    #[error("`{0}` is not a position (expected 1 or more)")]
    BadNumber(String),
    #[error("no tool called `{0}`")]
    UnknownTool(String),
    #[error("`{0}` is not one of: {1}")]
    UnknownChoice(String, &'static str),
    #[error("`{0}` is not a word count")]
    BadWordCount(String),
}

pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word {
        "tool" => {
            let raw = required(word, rest, "a tool name")?;
            let tool = ToolId::parse(raw).ok_or_else(|| CommandError::UnknownTool(raw.to_string()))?;
            Msg::ToolSelected(tool)
        }
        "open" => Msg::UrlChanged(required(word, rest, "a link")?.to_string()),
        "describe" => edit(DraftEdit::BusinessDescription(rest.to_string())),
        "content" => edit(DraftEdit::Content(rest.to_string())),
        "industry" => edit(DraftEdit::Industry(rest.to_string())),
        "website" => edit(DraftEdit::Website(rest.to_string())),
        "prompt" => {
            let args = required(word, rest, "a position")?;
            let (position, text) = match args.split_once(char::is_whitespace) {
                Some((position, text)) => (position, text.trim()),
                None => (args, ""),
            };
            edit(DraftEdit::Prompt {
                index: index(position)?,
                text: text.to_string(),
            })
        }
        "tone" => {
            let raw = required(word, rest, "a tone")?;
            edit(DraftEdit::Tone(choice(raw, Tone::parse, TONES)?))
        }
        "audience" => {
            let raw = required(word, rest, "an audience")?;
            edit(DraftEdit::Audience(choice(raw, Audience::parse, AUDIENCES)?))
        }
        "platform" => edit(DraftEdit::TogglePlatform(
            required(word, rest, "a platform")?.to_string(),
        )),
        "max-words" => {
            let raw = required(word, rest, "a word count")?;
            let words = raw
                .parse::<u32>()
                .map_err(|_| CommandError::BadWordCount(raw.to_string()))?;
            edit(DraftEdit::MaxWords(words))
        }
        "add-prompt" => edit(DraftEdit::AddPrompt),
        "remove-prompt" => edit(DraftEdit::RemovePrompt {
            index: index(required(word, rest, "a position")?)?,
        }),
        "submit" => Msg::SubmitClicked,
        "regenerate" => Msg::RegenerateClicked,
        "regen-prompt" => Msg::PromptRegenerateClicked {
            index: index(required(word, rest, "a position")?)?,
        },
        "edit-prompt" => Msg::ResultEdited(ResultEdit::Begin {
            index: index(required(word, rest, "a position")?)?,
        }),
        "edit-text" => Msg::ResultEdited(ResultEdit::Text(rest.to_string())),
        "save-edit" => Msg::ResultEdited(ResultEdit::Save),
        "cancel-edit" => Msg::ResultEdited(ResultEdit::Cancel),
        "shorten" => Msg::AdjustClicked(Adjustment::Shorten),
        "expand" => Msg::AdjustClicked(Adjustment::Expand),
        "use-in-rewriter" => Msg::UsePromptsInRewriter,
        "use-in-insights" => Msg::UseContentInInsights,
        "dashboard-expand" => Msg::InsightsExpanded,
        "dashboard-collapse" => Msg::InsightsCollapsed,
        "clear-seeds" => Msg::SeedsCleared,
        "sidebar" => Msg::SidebarToggled,
        "replay" => Msg::HistorySelected(history_id(required(word, rest, "an entry id")?)?),
        "delete" => Msg::HistoryDeleted(history_id(required(word, rest, "an entry id")?)?),
        "download" => return Ok(Some(Command::Download)),
        "view" => return Ok(Some(Command::Show)),
        "json" => return Ok(Some(Command::Json)),
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(Command::Dispatch(msg)))
}

const TONES: &str = "casual, formal, persuasive, humorous, inspirational, none";
const AUDIENCES: &str = "novice, intermediate, expert, none";

fn edit(edit: DraftEdit) -> Msg {
    Msg::DraftEdited(edit)
}

/// `none` clears the choice.
fn choice<T>(
    raw: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &'static str,
) -> Result<Option<T>, CommandError> {
    if raw.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse(raw)
        .map(Some)
        .ok_or_else(|| CommandError::UnknownChoice(raw.to_string(), allowed))
}

fn required<'a>(word: &str, rest: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(word.to_string(), what))
    } else {
        Ok(rest)
    }
}

fn index(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position - 1),
        _ => Err(CommandError::BadNumber(raw.to_string())),
    }
}

fn history_id(raw: &str) -> Result<HistoryId, CommandError> {
    raw.trim_start_matches('#')
        .parse::<u64>()
        .map(HistoryId::new)
        .map_err(|_| CommandError::BadNumber(raw.to_string()))
}
