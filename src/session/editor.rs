//! Editor command resolution

use crate::error::TagError;

/// Used when neither a flag, the config, nor the environment names an editor.
pub const FALLBACK_EDITOR: &str = "nano";

/// Environment variables consulted in order of preference.
pub const EDITOR_ENV_CHAIN: &[&str] = &["GIT_EDITOR", "VISUAL", "EDITOR"];

/// An editor program plus any leading arguments (`code --wait`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EditorCommand {
    /// Split a command string on whitespace. The first word is the program.
    pub fn parse(command: &str) -> Result<Self, TagError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| TagError::ConfigError("Editor command is empty".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Original command string, for messages.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Resolve the editor: explicit flag, then config, then the environment chain.
pub fn resolve_editor(
    flag: Option<&str>,
    configured: Option<&str>,
) -> Result<EditorCommand, TagError> {
    resolve_editor_with(flag, configured, |key| std::env::var(key).ok())
}

/// Same as [`resolve_editor`] with an injectable environment lookup.
pub fn resolve_editor_with<F>(
    flag: Option<&str>,
    configured: Option<&str>,
    lookup: F,
) -> Result<EditorCommand, TagError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(cmd) = flag.or(configured) {
        return EditorCommand::parse(cmd);
    }
    let from_env = EDITOR_ENV_CHAIN
        .iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty());
    EditorCommand::parse(from_env.as_deref().unwrap_or(FALLBACK_EDITOR))
}
