use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::warn;

use crate::config::HistoryConfig;
use crate::error::{FscliError, Result};
use crate::parser::{Operation, Parser};

use super::completer::FsCompleter;
use super::completion::{CollectionCache, CompletionEngine};
use super::highlighter::SyntaxHighlighter;
use super::hinter::FsHinter;
use super::prompt::FsPrompt;
use super::shared_state::SharedState;
use super::validator::FsValidator;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive command input
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Prompt showing the project id
    prompt: FsPrompt,

    /// Parser for command parsing
    parser: Parser,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `shared_state` - Shared session state
    /// * `history_config` - History configuration
    /// * `highlighting_enabled` - Enable syntax highlighting
    /// * `cache` - Collection-name cache feeding completion
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        shared_state: &SharedState,
        history_config: &HistoryConfig,
        highlighting_enabled: bool,
        cache: CollectionCache,
    ) -> Result<Self> {
        let engine = Arc::new(CompletionEngine::new(Arc::new(cache)));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let mut editor = Reedline::create()
            .with_completer(Box::new(FsCompleter::new(engine.clone())))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(SyntaxHighlighter::new(highlighting_enabled)))
            .with_hinter(Box::new(FsHinter::new(engine)))
            .with_validator(Box::new(FsValidator::new()));

        if history_config.persist {
            match FileBackedHistory::with_file(history_config.max_size, history_config.file_path.clone())
            {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => warn!(
                    path = %history_config.file_path.display(),
                    error = %e,
                    "history file unavailable, keeping history in memory"
                ),
            }
        }

        Ok(Self {
            editor,
            prompt: FsPrompt::new(shared_state.project_id()),
            parser: Parser::new(),
        })
    }

    /// Read a single line of input
    ///
    /// Ctrl-C discards the current line and yields an empty one.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line or None on EOF
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) => Ok(Some(String::new())),
            Ok(Signal::CtrlD) => Ok(None),
            Err(e) => Err(FscliError::Generic(format!("Read error: {e}"))),
        }
    }

    /// Parse one input line
    ///
    /// # Arguments
    /// * `input` - User input string
    ///
    /// # Returns
    /// * `Result<Operation>` - Parsed operation or error
    pub fn process_input(&self, input: &str) -> Result<Operation> {
        self.parser.parse(input)
    }
}
