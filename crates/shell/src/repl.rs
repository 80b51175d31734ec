//! Line editor front end.
//!
//! Wires the completion dispatcher into a `reedline` editor with a columnar
//! completion menu on Tab, and hands submitted lines to the [`Executor`].

use std::{borrow::Cow, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use kubeline_util::{text_before_cursor, word_before_cursor};
use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Prompt, PromptEditMode,
    PromptHistorySearch, PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu, Signal, Span,
    default_emacs_keybindings,
};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::{
    completion::Completer,
    executor::{Executor, SubmitOutcome, report_error, touches_kubeconfig},
};

const COMPLETION_MENU: &str = "completion_menu";
const HISTORY_CAPACITY: usize = 1000;

#[derive(Clone, Debug)]
pub struct ReplOptions {
    pub prompt: String,
    pub history_file: Option<PathBuf>,
}

/// Adapts [`Completer`] to reedline's completion interface.
pub struct LineCompleter {
    inner: Arc<Completer>,
}

impl LineCompleter {
    pub fn new(inner: Arc<Completer>) -> Self {
        Self { inner }
    }
}

impl reedline::Completer for LineCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<reedline::Suggestion> {
        let before = text_before_cursor(line, pos);
        let end = before.len();
        let start = end - word_before_cursor(before).len();
        self.inner
            .complete(line, pos)
            .into_iter()
            .map(|suggestion| reedline::Suggestion {
                value: suggestion.text().to_string(),
                description: suggestion.has_description().then(|| suggestion.description().to_string()),
                span: Span { start, end },
                // Directories keep the cursor inside the path.
                append_whitespace: !suggestion.text().ends_with('/'),
                ..Default::default()
            })
            .collect()
    }
}

struct ShellPrompt {
    text: String,
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(&self, history_search: PromptHistorySearch) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}reverse-search: {}) ", history_search.term))
    }
}

/// Interactive session: read a line, run it, repeat until `exit` or Ctrl-D.
pub struct Repl {
    completer: Arc<Completer>,
    executor: Executor,
    runtime: Handle,
    options: ReplOptions,
}

impl Repl {
    pub fn new(completer: Arc<Completer>, executor: Executor, runtime: Handle, options: ReplOptions) -> Self {
        Self {
            completer,
            executor,
            runtime,
            options,
        }
    }

    fn editor(&self) -> Result<Reedline> {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));
        let mut editor = Reedline::create()
            .with_completer(Box::new(LineCompleter::new(Arc::clone(&self.completer))))
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if let Some(path) = &self.options.history_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create history directory {}", parent.display()))?;
            }
            let history = FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone())
                .with_context(|| format!("failed to open history file {}", path.display()))?;
            editor = editor.with_history(Box::new(history));
            debug!(path = %path.display(), "history file attached");
        }
        Ok(editor)
    }

    pub fn run(self) -> Result<()> {
        let mut editor = self.editor()?;
        let prompt = ShellPrompt {
            text: self.options.prompt.clone(),
        };
        info!("interactive session started");
        loop {
            match editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    if !self.submit(&line) {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => continue,
                Ok(Signal::CtrlD) => break,
                // Newer reedline versions add signals; treat them as a no-op.
                #[allow(unreachable_patterns)]
                Ok(_) => continue,
                Err(error) => {
                    warn!(error = %error, "line editor failed");
                    return Err(error).context("line editor failed");
                }
            }
        }
        println!("Bye!");
        info!("interactive session ended");
        Ok(())
    }

    /// Runs one line. Returns false when the session should end.
    fn submit(&self, line: &str) -> bool {
        match self.runtime.block_on(self.executor.on_submit(line)) {
            Ok(SubmitOutcome::Exit) => return false,
            Ok(SubmitOutcome::Skipped) => {}
            Ok(SubmitOutcome::Executed(status)) => {
                if !status.success() {
                    report_error(status);
                }
                if touches_kubeconfig(line) {
                    self.completer.namespaces().reload();
                    self.completer.cache().invalidate_all();
                }
            }
            Err(error) => report_error(format!("{error:#}")),
        }
        true
    }
}
