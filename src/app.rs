use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::audit::{Auditor, FormField, Step};
use crate::audit::report::{export_report, ReportExport};
use crate::config::AppConfig;
use crate::tasks::TaskList;

/// Focus index of the submit row, one past the last form field.
pub const SUBMIT_ROW: usize = FormField::ALL.len();

/// Fallback export path when the config doesn't set one.
const DEFAULT_REPORT_PATH: &str = "landing-audit-report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Auditor,
    Tasks,
}

pub struct App {
    pub section: Section,

    // Audit wizard (left pane)
    pub auditor: Auditor,
    pub form_focus: usize, // 0..=SUBMIT_ROW

    // Task list (right pane)
    pub tasks: TaskList,
    pub task_input: String,
    pub selected_task: usize,

    // Config
    pub config: AppConfig,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    // Progress ticker channel; the sender is handed to the auditor on
    // submit, the receiver is drained every tick()
    tick_tx: UnboundedSender<()>,
    tick_rx: UnboundedReceiver<()>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            section: Section::Auditor,
            auditor: Auditor::new(),
            form_focus: 0,
            tasks: TaskList::new(),
            task_input: String::new(),
            selected_task: 0,
            config,
            status_message: None,
            status_message_time: None,
            tick_tx,
            tick_rx,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Whether key presses currently feed a text input. Used by the main
    /// loop to decide if 'q' quits or types.
    pub fn text_entry_active(&self) -> bool {
        match self.section {
            Section::Tasks => true,
            Section::Auditor => matches!(self.auditor.step(), Step::Form { .. }),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Section switching works everywhere
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.section = match self.section {
                    Section::Auditor => Section::Tasks,
                    Section::Tasks => Section::Auditor,
                };
                return Ok(());
            }
            _ => {}
        }

        match self.section {
            Section::Auditor => self.handle_auditor_key(key),
            Section::Tasks => {
                self.handle_task_key(key);
                Ok(())
            }
        }
    }

    fn handle_auditor_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.auditor.step() {
            Step::Landing => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.auditor.start();
                    self.form_focus = 0;
                }
            }
            Step::Form { .. } => self.handle_form_key(key),
            Step::Analysis { .. } => {
                if key.code == KeyCode::Esc {
                    self.auditor.cancel();
                    self.set_status("Analysis cancelled");
                }
            }
            Step::Results { .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('a') => {
                    self.auditor.reset();
                    self.form_focus = 0;
                }
                KeyCode::Char('e') => self.export_report()?,
                _ => {}
            },
        }
        Ok(())
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => {
                self.form_focus = (self.form_focus + 1) % (SUBMIT_ROW + 1);
            }
            KeyCode::Up => {
                self.form_focus = self.form_focus.checked_sub(1).unwrap_or(SUBMIT_ROW);
            }
            KeyCode::Enter => {
                if self.form_focus == SUBMIT_ROW {
                    self.auditor.submit(&self.tick_tx);
                } else {
                    self.form_focus += 1;
                }
            }
            KeyCode::Left => self.cycle_choice(-1),
            KeyCode::Right => self.cycle_choice(1),
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field() {
                    if field.choices().is_none() {
                        let mut value = self.field_value(field);
                        value.pop();
                        self.auditor.set_field(field, value);
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_field() {
                    // Selector fields only react to Left/Right
                    if field.choices().is_none() {
                        let mut value = self.field_value(field);
                        value.push(c);
                        self.auditor.set_field(field, value);
                    }
                }
            }
            _ => {}
        }
    }

    /// The form field under the focus cursor, None on the submit row.
    pub fn focused_field(&self) -> Option<FormField> {
        FormField::ALL.get(self.form_focus).copied()
    }

    fn field_value(&self, field: FormField) -> String {
        self.auditor
            .form()
            .map(|form| form.get(field).to_string())
            .unwrap_or_default()
    }

    /// Step a selector field through its preset list.
    fn cycle_choice(&mut self, direction: i64) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(choices) = field.choices() else {
            return;
        };
        let current = self.field_value(field);
        let position = choices.iter().position(|c| *c == current);
        let next = match (position, direction) {
            (Some(i), d) => {
                (i as i64 + d).rem_euclid(choices.len() as i64) as usize
            }
            // Nothing selected yet: Right picks the first, Left the last
            (None, d) if d > 0 => 0,
            (None, _) => choices.len() - 1,
        };
        self.auditor.set_field(field, choices[next]);
    }

    fn handle_task_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down => {
                if !self.tasks.is_empty() {
                    self.selected_task = (self.selected_task + 1) % self.tasks.len();
                }
            }
            KeyCode::Up => {
                if !self.tasks.is_empty() {
                    self.selected_task = self
                        .selected_task
                        .checked_sub(1)
                        .unwrap_or(self.tasks.len() - 1);
                }
            }
            KeyCode::Enter => {
                if self.task_input.trim().is_empty() {
                    // Empty input: Enter toggles the selected task
                    if let Some(id) = self.tasks.get(self.selected_task).map(|t| t.id) {
                        self.tasks.toggle(id);
                    }
                } else if self.tasks.add(&self.task_input).is_some() {
                    self.task_input.clear();
                    self.selected_task = self.tasks.len() - 1;
                }
            }
            KeyCode::Delete => {
                if let Some(id) = self.tasks.get(self.selected_task).map(|t| t.id) {
                    self.tasks.remove(id);
                    if self.selected_task >= self.tasks.len() && !self.tasks.is_empty() {
                        self.selected_task = self.tasks.len() - 1;
                    }
                }
            }
            KeyCode::Backspace => {
                self.task_input.pop();
            }
            KeyCode::Char(c) => self.task_input.push(c),
            _ => {}
        }
    }

    /// Write the current report as JSON next to the binary (or wherever
    /// the config points). Results step only.
    fn export_report(&mut self) -> Result<()> {
        let (Some(form), Some(report)) = (self.auditor.form(), self.auditor.report()) else {
            return Ok(());
        };
        let export = ReportExport {
            primary_url: &form.primary_url,
            company_name: &form.company_name,
            report,
        };
        let path = self
            .config
            .report_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));
        match export_report(&export, &path) {
            Ok(()) => self.set_status(format!("Report saved to {}", path.display())),
            Err(e) => {
                tracing::warn!("report export failed: {}", e);
                self.set_status(format!("Export failed: {}", e));
            }
        }
        Ok(())
    }

    /// Periodic housekeeping, called from the main loop between draws.
    pub fn tick(&mut self) {
        // Drain ticker ticks; each one advances the analysis
        while self.tick_rx.try_recv().is_ok() {
            if self.auditor.on_tick() {
                self.set_status("Analysis complete");
                self.notify_complete();
            }
        }

        // Clear status message after 3 seconds
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    fn notify_complete(&self) {
        if !self.config.notifications {
            return;
        }
        let Some(report) = self.auditor.report() else {
            return;
        };
        let body = format!("Overall score {} ({})", report.overall_score, report.grade);
        if let Err(e) = notify_rust::Notification::new()
            .summary("pagegrade")
            .body(&body)
            .icon("applications-internet")
            .show()
        {
            tracing::warn!("notification failed: {}", e);
        }
    }
}
