use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reelmeter_models::{InputMode, MessageLevel};
use std::path::PathBuf;
use tracing::error;

use crate::App;

impl App {
    /// Handles one key press.
    ///
    /// # Errors
    ///
    /// Returns an error if a calculation worker cannot be spawned.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Editing => {
                self.handle_editing_mode(key);
                Ok(())
            }
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('e' | 'i') => {
                self.input_buffer = self.editing_seed();
                self.input_mode = InputMode::Editing;
                self.clear_message();
            }
            KeyCode::Char('s') | KeyCode::Enter => self.start_calculation()?,
            KeyCode::Char('w') => {
                if let Err(e) = self.save_settings() {
                    error!("Failed to save settings: {}", e);
                    self.set_message(MessageLevel::Error, format!("Could not save settings: {e}"));
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_editing_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let input = self.input_buffer.trim().to_string();
                if input.is_empty() {
                    self.input_mode = InputMode::Normal;
                    return;
                }
                if self.select_folder(&expand_home(&input)) {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => self.input_buffer.push(c),
            _ => {}
        }
    }
}

fn expand_home(input: &str) -> PathBuf {
    match input.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(input), |home| home.join(rest)),
        None => PathBuf::from(input),
    }
}
