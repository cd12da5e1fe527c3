//! Command-line state - the ex command being typed and its history

/// Maximum number of remembered command lines
pub const HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    text: String,
    /// Committed lines, oldest first
    history: Vec<String>,
    /// Index into `history` while browsing with Up/Down
    browsing: Option<usize>,
    /// What was typed before browsing started; entries must start with it
    prefix: String,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
        self.browsing = None;
    }

    /// Remove the last character. Returns false if the line was already empty.
    pub fn backspace(&mut self) -> bool {
        self.browsing = None;
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.browsing = None;
        self.prefix.clear();
    }

    /// Take the typed line, remembering it in the history
    pub fn commit(&mut self) -> String {
        let line = std::mem::take(&mut self.text);
        self.clear();
        if !line.trim().is_empty() && self.history.last() != Some(&line) {
            self.history.push(line.clone());
            if self.history.len() > HISTORY_LIMIT {
                self.history.remove(0);
            }
        }
        line
    }

    /// Step to the previous history entry matching the typed prefix
    pub fn history_prev(&mut self) {
        let end = match self.browsing {
            Some(index) => index,
            None => {
                self.prefix = self.text.clone();
                self.history.len()
            }
        };
        let found = (0..end)
            .rev()
            .find(|&i| self.history[i].starts_with(&self.prefix));
        if let Some(index) = found {
            self.browsing = Some(index);
            self.text = self.history[index].clone();
        }
    }

    /// Step to the next history entry, returning to the typed prefix past
    /// the newest one
    pub fn history_next(&mut self) {
        let Some(current) = self.browsing else {
            return;
        };
        let found = (current + 1..self.history.len())
            .find(|&i| self.history[i].starts_with(&self.prefix));
        match found {
            Some(index) => {
                self.browsing = Some(index);
                self.text = self.history[index].clone();
            }
            None => {
                self.browsing = None;
                self.text = self.prefix.clone();
            }
        }
    }
}
