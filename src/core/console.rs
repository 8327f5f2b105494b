//=========================================================================
// Console
//=========================================================================
//
// Presentation sink for behaviours that "show" something (item text,
// diagnostics). Every line is forwarded to the `log` facade and kept in
// memory so hosts and tests can read what was presented.
//
//=========================================================================

use log::info;

/// In-memory presentation log.
#[derive(Debug, Default)]
pub struct Console {
    lines: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Presents one line.
    pub fn print(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!(target: "console", "{}", line);
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Takes every presented line, leaving the console empty.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_keeps_lines_in_order() {
        let mut console = Console::new();
        console.print("first");
        console.print(String::from("second"));

        assert_eq!(console.lines(), ["first", "second"]);
    }

    #[test]
    fn take_lines_empties_console() {
        let mut console = Console::new();
        console.print("only");

        assert_eq!(console.take_lines(), vec!["only".to_string()]);
        assert!(console.lines().is_empty());
    }
}
