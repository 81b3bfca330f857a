//! Assembly text buffer

/// Accumulates AT&T assembly text line by line
#[derive(Debug, Default)]
pub struct Asm {
    text: String,
}

impl Asm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unindented directive: `.section .text`
    pub fn directive(&mut self, directive: impl AsRef<str>) {
        self.text.push_str(directive.as_ref());
        self.text.push('\n');
    }

    pub fn label(&mut self, label: impl AsRef<str>) {
        self.text.push_str(label.as_ref());
        self.text.push_str(":\n");
    }

    /// Indented instruction: `  mov $1, %rax`
    pub fn ins(&mut self, instruction: impl AsRef<str>) {
        self.text.push_str("  ");
        self.text.push_str(instruction.as_ref());
        self.text.push('\n');
    }

    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    pub fn finish(self) -> String {
        self.text
    }
}
