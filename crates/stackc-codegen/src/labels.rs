//! Control-flow label allocation

/// Hands out assembler-local labels from one counter that is never reset,
/// so every label in a compilation run is distinct.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    counter: usize,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> String {
        let label = format!(".L{}{}", prefix, self.counter);
        self.counter += 1;
        label
    }

    /// Number of labels handed out so far
    pub fn issued(&self) -> usize {
        self.counter
    }
}
