//! Instruction message sent to the assistant
//!
//! The text is treated as an opaque template: the only thing filled in here is
//! the file-type label. Currency, date and number rules are enforced by the
//! remote assistant, not by this crate.

/// Placeholder replaced with the file-type label
pub const FILE_TYPE_PLACEHOLDER: &str = "{file_type}";

/// Default extraction instructions
pub const DEFAULT_INSTRUCTIONS: &str = "\
The uploaded file is a {file_type} file containing a financial table. \
Please read the uploaded file and return its contents as JSON.
If the file name starts with BG18, then currency code must be BGN.
If the file name starts with BG29, then currency code must be EUR.
If the file name starts with BG71, then currency code must be USD.
Otherwise find the currency code in the provided file.
Return dates in mm/dd/yyyy format.
Decimal separator must be a dot.";

/// Renders the user message for a run
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    template: String,
}

impl PromptBuilder {
    /// Create a builder from a template containing [`FILE_TYPE_PLACEHOLDER`]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the message for a file-type label
    pub fn build(&self, file_type: &str) -> String {
        self.template.replace(FILE_TYPE_PLACEHOLDER, file_type)
    }

    /// The raw template
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUCTIONS)
    }
}
