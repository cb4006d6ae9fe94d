//! Form state and validation
//!
//! Every field in this client is a required text field whose value must be
//! non-empty once surrounding whitespace is removed. Validation is
//! synchronous and re-run on every change and blur, and the form starts out
//! validated so an untouched empty form is already invalid.

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} is a required field")]
    Required(&'static str),
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Required(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    initial: String,
    value: String,
    touched: bool,
}

impl Field {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn touched(&self) -> bool {
        self.touched
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<Field>,
    errors: Vec<FieldError>,
    focus: usize,
    submitting: bool,
    validating: bool,
}

impl Form {
    /// Build a form from `(name, label, initial value)` triples
    pub fn new(fields: &[(&'static str, &'static str, &str)]) -> Self {
        let mut form = Self {
            fields: fields
                .iter()
                .map(|&(name, label, initial)| Field {
                    name,
                    label,
                    initial: initial.to_string(),
                    value: initial.to_string(),
                    touched: false,
                })
                .collect(),
            errors: Vec::new(),
            focus: 0,
            submitting: false,
            validating: false,
        };
        form.validate();
        form
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Raw value of `name`; empty for unknown fields
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(|f| f.value.as_str()).unwrap_or("")
    }

    /// Value of `name` with surrounding whitespace removed
    pub fn trimmed(&self, name: &str) -> &str {
        self.value(name).trim()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.into();
        }
        self.validate();
    }

    pub fn blur(&mut self, name: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.touched = true;
        }
        self.validate();
    }

    /// Name of the field receiving keyboard input
    pub fn focused(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|f| f.name)
    }

    /// Leave the focused field and move to the next one, wrapping around
    pub fn focus_next(&mut self) {
        if let Some(name) = self.focused() {
            self.blur(name);
        }
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    /// Append a character to the focused field
    pub fn input(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
        self.validate();
    }

    /// Remove the last character of the focused field
    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
        self.validate();
    }

    fn validate(&mut self) {
        self.errors = self
            .fields
            .iter()
            .filter(|f| f.value.trim().is_empty())
            .map(|f| FieldError::Required(f.name))
            .collect();
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Error for `name`, only once the user has left the field
    pub fn visible_error(&self, name: &str) -> Option<&FieldError> {
        let touched = self.field(name).is_some_and(|f| f.touched);
        if !touched {
            return None;
        }
        self.errors.iter().find(|e| e.field() == name)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any value differs from the initial one
    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(|f| f.value != f.initial)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Always false today; validation never awaits anything
    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self, require_dirty: bool) -> bool {
        self.is_valid()
            && (!require_dirty || self.is_dirty())
            && !self.submitting
            && !self.validating
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Back to the initial values, untouched
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.initial.clone();
            field.touched = false;
        }
        self.focus = 0;
        self.submitting = false;
        self.validate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_form() -> Form {
        Form::new(&[("name", "Name", ""), ("namespace", "Namespace", "")])
    }

    #[test]
    fn test_empty_form_is_invalid_on_mount() {
        let form = install_form();
        assert!(!form.is_valid());
        assert_eq!(form.errors().len(), 2);
        assert!(!form.can_submit(true));
    }

    #[test]
    fn test_missing_name_blocks_submit() {
        let mut form = install_form();
        form.set("namespace", "valid");
        assert!(!form.is_valid());
        assert_eq!(form.errors(), &[FieldError::Required("name")]);
        assert!(!form.can_submit(true));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let mut form = install_form();
        form.set("name", "   ");
        form.set("namespace", "ns");
        assert!(!form.is_valid());
    }

    #[test]
    fn test_padded_values_are_accepted_and_trimmed() {
        let mut form = install_form();
        form.set("name", "  a  ");
        form.set("namespace", "b");
        assert!(form.is_valid());
        assert!(form.is_dirty());
        assert!(form.can_submit(true));
        assert_eq!(form.trimmed("name"), "a");
        assert_eq!(form.value("name"), "  a  ");
    }

    #[test]
    fn test_pristine_valid_form_needs_dirty_only_when_asked() {
        let form = Form::new(&[("name", "Name", "stable"), ("url", "Url", "https://x")]);
        assert!(form.is_valid());
        assert!(!form.is_dirty());
        assert!(!form.can_submit(true));
        assert!(form.can_submit(false));
    }

    #[test]
    fn test_no_submit_while_submitting() {
        let mut form = install_form();
        form.set("name", "a");
        form.set("namespace", "b");
        form.begin_submit();
        assert!(!form.can_submit(true));
        form.finish_submit();
        assert!(form.can_submit(true));
    }

    #[test]
    fn test_errors_show_after_blur() {
        let mut form = install_form();
        assert!(form.visible_error("name").is_none());
        form.blur("name");
        assert_eq!(
            form.visible_error("name").map(|e| e.to_string()),
            Some("name is a required field".to_string())
        );
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = install_form();
        form.input('w');
        form.input('x');
        form.backspace();
        form.focus_next();
        form.input('n');

        assert_eq!(form.value("name"), "w");
        assert_eq!(form.value("namespace"), "n");
        assert_eq!(form.focused(), Some("namespace"));
        assert!(form.fields()[0].touched());

        form.focus_next();
        assert_eq!(form.focused(), Some("name"));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut form = Form::new(&[("name", "Name", "old"), ("url", "Url", "https://old")]);
        form.set("name", "new");
        form.blur("name");
        form.reset();
        assert_eq!(form.value("name"), "old");
        assert!(!form.is_dirty());
        assert!(form.visible_error("name").is_none());
    }
}
