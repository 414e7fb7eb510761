//! Modal form state: text fields, an optional role selector, inline error

use crate::models::Role;

pub const REQUIRED_MESSAGE: &str = "All fields are required.";

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Rendered masked (passwords)
    pub secret: bool,
}

impl FormField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            secret: false,
        }
    }

    pub fn secret(label: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::new(label)
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Text input focus over a list of fields
#[derive(Debug, Clone, PartialEq)]
pub struct Fields {
    pub items: Vec<FormField>,
    pub focus: usize,
}

impl Fields {
    pub fn new(items: Vec<FormField>) -> Self {
        Self { items, focus: 0 }
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.items.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.items.is_empty() {
            self.focus = (self.focus + 1) % self.items.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.items.is_empty() {
            self.focus = (self.focus + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused_mut() {
            field.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.value.pop();
        }
    }

    pub fn set(&mut self, index: usize, value: &str) {
        if let Some(field) = self.items.get_mut(index) {
            field.value = value.to_string();
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.items.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn any_blank(&self) -> bool {
        self.items.iter().any(FormField::is_blank)
    }

    pub fn clear(&mut self) {
        for field in &mut self.items {
            field.value.clear();
        }
        self.focus = 0;
    }
}

/// "Add record" modal
#[derive(Debug, Clone, PartialEq)]
pub struct AddForm {
    pub open: bool,
    pub role: Role,
    pub has_role: bool,
    pub fields: Fields,
    pub error: Option<String>,
    pub saving: bool,
}

impl AddForm {
    pub fn new(labels: &[&'static str], has_role: bool) -> Self {
        Self {
            open: false,
            role: Role::Buyer,
            has_role,
            fields: Fields::new(labels.iter().copied().map(FormField::new).collect()),
            error: None,
            saving: false,
        }
    }

    /// Open the modal; typed values survive a cancel
    pub fn show(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn hide(&mut self) {
        self.open = false;
    }

    pub fn cycle_role(&mut self) {
        if self.has_role {
            self.role = self.role.toggle();
        }
    }

    /// Trimmed values, or the inline validation message
    pub fn validate(&self) -> Result<Vec<String>, &'static str> {
        if self.fields.any_blank() {
            return Err(REQUIRED_MESSAGE);
        }
        Ok(self
            .fields
            .items
            .iter()
            .map(|f| f.value.trim().to_string())
            .collect())
    }

    /// After a successful write: close and reset the inputs
    pub fn reset(&mut self) {
        self.open = false;
        self.saving = false;
        self.error = None;
        self.role = Role::Buyer;
        self.fields.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddForm {
        AddForm::new(&["Category", "Product"], true)
    }

    #[test]
    fn test_blank_and_whitespace_fields_fail() {
        let mut f = form();
        assert_eq!(f.validate(), Err(REQUIRED_MESSAGE));

        f.fields.set(0, "Books");
        f.fields.set(1, "   ");
        assert_eq!(f.validate(), Err(REQUIRED_MESSAGE));

        f.fields.set(1, "  Novel ");
        assert_eq!(f.validate().unwrap(), vec!["Books", "Novel"]);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut f = form();
        f.fields.push_char('a');
        f.fields.focus_next();
        f.fields.push_char('b');
        f.fields.push_char('c');
        f.fields.pop_char();
        assert_eq!(f.fields.value(0), "a");
        assert_eq!(f.fields.value(1), "b");

        f.fields.focus_next();
        assert_eq!(f.fields.focus, 0);
        f.fields.focus_prev();
        assert_eq!(f.fields.focus, 1);
    }

    #[test]
    fn test_hide_keeps_values_reset_clears() {
        let mut f = form();
        f.show();
        f.fields.set(0, "Books");
        f.cycle_role();
        f.hide();
        assert_eq!(f.fields.value(0), "Books");

        f.reset();
        assert!(!f.open);
        assert_eq!(f.fields.value(0), "");
        assert_eq!(f.role, Role::Buyer);
    }

    #[test]
    fn test_role_selector_absent() {
        let mut f = AddForm::new(&["Title", "Description"], false);
        f.cycle_role();
        assert_eq!(f.role, Role::Buyer);
    }
}
