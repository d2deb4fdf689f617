use sitekit_models::FormErrors;

#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    /// `text`, `email`, `password`, `textarea` or `checkbox`
    pub kind: &'static str,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub errors: Vec<String>,
}

/// An HTML form: fields in display order plus their current errors.
#[derive(Debug, Clone)]
pub struct FormView {
    pub action: String,
    pub submit: &'static str,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub fn new(action: impl Into<String>, submit: &'static str) -> Self {
        Self {
            action: action.into(),
            submit,
            fields: Vec::new(),
        }
    }

    fn field(mut self, name: &'static str, label: &'static str, kind: &'static str, value: &str) -> Self {
        self.fields.push(FieldView {
            name,
            label,
            kind,
            value: value.to_string(),
            checked: false,
            required: false,
            errors: Vec::new(),
        });
        self
    }

    pub fn text(self, name: &'static str, label: &'static str, value: &str) -> Self {
        self.field(name, label, "text", value)
    }

    pub fn email(self, name: &'static str, label: &'static str, value: &str) -> Self {
        self.field(name, label, "email", value)
    }

    /// Password inputs are never pre-filled.
    pub fn password(self, name: &'static str, label: &'static str) -> Self {
        self.field(name, label, "password", "")
    }

    pub fn textarea(self, name: &'static str, label: &'static str, value: &str) -> Self {
        self.field(name, label, "textarea", value)
    }

    pub fn checkbox(mut self, name: &'static str, label: &'static str, checked: bool) -> Self {
        self = self.field(name, label, "checkbox", "");
        if let Some(last) = self.fields.last_mut() {
            last.checked = checked;
        }
        self
    }

    /// Marks the most recently added field as required.
    pub fn required(mut self) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.required = true;
        }
        self
    }

    pub fn errors(mut self, errors: &FormErrors) -> Self {
        for field in &mut self.fields {
            field.errors = errors.get(field.name).to_vec();
        }
        self
    }

    pub fn field_errors(&self, name: &str) -> &[String] {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.errors.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_attach_to_matching_fields() {
        let mut errors = FormErrors::new();
        errors.add("email", "Already exists.");

        let form = FormView::new("/admin/user/create/", "Create")
            .email("email", "Email", "a@b.co")
            .required()
            .password("password", "Password")
            .errors(&errors);

        assert_eq!(form.field_errors("email").to_vec(), vec!["Already exists.".to_string()]);
        assert!(form.field_errors("password").is_empty());
        assert!(form.fields[0].required);
        assert!(!form.fields[1].required);
    }

    #[test]
    fn test_password_is_never_prefilled() {
        let form = FormView::new("/auth/login/", "Sign in").password("password", "Password");
        assert_eq!(form.fields[0].value, "");
        assert_eq!(form.fields[0].kind, "password");
    }

    #[test]
    fn test_checkbox_state() {
        let form = FormView::new("/admin/email/create/", "Create").checkbox("is_active", "Active", true);
        assert!(form.fields[0].checked);
    }
}
