//! src/view.rs
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Email => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: &'static str,
    pub label: String,
    pub input_type: InputType,
    pub placeholder: String,
    pub value: String,
    pub disabled: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub caption: String,
    pub disabled: bool,
}

/// Snapshot of everything the form currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub name: FieldView,
    pub email: FieldView,
    pub button: ButtonView,
}

impl FormView {
    pub fn is_interactive(&self) -> bool {
        !(self.name.disabled || self.email.disabled || self.button.disabled)
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<form class="newsletter" method="post">
    {name}
    {email}
    <button type="submit"{disabled}>{caption}</button>
</form>"#,
            name = field_html(&self.name),
            email = field_html(&self.email),
            disabled = disabled_attr(self.button.disabled),
            caption = htmlescape::encode_minimal(&self.button.caption),
        )
    }
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}

fn field_html(field: &FieldView) -> String {
    let error_html = match &field.error {
        Some(error) => format!(
            r#"
    <p class="error">{}</p>"#,
            htmlescape::encode_minimal(error)
        ),
        None => "".into(),
    };

    format!(
        r#"<label for="{id}">{label}</label>
    <input
        type="{input_type}"
        id="{id}"
        name="{id}"
        placeholder="{placeholder}"
        value="{value}"{disabled}
    >{error_html}"#,
        id = field.id,
        label = htmlescape::encode_minimal(&field.label),
        input_type = field.input_type.as_str(),
        placeholder = htmlescape::encode_attribute(&field.placeholder),
        value = htmlescape::encode_attribute(&field.value),
        disabled = disabled_attr(field.disabled),
    )
}

impl std::fmt::Display for FieldView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = if self.value.is_empty() {
            self.placeholder.dimmed()
        } else {
            self.value.normal()
        };
        write!(f, "{}: [{}]", self.label.bold(), value)?;
        if self.disabled {
            write!(f, " {}", "(disabled)".dimmed())?;
        }
        if let Some(error) = &self.error {
            write!(f, "\n  {}", error.red())?;
        }
        Ok(())
    }
}

impl std::fmt::Display for FormView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.email)?;
        let caption = format!("[ {} ]", self.button.caption);
        if self.button.disabled {
            write!(f, "{}", caption.dimmed())
        } else {
            write!(f, "{}", caption.blue().bold())
        }
    }
}
