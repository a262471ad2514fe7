//! Field Descriptors
//!
//! Typed descriptions of editable fields, shared by step forms and
//! accordion items. Getters and setters are plain fn pointers so a
//! descriptor is `Copy` and can be captured freely by view closures.

/// Input widget used to render a field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    TextArea,
    Date,
    Password,
    Url,
    Checkbox,
}

/// How a field reads and writes its record
pub enum Accessor<T> {
    Text {
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    },
    Flag {
        get: fn(&T) -> bool,
        set: fn(&mut T, bool),
    },
}

/// Per-field hide toggle
pub struct HideToggle<T> {
    pub label: &'static str,
    pub get: fn(&T) -> bool,
    pub set: fn(&mut T, bool),
}

/// One editable field of a record `T`
pub struct FieldSpec<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub access: Accessor<T>,
    pub hide: Option<HideToggle<T>>,
}

// Manual impls: derive would demand `T: Copy`
impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Accessor<T> {}

impl<T> Clone for HideToggle<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for HideToggle<T> {}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for FieldSpec<T> {}

impl<T> FieldSpec<T> {
    pub fn text(
        key: &'static str,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> Self {
        Self {
            key,
            label,
            placeholder: "",
            kind: FieldKind::Input,
            required: false,
            min: None,
            max: None,
            access: Accessor::Text { get, set },
            hide: None,
        }
    }

    pub fn flag(
        key: &'static str,
        label: &'static str,
        get: fn(&T) -> bool,
        set: fn(&mut T, bool),
    ) -> Self {
        Self {
            key,
            label,
            placeholder: "",
            kind: FieldKind::Checkbox,
            required: false,
            min: None,
            max: None,
            access: Accessor::Flag { get, set },
            hide: None,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn textarea(self) -> Self {
        self.kind(FieldKind::TextArea)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn hidden_by(mut self, toggle: HideToggle<T>) -> Self {
        self.hide = Some(toggle);
        self
    }

    /// Text value, empty for flags
    pub fn value(&self, record: &T) -> String {
        match self.access {
            Accessor::Text { get, .. } => get(record),
            Accessor::Flag { .. } => String::new(),
        }
    }

    pub fn set_value(&self, record: &mut T, value: String) {
        if let Accessor::Text { set, .. } = self.access {
            set(record, value);
        }
    }

    pub fn flag_value(&self, record: &T) -> bool {
        match self.access {
            Accessor::Flag { get, .. } => get(record),
            Accessor::Text { .. } => false,
        }
    }

    pub fn set_flag(&self, record: &mut T, value: bool) {
        if let Accessor::Flag { set, .. } = self.access {
            set(record, value);
        }
    }

    pub fn is_hidden(&self, record: &T) -> bool {
        self.hide.map(|h| (h.get)(record)).unwrap_or(false)
    }

    pub fn set_hidden(&self, record: &mut T, hidden: bool) {
        if let Some(h) = self.hide {
            (h.set)(record, hidden);
        }
    }
}

/// Text field bound to a `String` member
#[macro_export]
macro_rules! text_field {
    ($ty:ty, $field:ident, $key:expr, $label:expr) => {
        $crate::forms::FieldSpec::<$ty>::text(
            $key,
            $label,
            |r: &$ty| r.$field.clone(),
            |r: &mut $ty, v: String| r.$field = v,
        )
    };
}

/// Checkbox bound to a `bool` member
#[macro_export]
macro_rules! flag_field {
    ($ty:ty, $field:ident, $key:expr, $label:expr) => {
        $crate::forms::FieldSpec::<$ty>::flag(
            $key,
            $label,
            |r: &$ty| r.$field,
            |r: &mut $ty, v: bool| r.$field = v,
        )
    };
}

/// Hide toggle bound to a `bool` member
#[macro_export]
macro_rules! hide_toggle {
    ($ty:ty, $field:ident, $label:expr) => {
        $crate::forms::HideToggle::<$ty> {
            label: $label,
            get: |r: &$ty| r.$field,
            set: |r: &mut $ty, v: bool| r.$field = v,
        }
    };
}

/// Character count as shown to the user
pub fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Rec {
        title: String,
        hide_title: bool,
        featured: bool,
    }

    fn title_field() -> FieldSpec<Rec> {
        crate::text_field!(Rec, title, "title", "Título")
            .max(10)
            .hidden_by(crate::hide_toggle!(Rec, hide_title, "Ocultar título"))
    }

    #[test]
    fn test_text_accessor() {
        let mut rec = Rec::default();
        let field = title_field();
        field.set_value(&mut rec, "Olá".into());
        assert_eq!(field.value(&rec), "Olá");
        assert_eq!(field.max, Some(10));
    }

    #[test]
    fn test_hide_toggle_keeps_value() {
        let mut rec = Rec::default();
        let field = title_field();
        field.set_value(&mut rec, "mantido".into());
        field.set_hidden(&mut rec, true);
        assert!(field.is_hidden(&rec));
        field.set_hidden(&mut rec, false);
        assert_eq!(field.value(&rec), "mantido");
    }

    #[test]
    fn test_flag_accessor() {
        let mut rec = Rec::default();
        let field = crate::flag_field!(Rec, featured, "featured", "Destaque");
        field.set_flag(&mut rec, true);
        assert!(field.flag_value(&rec));
        assert_eq!(field.kind, FieldKind::Checkbox);
    }

    #[test]
    fn test_char_len_counts_unicode_scalars() {
        assert_eq!(char_len("  ação  "), 4);
    }
}
