//! Caller-owned presentation structures.
//!
//! Hosts build a [`FieldList`] for an edit form or its action bar and hand it to
//! the overlay, which appends workflow fields and buttons. Nothing here renders;
//! the structures only record names, labels, classes and attributes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors raised while navigating or reshaping a [`FieldList`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldListError {
    #[error("tab path must not be empty")]
    EmptyPath,
    #[error("field '{0}' exists but is not a tab set")]
    NotATabSet(String),
    #[error("field '{0}' exists but is not a tab")]
    NotATab(String),
}

/// A form button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormAction {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub extra_classes: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl FormAction {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, title: T) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            extra_classes: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn add_extra_class<T: Into<String>>(mut self, class: T) -> Self {
        let class = class.into();
        if !self.extra_classes.contains(&class) {
            self.extra_classes.push(class);
        }
        self
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.extra_classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenField {
    pub name: String,
    pub value: Option<String>,
}

impl HiddenField {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// One selectable value of a dropdown or listbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOption {
    pub value: String,
    pub title: String,
}

impl SourceOption {
    pub fn new<V: Into<String>, T: Into<String>>(value: V, title: T) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownField {
    pub name: String,
    pub title: String,
    pub source: Vec<SourceOption>,
    /// Label of the leading "nothing selected" option, if offered.
    pub empty_string: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListboxField {
    pub name: String,
    pub title: String,
    pub source: Vec<SourceOption>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadonlyField {
    pub name: String,
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRecord {
    pub id: u64,
    pub title: String,
}

/// Tabular listing of records, optionally with edit/detail-form controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridField {
    pub name: String,
    pub title: String,
    pub records: Vec<GridRecord>,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tab {
    pub name: String,
    pub title: Option<String>,
    pub fields: FieldList,
}

impl Tab {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            title: None,
            fields: FieldList::new(),
        }
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabSet {
    pub name: String,
    pub title: Option<String>,
    #[serde(default)]
    pub extra_classes: Vec<String>,
    pub tabs: FieldList,
}

impl TabSet {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            title: None,
            extra_classes: Vec::new(),
            tabs: FieldList::new(),
        }
    }

    pub fn add_extra_class<T: Into<String>>(mut self, class: T) -> Self {
        self.extra_classes.push(class.into());
        self
    }
}

/// Named grouping without tab semantics, e.g. a "MajorActions" button bar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompositeField {
    pub name: String,
    pub fields: FieldList,
}

impl CompositeField {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            fields: FieldList::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormField {
    Action(FormAction),
    Hidden(HiddenField),
    Dropdown(DropdownField),
    Listbox(ListboxField),
    Readonly(ReadonlyField),
    Grid(GridField),
    Tab(Tab),
    TabSet(TabSet),
    Composite(CompositeField),
}

impl FormField {
    pub fn name(&self) -> &str {
        match self {
            FormField::Action(f) => &f.name,
            FormField::Hidden(f) => &f.name,
            FormField::Dropdown(f) => &f.name,
            FormField::Listbox(f) => &f.name,
            FormField::Readonly(f) => &f.name,
            FormField::Grid(f) => &f.name,
            FormField::Tab(f) => &f.name,
            FormField::TabSet(f) => &f.name,
            FormField::Composite(f) => &f.name,
        }
    }

    pub fn children(&self) -> Option<&FieldList> {
        match self {
            FormField::Tab(tab) => Some(&tab.fields),
            FormField::TabSet(set) => Some(&set.tabs),
            FormField::Composite(composite) => Some(&composite.fields),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut FieldList> {
        match self {
            FormField::Tab(tab) => Some(&mut tab.fields),
            FormField::TabSet(set) => Some(&mut set.tabs),
            FormField::Composite(composite) => Some(&mut composite.fields),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&FormAction> {
        match self {
            FormField::Action(action) => Some(action),
            _ => None,
        }
    }
}

macro_rules! impl_into_field {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FormField {
                fn from(value: $ty) -> Self {
                    FormField::$variant(value)
                }
            }
        )*
    };
}

impl_into_field!(
    FormAction => Action,
    HiddenField => Hidden,
    DropdownField => Dropdown,
    ListboxField => Listbox,
    ReadonlyField => Readonly,
    GridField => Grid,
    Tab => Tab,
    TabSet => TabSet,
    CompositeField => Composite,
);

/// Ordered list of form fields.
///
/// Name lookups only consider the top level; dotted paths such as
/// `ActionMenus.WorkflowOptions` descend into container fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldList {
    fields: Vec<FormField>,
}

impl FieldList {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push<F: Into<FormField>>(&mut self, field: F) {
        self.fields.push(field.into());
    }

    pub fn insert<F: Into<FormField>>(&mut self, index: usize, field: F) {
        let index = index.min(self.fields.len());
        self.fields.insert(index, field.into());
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.fields.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(FormField::name).collect()
    }

    /// Index of the top-level field called `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name() == name)
    }

    pub fn field_by_name(&self, path: &str) -> Option<&FormField> {
        match path.split_once('.') {
            Some((head, rest)) => self
                .fields
                .iter()
                .find(|f| f.name() == head)?
                .children()?
                .field_by_name(rest),
            None => self.fields.iter().find(|f| f.name() == path),
        }
    }

    pub fn field_by_name_mut(&mut self, path: &str) -> Option<&mut FormField> {
        match path.split_once('.') {
            Some((head, rest)) => self
                .fields
                .iter_mut()
                .find(|f| f.name() == head)?
                .children_mut()?
                .field_by_name_mut(rest),
            None => self.fields.iter_mut().find(|f| f.name() == path),
        }
    }

    /// Remove every field called `name`, including those nested in containers.
    pub fn remove_by_name(&mut self, name: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.name() != name);
        let mut removed = self.fields.len() != before;
        for field in &mut self.fields {
            if let Some(children) = field.children_mut() {
                removed |= children.remove_by_name(name);
            }
        }
        removed
    }

    /// Resolve a dotted tab path such as `Root.Workflow`, creating missing tab
    /// sets along the way and the final tab itself.
    pub fn find_or_make_tab(&mut self, path: &str) -> Result<&mut FieldList, FieldListError> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let (last, parents) = segments.split_last().ok_or(FieldListError::EmptyPath)?;

        let mut current = self;
        for segment in parents {
            let index = match current.position_of(segment) {
                Some(index) => index,
                None => {
                    current.push(TabSet::new(*segment));
                    current.fields.len() - 1
                }
            };
            current = match &mut current.fields[index] {
                FormField::TabSet(set) => &mut set.tabs,
                _ => return Err(FieldListError::NotATabSet(segment.to_string())),
            };
        }

        let index = match current.position_of(last) {
            Some(index) => index,
            None => {
                current.push(Tab::new(*last));
                current.fields.len() - 1
            }
        };
        match &mut current.fields[index] {
            FormField::Tab(tab) => Ok(&mut tab.fields),
            _ => Err(FieldListError::NotATab(last.to_string())),
        }
    }

    /// All buttons in this list and its containers, depth first.
    pub fn actions(&self) -> Vec<&FormAction> {
        let mut found = Vec::new();
        for field in &self.fields {
            match field {
                FormField::Action(action) => found.push(action),
                other => {
                    if let Some(children) = other.children() {
                        found.extend(children.actions());
                    }
                }
            }
        }
        found
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a FormField;
    type IntoIter = std::slice::Iter<'a, FormField>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
