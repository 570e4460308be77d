//! Shared value types for workflow overlays: content identities and the
//! presentation structures hosts hand over for augmentation.

pub mod form;
pub mod identity;

pub use form::{
    CompositeField, DropdownField, FieldList, FieldListError, FormAction, FormField, GridField,
    GridRecord, HiddenField, ListboxField, ReadonlyField, SourceOption, Tab, TabSet,
};
pub use identity::{ContentIdentity, DefinitionId, InstanceId, Member, TransitionId};
