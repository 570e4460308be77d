#![allow(clippy::result_large_err)]

//! Workflow configuration fields contributed to content edit forms.

use crate::core::config::OverlayConfig;
use crate::core::engine::{CmsContext, ContentObject};
use crate::core::error::AppError;
use crate::core::resolver::WorkflowResolver;
use workflow_overlay_types::{
    DropdownField, FieldList, FormField, GridField, GridRecord, HiddenField, ListboxField,
    ReadonlyField, SourceOption,
};

pub const ROOT_TAB_SET: &str = "Root";
pub const WORKFLOW_TAB_PATH: &str = "Root.Workflow";
pub const DEFINITION_FIELD: &str = "WorkflowDefinitionID";
pub const ADDITIONAL_DEFINITIONS_FIELD: &str = "AdditionalWorkflowDefinitions";
pub const EFFECTIVE_WORKFLOW_FIELD: &str = "EffectiveWorkflow";
pub const WORKFLOW_LOG_FIELD: &str = "WorkflowLog";
pub const TRIGGERED_WORKFLOW_FIELD: &str = "TriggeredWorkflowID";

pub struct WorkflowFieldContributor<'a> {
    object: &'a dyn ContentObject,
    resolver: &'a WorkflowResolver,
    cms: &'a dyn CmsContext,
    config: &'a OverlayConfig,
}

impl<'a> WorkflowFieldContributor<'a> {
    pub fn new(
        object: &'a dyn ContentObject,
        resolver: &'a WorkflowResolver,
        cms: &'a dyn CmsContext,
        config: &'a OverlayConfig,
    ) -> Self {
        Self {
            object,
            resolver,
            cms,
            config,
        }
    }

    /// Main edit form: configuration fields unless the object has a separate
    /// settings form, plus the hidden field carrying a triggered definition id.
    pub fn update_cms_fields(&self, fields: &mut FieldList) -> Result<(), AppError> {
        if !self.object.has_settings_fields() {
            self.update_fields(fields)?;
        }
        fields.push(HiddenField::new(TRIGGERED_WORKFLOW_FIELD));
        Ok(())
    }

    pub fn update_settings_fields(&self, fields: &mut FieldList) -> Result<(), AppError> {
        self.update_fields(fields)
    }

    /// Definition pickers, the effective workflow and the workflow log.
    ///
    /// Unsaved objects get nothing. Fields land in `Root.Workflow` when the
    /// form has a `Root` tab set, otherwise at the end of `fields`.
    pub fn update_fields(&self, fields: &mut FieldList) -> Result<(), AppError> {
        let identity = self.object.identity();
        if !identity.is_saved() {
            return Ok(());
        }

        let labels = &self.config.labels;
        let service = self.resolver.service();
        let mut contributed: Vec<FormField> = Vec::new();

        if self
            .cms
            .check_permission(&self.config.permissions.apply_workflow_code)
        {
            let direct = self.object.workflow_definition_id();
            let source: Vec<SourceOption> = service
                .get_definitions()?
                .iter()
                .map(|definition| SourceOption::new(definition.id().to_string(), definition.title()))
                .collect();

            contributed.push(
                DropdownField {
                    name: DEFINITION_FIELD.to_string(),
                    title: labels.applied_workflow.clone(),
                    source: source.clone(),
                    empty_string: Some(labels.inherit_from_parent.clone()),
                    value: direct.map(|id| id.to_string()),
                }
                .into(),
            );

            // Additional definitions only make sense next to a direct one.
            if let Some(direct) = direct {
                fields.remove_by_name(ADDITIONAL_DEFINITIONS_FIELD);
                let direct = direct.to_string();
                contributed.push(
                    ListboxField {
                        name: ADDITIONAL_DEFINITIONS_FIELD.to_string(),
                        title: labels.additional_workflows.clone(),
                        source: source
                            .into_iter()
                            .filter(|option| option.value != direct)
                            .collect(),
                        values: self
                            .object
                            .additional_workflow_definition_ids()
                            .iter()
                            .map(ToString::to_string)
                            .collect(),
                    }
                    .into(),
                );
            }
        }

        if let Some(instance) = self.resolver.resolve(self.object)? {
            contributed.push(
                ReadonlyField {
                    name: EFFECTIVE_WORKFLOW_FIELD.to_string(),
                    title: labels.effective_workflow.clone(),
                    value: instance.definition().title().to_string(),
                }
                .into(),
            );
        }

        let records = service
            .get_instances_for(&identity)?
            .iter()
            .map(|instance| GridRecord {
                id: instance.id().0,
                title: instance.title(),
            })
            .collect();
        contributed.push(
            GridField {
                name: WORKFLOW_LOG_FIELD.to_string(),
                title: labels.workflow_log.clone(),
                records,
                editable: true,
            }
            .into(),
        );

        tracing::debug!(
            target_object = %identity,
            contributed = contributed.len(),
            "contributed workflow fields"
        );

        let target = if fields.position_of(ROOT_TAB_SET).is_some() {
            fields.find_or_make_tab(WORKFLOW_TAB_PATH)?
        } else {
            fields
        };
        for field in contributed {
            target.push(field);
        }
        Ok(())
    }
}
