#![allow(clippy::result_large_err)]

//! Workflow buttons for the CMS action bar.
//!
//! [`TransitionMenuBuilder`] works out which buttons the actor gets;
//! [`apply_actions`] places them into the host's action [`FieldList`].
//! Building is read-only and can be repeated freely.

use crate::core::config::LabelsConfig;
use crate::core::engine::{
    ContentObject, WorkflowAction, WorkflowDefinition, WorkflowTransition,
};
use crate::core::error::AppError;
use crate::core::resolver::WorkflowResolver;
use workflow_overlay_types::{FieldList, FieldListError, FormAction, FormField, Member, Tab, TabSet};

pub const ACTION_MENUS: &str = "ActionMenus";
pub const MAJOR_ACTIONS: &str = "MajorActions";
pub const MORE_OPTIONS: &str = "MoreOptions";
pub const WORKFLOW_OPTIONS: &str = "WorkflowOptions";
pub const ADDITIONAL_WORKFLOWS: &str = "AdditionalWorkflows";

/// Buttons offered for one object, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowActions {
    /// Nothing to offer.
    Empty,
    /// A running instance the actor may edit; executable transitions in
    /// definition order. May be empty when no transition is executable.
    Transitions(Vec<FormAction>),
    /// No running instance: the first startable definition is the major
    /// action, the rest form the secondary group in declared order.
    Start {
        major: FormAction,
        additional: Vec<FormAction>,
    },
}

impl WorkflowActions {
    pub fn is_empty(&self) -> bool {
        match self {
            WorkflowActions::Empty => true,
            WorkflowActions::Transitions(items) => items.is_empty(),
            WorkflowActions::Start { .. } => false,
        }
    }

    pub fn major(&self) -> Option<&FormAction> {
        match self {
            WorkflowActions::Start { major, .. } => Some(major),
            _ => None,
        }
    }

    pub fn secondary(&self) -> &[FormAction] {
        match self {
            WorkflowActions::Start { additional, .. } => additional,
            _ => &[],
        }
    }

    pub fn transitions(&self) -> &[FormAction] {
        match self {
            WorkflowActions::Transitions(items) => items,
            _ => &[],
        }
    }

    /// Every button, major first.
    pub fn items(&self) -> Vec<&FormAction> {
        match self {
            WorkflowActions::Empty => Vec::new(),
            WorkflowActions::Transitions(items) => items.iter().collect(),
            WorkflowActions::Start { major, additional } => {
                std::iter::once(major).chain(additional.iter()).collect()
            }
        }
    }
}

pub struct TransitionMenuBuilder<'a> {
    resolver: &'a WorkflowResolver,
}

impl<'a> TransitionMenuBuilder<'a> {
    pub fn new(resolver: &'a WorkflowResolver) -> Self {
        Self { resolver }
    }

    pub fn build_actions(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<WorkflowActions, AppError> {
        if let Some(instance) = self.resolver.resolve(object)? {
            if !instance.can_edit() {
                tracing::debug!(
                    target_object = %object.identity(),
                    instance = %instance.id(),
                    "actor may not edit the running workflow; no transitions offered"
                );
                return Ok(WorkflowActions::Empty);
            }

            let transitions = instance
                .current_action()
                .map(|current| current.valid_transitions())
                .unwrap_or_default();
            let offered: Vec<FormAction> = transitions
                .iter()
                .filter(|transition| transition.can_execute(instance.as_ref()))
                .map(|transition| transition_action(transition.as_ref()))
                .collect();
            tracing::debug!(
                target_object = %object.identity(),
                available = transitions.len(),
                offered = offered.len(),
                "built workflow transition actions"
            );
            return Ok(WorkflowActions::Transitions(offered));
        }

        let definitions = self.resolver.service().get_definitions_for(object)?;
        let mut editable: Option<bool> = None;
        let mut major: Option<FormAction> = None;
        let mut additional = Vec::new();

        for definition in &definitions {
            let Some(initial) = definition.initial_action() else {
                continue;
            };
            if !*editable.get_or_insert_with(|| object.can_edit(actor)) {
                continue;
            }
            let action = start_action(definition.as_ref(), initial.as_ref());
            if major.is_none() {
                major = Some(action);
            } else {
                additional.push(action);
            }
        }

        tracing::debug!(
            target_object = %object.identity(),
            definitions = definitions.len(),
            startable = usize::from(major.is_some()) + additional.len(),
            "built workflow start actions"
        );
        Ok(match major {
            Some(major) => WorkflowActions::Start { major, additional },
            None => WorkflowActions::Empty,
        })
    }
}

/// Button that moves a running instance along `transition`.
pub fn transition_action(transition: &dyn WorkflowTransition) -> FormAction {
    FormAction::new(
        format!("updateworkflow-{}", transition.id()),
        transition.title(),
    )
    .with_attribute("data-transitionid", transition.id().to_string())
}

/// Button that starts `definition` at its initial action.
pub fn start_action(definition: &dyn WorkflowDefinition, initial: &dyn WorkflowAction) -> FormAction {
    let label = definition
        .initial_action_button_text()
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| initial.title());
    FormAction::new(format!("startworkflow-{}", definition.id()), label)
        .add_extra_class("start-workflow")
        .with_attribute("data-workflow", definition.id().to_string())
        .add_extra_class("btn-primary")
}

/// Place `actions` into a host action bar.
///
/// Transitions go into the `WorkflowOptions` tab of the `ActionMenus` tab set.
/// A major start action goes into `MajorActions` when the host has one, else
/// the top level; the secondary group becomes an `AdditionalWorkflows` tab
/// placed before `MoreOptions`, or at the end of the menu.
pub fn apply_actions(
    actions: WorkflowActions,
    fields: &mut FieldList,
    labels: &LabelsConfig,
) -> Result<(), FieldListError> {
    match actions {
        WorkflowActions::Empty => {}
        WorkflowActions::Transitions(items) => {
            let menu = ensure_action_menu(fields)?;
            if menu.position_of(WORKFLOW_OPTIONS).is_none() {
                menu.push(Tab::new(WORKFLOW_OPTIONS).with_title(labels.workflow_options.clone()));
            }
            let options = menu
                .field_by_name_mut(WORKFLOW_OPTIONS)
                .and_then(FormField::children_mut)
                .ok_or_else(|| FieldListError::NotATab(WORKFLOW_OPTIONS.to_string()))?;
            for item in items {
                options.push(item);
            }
        }
        WorkflowActions::Start { major, additional } => {
            match fields
                .field_by_name_mut(MAJOR_ACTIONS)
                .and_then(FormField::children_mut)
            {
                Some(bar) => bar.push(major),
                None => fields.push(major),
            }

            if !additional.is_empty() {
                let mut tab = Tab::new(ADDITIONAL_WORKFLOWS)
                    .with_title(labels.additional_workflows.clone());
                for item in additional {
                    tab.fields.push(item);
                }
                let menu = ensure_action_menu(fields)?;
                match menu.position_of(MORE_OPTIONS) {
                    Some(index) => menu.insert(index, tab),
                    None => menu.push(tab),
                }
            }
        }
    }
    Ok(())
}

fn create_action_menu() -> TabSet {
    TabSet::new(ACTION_MENUS)
        .add_extra_class("ss-ui-action-tabset")
        .add_extra_class("action-menus")
}

fn ensure_action_menu(fields: &mut FieldList) -> Result<&mut FieldList, FieldListError> {
    if fields.position_of(ACTION_MENUS).is_none() {
        fields.push(create_action_menu());
    }
    fields
        .field_by_name_mut(ACTION_MENUS)
        .and_then(FormField::children_mut)
        .ok_or_else(|| FieldListError::NotATabSet(ACTION_MENUS.to_string()))
}
