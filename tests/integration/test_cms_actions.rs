#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;
use support::{
    environment, FakeAction, FakeActionInstance, FakeCms, FakeDefinition, FakeInstance,
    FakeObject, FakeService, FakeTransition,
};
use workflow_overlay::core::engine::{DefinitionRef, InstanceRef};
use workflow_overlay::core::transitions::{
    ACTION_MENUS, ADDITIONAL_WORKFLOWS, MAJOR_ACTIONS, MORE_OPTIONS, WORKFLOW_OPTIONS,
};
use workflow_overlay::form::{CompositeField, FieldList, FormAction, FormField, Tab, TabSet};

/// Action bar as the CMS builds it before workflow buttons are added.
fn host_actions() -> FieldList {
    let mut major = CompositeField::new(MAJOR_ACTIONS);
    major.fields.push(FormAction::new("action_save", "Save"));

    let mut menu = TabSet::new(ACTION_MENUS);
    let mut more = Tab::new(MORE_OPTIONS);
    more.fields.push(FormAction::new("action_archive", "Archive"));
    menu.tabs.push(more);

    let mut actions = FieldList::new();
    actions.push(major);
    actions.push(menu);
    actions
}

fn starting_service() -> Arc<FakeService> {
    Arc::new(FakeService {
        definitions_for: vec![
            Arc::new(FakeDefinition::startable(1, "Review")),
            Arc::new(FakeDefinition {
                initial: Some(FakeAction::new("Fast-track")),
                ..FakeDefinition::startable(2, "Express")
            }),
        ],
        ..FakeService::default()
    })
}

fn running_service() -> Arc<FakeService> {
    let definition: DefinitionRef = Arc::new(FakeDefinition::startable(1, "Review"));
    let instance: InstanceRef = Arc::new(FakeInstance {
        current: Some(FakeActionInstance::new(
            FakeAction::new("Awaiting approval"),
            vec![
                FakeTransition::new(31, "Approve", true),
                FakeTransition::new(32, "Reject", true),
            ],
        )),
        ..FakeInstance::new(5, definition)
    });
    Arc::new(FakeService::with_instance(instance))
}

fn child_names(fields: &FieldList, path: &str) -> Vec<String> {
    fields
        .field_by_name(path)
        .and_then(FormField::children)
        .map(|list| list.names().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

#[test]
fn test_start_actions_placed_into_host_bar() {
    let (env, _state) = environment(starting_service(), FakeCms::editor());
    let binding = env.bind(Arc::new(FakeObject::page(3)));
    let mut actions = host_actions();

    binding.update_cms_actions(&mut actions).unwrap();

    assert_eq!(
        child_names(&actions, MAJOR_ACTIONS),
        vec!["action_save", "startworkflow-1"]
    );
    assert_eq!(
        child_names(&actions, ACTION_MENUS),
        vec![ADDITIONAL_WORKFLOWS, MORE_OPTIONS]
    );
    assert_eq!(
        child_names(&actions, "ActionMenus.AdditionalWorkflows"),
        vec!["startworkflow-2"]
    );
    match actions.field_by_name("ActionMenus.AdditionalWorkflows") {
        Some(FormField::Tab(tab)) => {
            assert_eq!(tab.title.as_deref(), Some("Additional Workflows"))
        }
        other => panic!("expected additional workflows tab, got {:?}", other),
    }
}

#[test]
fn test_start_actions_on_bare_bar() {
    let (env, _state) = environment(starting_service(), FakeCms::editor());
    let binding = env.bind(Arc::new(FakeObject::page(3)));
    let mut actions = FieldList::new();

    binding.update_cms_actions(&mut actions).unwrap();

    assert_eq!(actions.names(), vec!["startworkflow-1", ACTION_MENUS]);
    match actions.field_by_name(ACTION_MENUS) {
        Some(FormField::TabSet(menu)) => {
            assert!(menu.extra_classes.contains(&"ss-ui-action-tabset".to_string()));
            assert!(menu.extra_classes.contains(&"action-menus".to_string()));
        }
        other => panic!("expected action menu, got {:?}", other),
    }
    assert_eq!(
        child_names(&actions, ACTION_MENUS),
        vec![ADDITIONAL_WORKFLOWS]
    );
}

#[test]
fn test_transitions_go_into_workflow_options() {
    let (env, _state) = environment(running_service(), FakeCms::editor());
    let binding = env.bind(Arc::new(FakeObject::page(3)));
    let mut actions = host_actions();

    binding.update_cms_actions(&mut actions).unwrap();

    assert_eq!(
        child_names(&actions, ACTION_MENUS),
        vec![MORE_OPTIONS, WORKFLOW_OPTIONS]
    );
    assert_eq!(
        child_names(&actions, "ActionMenus.WorkflowOptions"),
        vec!["updateworkflow-31", "updateworkflow-32"]
    );
    assert_eq!(child_names(&actions, MAJOR_ACTIONS), vec!["action_save"]);
    match actions.field_by_name("ActionMenus.WorkflowOptions") {
        Some(FormField::Tab(tab)) => assert_eq!(tab.title.as_deref(), Some("Workflow options")),
        other => panic!("expected workflow options tab, got {:?}", other),
    }
}

#[test]
fn test_archived_objects_get_no_actions() {
    let service = starting_service();
    let (env, _state) = environment(service.clone(), FakeCms::editor());
    let binding = env.bind(Arc::new(FakeObject {
        archived: true,
        ..FakeObject::page(3)
    }));
    let mut actions = host_actions();

    binding.update_cms_actions(&mut actions).unwrap();

    assert_eq!(actions, host_actions());
    assert_eq!(service.definitions_for_count(), 0);
}

#[test]
fn test_controller_without_workflow_support_gets_no_actions() {
    let service = running_service();
    let cms = FakeCms {
        supports_workflow: false,
        ..FakeCms::editor()
    };
    let (env, _state) = environment(service.clone(), cms);
    let binding = env.bind(Arc::new(FakeObject::page(3)));
    let mut actions = host_actions();

    binding.update_cms_actions(&mut actions).unwrap();

    assert_eq!(actions, host_actions());
    assert_eq!(service.workflow_lookup_count(), 0);
}

#[test]
fn test_menu_name_clash_is_reported() {
    let (env, _state) = environment(running_service(), FakeCms::editor());
    let binding = env.bind(Arc::new(FakeObject::page(3)));
    let mut actions = FieldList::new();
    actions.push(FormAction::new(ACTION_MENUS, "Not a menu"));

    let err = binding.update_cms_actions(&mut actions).unwrap_err();
    assert_eq!(err.code, "WFO-FIELDS");
}
