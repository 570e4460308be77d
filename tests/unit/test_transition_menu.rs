#[path = "../support/mod.rs"]
mod support;

use std::sync::Arc;
use support::{
    editor, FakeAction, FakeActionInstance, FakeDefinition, FakeInstance, FakeObject, FakeService,
    FakeTransition,
};
use workflow_overlay::core::engine::{DefinitionRef, InstanceRef};
use workflow_overlay::core::resolver::WorkflowResolver;
use workflow_overlay::core::transitions::{TransitionMenuBuilder, WorkflowActions};

fn build(service: Arc<FakeService>, object: &FakeObject) -> WorkflowActions {
    let resolver = WorkflowResolver::new(service);
    TransitionMenuBuilder::new(&resolver)
        .build_actions(object, Some(&editor()))
        .unwrap()
}

fn running(editable: bool) -> InstanceRef {
    let definition: DefinitionRef = Arc::new(FakeDefinition::startable(1, "Review"));
    let current = FakeActionInstance::new(
        FakeAction::new("Awaiting approval"),
        vec![
            FakeTransition::new(31, "Approve", true),
            FakeTransition::new(32, "Reject", false),
            FakeTransition::new(33, "Escalate", true),
        ],
    );
    Arc::new(FakeInstance {
        current: Some(current),
        editable,
        ..FakeInstance::new(5, definition)
    })
}

fn names(actions: &WorkflowActions) -> Vec<String> {
    actions.items().iter().map(|a| a.name.clone()).collect()
}

#[test]
fn test_nothing_applicable_builds_nothing() {
    let actions = build(Arc::new(FakeService::default()), &FakeObject::page(1));
    assert_eq!(actions, WorkflowActions::Empty);
    assert!(actions.is_empty());
}

#[test]
fn test_only_executable_transitions_offered() {
    let service = Arc::new(FakeService::with_instance(running(true)));
    let actions = build(service.clone(), &FakeObject::page(1));

    assert_eq!(names(&actions), vec!["updateworkflow-31", "updateworkflow-33"]);
    let approve = &actions.transitions()[0];
    assert_eq!(approve.title, "Approve");
    assert_eq!(approve.attribute("data-transitionid"), Some("31"));
    // Definitions are not consulted while an instance is running.
    assert_eq!(service.definitions_for_count(), 0);
}

#[test]
fn test_single_executable_transition() {
    let definition: DefinitionRef = Arc::new(FakeDefinition::startable(1, "Review"));
    let current = FakeActionInstance::new(
        FakeAction::new("Draft"),
        vec![
            FakeTransition::new(1, "T1", true),
            FakeTransition::new(2, "T2", false),
        ],
    );
    let instance: InstanceRef = Arc::new(FakeInstance {
        current: Some(current),
        ..FakeInstance::new(8, definition)
    });
    let actions = build(
        Arc::new(FakeService::with_instance(instance)),
        &FakeObject::page(1),
    );
    assert_eq!(names(&actions), vec!["updateworkflow-1"]);
}

#[test]
fn test_uneditable_instance_offers_nothing() {
    let service = Arc::new(FakeService {
        definitions_for: vec![Arc::new(FakeDefinition::startable(2, "Other"))],
        ..FakeService::with_instance(running(false))
    });
    let actions = build(service, &FakeObject::page(1));
    assert_eq!(actions, WorkflowActions::Empty);
}

#[test]
fn test_instance_without_current_action_offers_no_transitions() {
    let definition: DefinitionRef = Arc::new(FakeDefinition::startable(1, "Review"));
    let instance: InstanceRef = Arc::new(FakeInstance::new(6, definition));
    let actions = build(
        Arc::new(FakeService::with_instance(instance)),
        &FakeObject::page(1),
    );
    assert_eq!(actions, WorkflowActions::Transitions(Vec::new()));
    assert!(actions.is_empty());
}

#[test]
fn test_first_startable_definition_is_major() {
    let service = Arc::new(FakeService {
        definitions_for: vec![
            Arc::new(FakeDefinition::startable(1, "D1")),
            Arc::new(FakeDefinition::startable(2, "D2")),
            Arc::new(FakeDefinition::startable(3, "D3")),
        ],
        ..FakeService::default()
    });
    let object = FakeObject::page(1);
    let actions = build(service, &object);

    let major = actions.major().unwrap();
    assert_eq!(major.name, "startworkflow-1");
    assert!(major.has_class("start-workflow"));
    assert!(major.has_class("btn-primary"));
    assert_eq!(major.attribute("data-workflow"), Some("1"));
    let secondary: Vec<&str> = actions.secondary().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(secondary, vec!["startworkflow-2", "startworkflow-3"]);
    // Base edit rights are checked once per build.
    assert_eq!(object.edit_check_count(), 1);
}

#[test]
fn test_button_label_precedence() {
    let service = Arc::new(FakeService {
        definitions_for: vec![
            Arc::new(FakeDefinition {
                button_text: Some("Request review".to_string()),
                ..FakeDefinition::startable(1, "Review")
            }),
            Arc::new(FakeDefinition {
                button_text: Some(String::new()),
                initial: Some(FakeAction::new("Fast-track")),
                ..FakeDefinition::startable(2, "Express")
            }),
        ],
        ..FakeService::default()
    });
    let actions = build(service, &FakeObject::page(1));

    assert_eq!(actions.major().unwrap().title, "Request review");
    assert_eq!(actions.secondary()[0].title, "Fast-track");
}

#[test]
fn test_direct_and_additional_definitions() {
    let service = Arc::new(FakeService {
        definitions_for: vec![
            Arc::new(FakeDefinition::startable(10, "A")),
            Arc::new(FakeDefinition {
                initial: Some(FakeAction::new("Fast-track")),
                ..FakeDefinition::startable(11, "B")
            }),
        ],
        ..FakeService::default()
    });
    let actions = build(service, &FakeObject::page(1));

    assert_eq!(actions.major().unwrap().title, "Submit");
    let secondary: Vec<&str> = actions.secondary().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(secondary, vec!["Fast-track"]);
}

#[test]
fn test_definitions_without_initial_action_skipped() {
    let service = Arc::new(FakeService {
        definitions_for: vec![
            Arc::new(FakeDefinition::without_initial(1, "Broken")),
            Arc::new(FakeDefinition::startable(2, "Working")),
        ],
        ..FakeService::default()
    });
    let actions = build(service, &FakeObject::page(1));
    assert_eq!(names(&actions), vec!["startworkflow-2"]);
    assert!(actions.secondary().is_empty());
}

#[test]
fn test_actor_without_edit_rights_cannot_start() {
    let service = Arc::new(FakeService {
        definitions_for: vec![Arc::new(FakeDefinition::startable(1, "Review"))],
        ..FakeService::default()
    });
    let object = FakeObject {
        editable: false,
        ..FakeObject::page(1)
    };
    assert_eq!(build(service, &object), WorkflowActions::Empty);
}

#[test]
fn test_building_is_repeatable() {
    let service = Arc::new(FakeService::with_instance(running(true)));
    let resolver = WorkflowResolver::new(service.clone());
    let builder = TransitionMenuBuilder::new(&resolver);
    let object = FakeObject::page(1);

    let first = builder.build_actions(&object, Some(&editor())).unwrap();
    let second = builder.build_actions(&object, Some(&editor())).unwrap();
    assert_eq!(first, second);
    assert_eq!(service.workflow_lookup_count(), 1);
}
