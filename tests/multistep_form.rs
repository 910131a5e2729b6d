use std::cell::Cell;
use std::rc::Rc;

use stepform::widgets::validators::required;
use stepform::{
    ClickEvent, Drawable, FieldMessage, FieldRules, FormConfig, FormHandle, MultistepForm,
    NextTrigger, PrevTrigger, ProgressIndicator, RenderContext, Step, StepContainer,
    StepControls, StepFieldMap, SubmitTrigger, TriggerOutcome, progress_percent,
};

fn scenario_map() -> StepFieldMap {
    StepFieldMap::new()
        .with_step("a", ["name"])
        .with_step("b", Vec::<String>::new())
        .with_step("c", ["email"])
}

#[tokio::test]
async fn walks_the_three_step_scenario() {
    let submitted = Rc::new(Cell::new(false));
    let flag = submitted.clone();
    let form = FormHandle::new(scenario_map()).with_on_submit(move || flag.set(true));
    let rules = Rc::new(
        FieldRules::new()
            .rule("name", required("Name is required"))
            .rule("email", required("Email is required")),
    );
    let next = NextTrigger::new(&form, rules.clone(), "Next");
    let submit = SubmitTrigger::new(&form, rules.clone(), "Submit");

    // "name" is empty: the validator resolves false and nothing moves.
    assert_eq!(
        next.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Rejected
    );
    assert_eq!(form.current_index(), 0);
    assert_eq!(rules.error_for("name").as_deref(), Some("Name is required"));
    assert_eq!(
        FieldMessage::new(&rules, "name")
            .draw(&RenderContext::for_form(&form))
            .plain_text(),
        "Name is required"
    );
    assert!(!submit.is_visible());

    rules.set_value("name", "Ada");
    assert_eq!(
        next.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Advanced
    );
    assert_eq!(
        form.current_key().map(|key| key.into_inner()),
        Some("b".to_string())
    );
    assert!(!submit.is_visible());

    // "b" gates on nothing, so the still-empty email does not matter.
    assert_eq!(
        next.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Advanced
    );
    assert_eq!(form.current_index(), 2);
    assert!(submit.is_visible());
    assert!(!next.is_visible());

    assert_eq!(
        submit.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Rejected
    );
    assert!(!submitted.get());

    rules.set_value("email", "ada@example.com");
    assert_eq!(
        submit.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Submitted
    );
    assert!(submitted.get());
}

#[test]
fn renders_a_full_frame() {
    let form = FormHandle::new(scenario_map());
    let rules = Rc::new(FieldRules::new());
    let layout = MultistepForm::new()
        .child(ProgressIndicator::dots())
        .child(
            StepContainer::new()
                .step(Step::new("a").with_title("Account").line("Name"))
                .step(Step::new("b").with_title("Extras"))
                .step(Step::new("c").with_title("Contact").line("Email")),
        )
        .child(
            StepControls::new()
                .child(PrevTrigger::new(&form, "Back"))
                .child(NextTrigger::new(&form, rules.clone(), "Next"))
                .child(SubmitTrigger::new(&form, rules, "Submit")),
        );

    let first = layout.draw(&RenderContext::for_form(&form)).plain_text();
    assert_eq!(first, "●───○───○\nAccount ✓\nName\n Next ");

    form.next_step();
    let middle = layout.draw(&RenderContext::for_form(&form)).plain_text();
    assert_eq!(middle, "●───●───○\nExtras ✓\n Back    Next ");

    form.next_step();
    let last = layout.draw(&RenderContext::for_form(&form)).plain_text();
    assert_eq!(last, "●───●───●\nContact ✓\nEmail\n Back    Submit ");
}

#[test]
fn progress_fraction_matches_position() {
    assert_eq!(progress_percent(0, 1), 0);
    assert_eq!(progress_percent(2, 5), 50);
}

#[tokio::test]
async fn config_driven_form() {
    let config = FormConfig::from_yaml_str(
        "steps:\n  account: [email]\n  done: []\nrules:\n  email:\n    - rule: required\n",
    )
    .expect("config should parse");
    let form = config.form_handle();
    let rules = Rc::new(config.field_rules().expect("rules should build"));
    let next = NextTrigger::new(&form, rules.clone(), "Next");

    assert_eq!(
        next.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Rejected
    );
    rules.set_value("email", "a@b.c");
    assert_eq!(
        next.activate(&mut ClickEvent::new()).await,
        TriggerOutcome::Advanced
    );
    assert!(form.is_last());
}
